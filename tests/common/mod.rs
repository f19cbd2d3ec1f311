#![allow(dead_code)]

use actix_web::{body::MessageBody, dev::ServiceResponse, test, web};
use anyhow::Result;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use sqlx::SqlitePool;
use tempfile::TempDir;
use uuid::Uuid;

use inntime::config::Config;
use inntime::database::init_database;
use inntime::database::models::{Employee, NewEmployee, Period, TimesheetEntry, TimesheetInput, WageMode};
use inntime::database::repositories::{
    EmployeeRepository, TimesheetRepository, WageHistoryRepository,
};
use inntime::handlers::shared::ApiResponse;
use inntime::services::auth::generate_token;
use inntime::{AppState, routes};

pub const TEST_ADMIN_PASSWORD: &str = "test-admin-password";

// Test database wrapper
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());
        let pool = init_database(&database_url).await?;

        Ok(TestDb {
            pool,
            _temp_dir: temp_dir,
        })
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-jwt-secret-key-that-is-long-enough".to_string(),
        jwt_expiration_days: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        client_base_url: "http://localhost:3000".to_string(),
        admin_password: TEST_ADMIN_PASSWORD.to_string(),
        default_hourly_wage: 12.0,
        default_employment_type: "Regular".to_string(),
        password_hash_cost: 4,
        seed_demo_data: false,
    }
}

// Test application wrapper
pub struct TestApp {
    pub db: TestDb,
    pub config: Config,
    pub state: web::Data<AppState>,
    pub employees: EmployeeRepository,
    pub timesheets: TimesheetRepository,
    pub wage_history: WageHistoryRepository,
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        let db = TestDb::new().await?;
        let config = test_config();

        let state = web::Data::new(AppState::new(db.pool.clone(), config.clone()));
        state.auth_service.ensure_admin_password().await?;

        Ok(TestApp {
            employees: EmployeeRepository::new(db.pool.clone()),
            timesheets: TimesheetRepository::new(db.pool.clone()),
            wage_history: WageHistoryRepository::new(db.pool.clone()),
            db,
            config,
            state,
        })
    }

    /// App data and routes as registered by the server binary.
    pub fn configure(&self) -> impl FnOnce(&mut web::ServiceConfig) + 'static {
        let state = self.state.clone();
        let employees = web::Data::new(self.employees.clone());
        let timesheets = web::Data::new(self.timesheets.clone());
        let wage_history = web::Data::new(self.wage_history.clone());
        let config = web::Data::new(self.config.clone());

        move |cfg: &mut web::ServiceConfig| {
            cfg.app_data(state)
                .app_data(employees)
                .app_data(timesheets)
                .app_data(wage_history)
                .app_data(config)
                .configure(routes::configure);
        }
    }

    pub fn admin_token(&self) -> String {
        generate_token(&self.config).unwrap().token
    }

    pub fn bearer(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.admin_token()))
    }

    pub async fn hourly_employee(&self, first_name: &str, last_name: &str, rate: f64) -> Employee {
        self.employee(first_name, last_name, WageMode::Hourly { rate }, "Regular")
            .await
    }

    pub async fn employee(
        &self,
        first_name: &str,
        last_name: &str,
        wage: WageMode,
        employment_type: &str,
    ) -> Employee {
        self.employees
            .create_employee(
                NewEmployee {
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    wage,
                    employment_type: employment_type.to_string(),
                },
                Period::current(),
            )
            .await
            .unwrap()
    }

    /// Appends one entry without touching the other entries of the day.
    pub async fn log_time(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        start_time: &str,
        end_time: &str,
    ) -> TimesheetEntry {
        self.timesheets
            .append_entry(&entry(employee_id, date, start_time, end_time))
            .await
            .unwrap()
    }
}

pub fn entry(employee_id: Uuid, date: NaiveDate, start_time: &str, end_time: &str) -> TimesheetInput {
    TimesheetInput {
        employee_id,
        date,
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn period(year: i32, month: u32) -> Period {
    Period::new(year, month).unwrap()
}

/// Asserts the envelope reports success and returns its payload.
pub async fn read_success<T, B>(resp: ServiceResponse<B>) -> T
where
    T: DeserializeOwned,
    B: MessageBody,
{
    let body: ApiResponse<T> = test::read_body_json(resp).await;
    assert!(body.success, "expected a successful response");
    body.data.expect("response without data")
}
