use sqlx::SqlitePool;

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;
pub use services::{AdminAuthService, ReportService, WageImportService};

use database::repositories::{
    EmployeeRepository, ReportRepository, SettingsRepository, WageHistoryRepository,
};

/// Services shared by the handlers; repositories are registered as separate app data.
pub struct AppState {
    pub auth_service: AdminAuthService,
    pub report_service: ReportService,
    pub wage_import_service: WageImportService,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let employees = EmployeeRepository::new(pool.clone());
        let wage_history = WageHistoryRepository::new(pool.clone());

        Self {
            auth_service: AdminAuthService::new(SettingsRepository::new(pool.clone()), config),
            report_service: ReportService::new(wage_history.clone(), ReportRepository::new(pool)),
            wage_import_service: WageImportService::new(employees, wage_history),
        }
    }
}
