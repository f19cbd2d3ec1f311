use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::models::{Employee, SalaryType, WageMode, WageSnapshot};

// Database row types that match the exact SQLite schema
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmployeeRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub link_token: Uuid,
    pub salary_type: SalaryType,
    pub hourly_wage: f64,
    pub fixed_salary: f64,
    pub employment_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WageSnapshotRow {
    pub id: i64,
    pub employee_id: Uuid,
    pub year: i32,
    pub month: u32,
    pub salary_type: SalaryType,
    pub hourly_wage: f64,
    pub fixed_salary: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Conversion functions
impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            link_token: row.link_token,
            wage: WageMode::from_columns(row.salary_type, row.hourly_wage, row.fixed_salary),
            employment_type: row.employment_type,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<WageSnapshotRow> for WageSnapshot {
    fn from(row: WageSnapshotRow) -> Self {
        Self {
            id: row.id,
            employee_id: row.employee_id,
            year: row.year,
            month: row.month,
            wage: WageMode::from_columns(row.salary_type, row.hourly_wage, row.fixed_salary),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
