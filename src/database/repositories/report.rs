use anyhow::Result;
use sqlx::SqlitePool;

use crate::database::models::{Period, ReportRow};

/// Read side of the monthly report. Never writes.
#[derive(Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Every employee joined with the snapshot of `period` (if any) and the
    /// timesheet rows dated inside it. Employees without entries yield one
    /// row with a NULL date.
    pub async fn fetch_month_rows(&self, period: Period) -> Result<Vec<ReportRow>> {
        let rows = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT
                e.id AS employee_id,
                e.first_name,
                e.last_name,
                e.employment_type,
                COALESCE(wh.salary_type, e.salary_type) AS salary_type,
                COALESCE(wh.hourly_wage, e.hourly_wage) AS hourly_wage,
                COALESCE(wh.fixed_salary, e.fixed_salary) AS fixed_salary,
                wh.id IS NOT NULL AS from_history,
                t.date,
                t.start_time,
                t.end_time
            FROM
                employees e
                LEFT JOIN wage_history wh ON wh.employee_id = e.id
                AND wh.year = ?
                AND wh.month = ?
                LEFT JOIN timesheets t ON t.employee_id = e.id
                AND t.date LIKE ?
            ORDER BY
                e.first_name,
                e.last_name,
                e.id,
                t.date,
                t.start_time,
                t.id
            "#,
        )
        .bind(period.year)
        .bind(period.month)
        .bind(period.like_pattern())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
