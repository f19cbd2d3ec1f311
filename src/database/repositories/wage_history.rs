use anyhow::Result;
use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::database::{
    models::{Period, WageMode, WageSnapshot},
    types::WageSnapshotRow,
};

#[derive(Clone)]
pub struct WageHistoryRepository {
    pool: SqlitePool,
}

impl WageHistoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Copies the current terms of every employee with timesheet activity in
    /// `period` into a snapshot for that month, unless one already exists.
    ///
    /// Existing snapshots are never touched, so repeated or concurrent calls
    /// only insert once. Returns the number of snapshots created.
    pub async fn backfill_month(&self, period: Period) -> Result<u64> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO
                wage_history (
                    employee_id,
                    year,
                    month,
                    salary_type,
                    hourly_wage,
                    fixed_salary,
                    created_at,
                    updated_at
                )
            SELECT
                e.id,
                ?,
                ?,
                e.salary_type,
                e.hourly_wage,
                e.fixed_salary,
                ?,
                ?
            FROM
                employees e
            WHERE
                EXISTS (
                    SELECT
                        1
                    FROM
                        timesheets t
                    WHERE
                        t.employee_id = e.id
                        AND t.date LIKE ?
                )
            ON CONFLICT (employee_id, year, month) DO NOTHING
            "#,
        )
        .bind(period.year)
        .bind(period.month)
        .bind(now)
        .bind(now)
        .bind(period.like_pattern())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn find_snapshot(
        &self,
        employee_id: Uuid,
        period: Period,
    ) -> Result<Option<WageSnapshot>> {
        let row = sqlx::query_as::<_, WageSnapshotRow>(
            r#"
            SELECT
                id,
                employee_id,
                year,
                month,
                salary_type,
                hourly_wage,
                fixed_salary,
                created_at,
                updated_at
            FROM
                wage_history
            WHERE
                employee_id = ?
                AND year = ?
                AND month = ?
            "#,
        )
        .bind(employee_id)
        .bind(period.year)
        .bind(period.month)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Newest month first.
    pub async fn list_for_employee(&self, employee_id: Uuid) -> Result<Vec<WageSnapshot>> {
        let rows = sqlx::query_as::<_, WageSnapshotRow>(
            r#"
            SELECT
                id,
                employee_id,
                year,
                month,
                salary_type,
                hourly_wage,
                fixed_salary,
                created_at,
                updated_at
            FROM
                wage_history
            WHERE
                employee_id = ?
            ORDER BY
                year DESC,
                month DESC
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Explicit administrative correction: writes the snapshot for exactly
    /// `period`, replacing whatever was stored for it.
    pub async fn upsert_snapshot(
        &self,
        employee_id: Uuid,
        period: Period,
        wage: WageMode,
    ) -> Result<WageSnapshot> {
        let row = upsert_snapshot(&self.pool, employee_id, period, wage).await?;
        Ok(row.into())
    }
}

pub(crate) async fn upsert_snapshot<'e, E>(
    executor: E,
    employee_id: Uuid,
    period: Period,
    wage: WageMode,
) -> Result<WageSnapshotRow>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = Utc::now();
    let (salary_type, hourly_wage, fixed_salary) = wage.to_columns();

    let row = sqlx::query_as::<_, WageSnapshotRow>(
        r#"
        INSERT INTO
            wage_history (
                employee_id,
                year,
                month,
                salary_type,
                hourly_wage,
                fixed_salary,
                created_at,
                updated_at
            )
        VALUES
            (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (employee_id, year, month) DO UPDATE
        SET
            salary_type = excluded.salary_type,
            hourly_wage = excluded.hourly_wage,
            fixed_salary = excluded.fixed_salary,
            updated_at = excluded.updated_at
        RETURNING
            id,
            employee_id,
            year,
            month,
            salary_type,
            hourly_wage,
            fixed_salary,
            created_at,
            updated_at
        "#,
    )
    .bind(employee_id)
    .bind(period.year)
    .bind(period.month)
    .bind(salary_type)
    .bind(hourly_wage)
    .bind(fixed_salary)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(row)
}
