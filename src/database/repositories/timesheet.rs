use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{TimesheetEntry, TimesheetInput, UpsertOutcome};

#[derive(Clone)]
pub struct TimesheetRepository {
    pool: SqlitePool,
}

impl TimesheetRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Replaces the entries of `(employee_id, date)` with the submitted one.
    ///
    /// The oldest row of the day is overwritten in place and any further rows
    /// of that day are removed.
    pub async fn upsert_entry(
        &self,
        input: &TimesheetInput,
    ) -> Result<(TimesheetEntry, UpsertOutcome)> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let existing_id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT
                id
            FROM
                timesheets
            WHERE
                employee_id = ?
                AND date = ?
            ORDER BY
                id
            LIMIT 1
            "#,
        )
        .bind(input.employee_id)
        .bind(input.date)
        .fetch_optional(&mut *tx)
        .await?;

        let result = match existing_id {
            Some(id) => {
                sqlx::query("DELETE FROM timesheets WHERE employee_id = ? AND date = ? AND id <> ?")
                    .bind(input.employee_id)
                    .bind(input.date)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;

                let entry = sqlx::query_as::<_, TimesheetEntry>(
                    r#"
                    UPDATE
                        timesheets
                    SET
                        start_time = ?,
                        end_time = ?,
                        updated_at = ?
                    WHERE
                        id = ?
                    RETURNING
                        id,
                        employee_id,
                        date,
                        start_time,
                        end_time,
                        created_at,
                        updated_at
                    "#,
                )
                .bind(&input.start_time)
                .bind(&input.end_time)
                .bind(now)
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

                (entry, UpsertOutcome::Updated)
            }
            None => {
                let entry = sqlx::query_as::<_, TimesheetEntry>(
                    r#"
                    INSERT INTO
                        timesheets (employee_id, date, start_time, end_time, created_at, updated_at)
                    VALUES
                        (?, ?, ?, ?, ?, ?)
                    RETURNING
                        id,
                        employee_id,
                        date,
                        start_time,
                        end_time,
                        created_at,
                        updated_at
                    "#,
                )
                .bind(input.employee_id)
                .bind(input.date)
                .bind(&input.start_time)
                .bind(&input.end_time)
                .bind(now)
                .bind(now)
                .fetch_one(&mut *tx)
                .await?;

                (entry, UpsertOutcome::Created)
            }
        };

        tx.commit().await?;
        Ok(result)
    }

    /// Adds another entry to the day, e.g. the second half of a split shift.
    pub async fn append_entry(&self, input: &TimesheetInput) -> Result<TimesheetEntry> {
        let now = Utc::now();
        let entry = sqlx::query_as::<_, TimesheetEntry>(
            r#"
            INSERT INTO
                timesheets (employee_id, date, start_time, end_time, created_at, updated_at)
            VALUES
                (?, ?, ?, ?, ?, ?)
            RETURNING
                id,
                employee_id,
                date,
                start_time,
                end_time,
                created_at,
                updated_at
            "#,
        )
        .bind(input.employee_id)
        .bind(input.date)
        .bind(&input.start_time)
        .bind(&input.end_time)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    pub async fn find_by_employee_and_date(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<TimesheetEntry>> {
        let entries = sqlx::query_as::<_, TimesheetEntry>(
            r#"
            SELECT
                id,
                employee_id,
                date,
                start_time,
                end_time,
                created_at,
                updated_at
            FROM
                timesheets
            WHERE
                employee_id = ?
                AND date = ?
            ORDER BY
                start_time,
                id
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn delete_entry(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM timesheets WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
