use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{
    models::{Employee, NewEmployee, Period},
    repositories::wage_history::upsert_snapshot,
    types::EmployeeRow,
};

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts the employee together with the wage snapshot for `period`.
    pub async fn create_employee(&self, employee: NewEmployee, period: Period) -> Result<Employee> {
        let now = Utc::now();
        let (salary_type, hourly_wage, fixed_salary) = employee.wage.to_columns();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            INSERT INTO
                employees (
                    id,
                    first_name,
                    last_name,
                    link_token,
                    salary_type,
                    hourly_wage,
                    fixed_salary,
                    employment_type,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                id,
                first_name,
                last_name,
                link_token,
                salary_type,
                hourly_wage,
                fixed_salary,
                employment_type,
                created_at,
                updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(Uuid::new_v4())
        .bind(salary_type)
        .bind(hourly_wage)
        .bind(fixed_salary)
        .bind(&employee.employment_type)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        upsert_snapshot(&mut *tx, row.id, period, employee.wage).await?;
        tx.commit().await?;

        Ok(row.into())
    }

    /// Updates the current record and overwrites the snapshot of `period`.
    pub async fn update_employee(
        &self,
        id: Uuid,
        employee: NewEmployee,
        period: Period,
    ) -> Result<Option<Employee>> {
        let (salary_type, hourly_wage, fixed_salary) = employee.wage.to_columns();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            UPDATE
                employees
            SET
                first_name = ?,
                last_name = ?,
                salary_type = ?,
                hourly_wage = ?,
                fixed_salary = ?,
                employment_type = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                first_name,
                last_name,
                link_token,
                salary_type,
                hourly_wage,
                fixed_salary,
                employment_type,
                created_at,
                updated_at
            "#,
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(salary_type)
        .bind(hourly_wage)
        .bind(fixed_salary)
        .bind(&employee.employment_type)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        upsert_snapshot(&mut *tx, row.id, period, employee.wage).await?;
        tx.commit().await?;

        Ok(Some(row.into()))
    }

    pub async fn delete_employee(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT
                id,
                first_name,
                last_name,
                link_token,
                salary_type,
                hourly_wage,
                fixed_salary,
                employment_type,
                created_at,
                updated_at
            FROM
                employees
            WHERE
                id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    pub async fn find_by_link_token(&self, link_token: Uuid) -> Result<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT
                id,
                first_name,
                last_name,
                link_token,
                salary_type,
                hourly_wage,
                fixed_salary,
                employment_type,
                created_at,
                updated_at
            FROM
                employees
            WHERE
                link_token = ?
            "#,
        )
        .bind(link_token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Matches "First Last" exactly, as written in imported spreadsheets.
    pub async fn find_by_full_name(&self, full_name: &str) -> Result<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT
                id,
                first_name,
                last_name,
                link_token,
                salary_type,
                hourly_wage,
                fixed_salary,
                employment_type,
                created_at,
                updated_at
            FROM
                employees
            WHERE
                first_name || ' ' || last_name = ?
            ORDER BY
                created_at
            LIMIT 1
            "#,
        )
        .bind(full_name.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT
                id,
                first_name,
                last_name,
                link_token,
                salary_type,
                hourly_wage,
                fixed_salary,
                employment_type,
                created_at,
                updated_at
            FROM
                employees
            ORDER BY
                first_name,
                last_name,
                id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn count_employees(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
