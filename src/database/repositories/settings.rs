use anyhow::Result;
use sqlx::SqlitePool;

pub const ADMIN_PASSWORD_HASH_KEY: &str = "admin_password_hash";

#[derive(Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO
                settings (key, value)
            VALUES
                (?, ?)
            ON CONFLICT (key) DO UPDATE
            SET
                value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Stores `value` only if `key` is unset. Returns whether it was written.
    pub async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO
                settings (key, value)
            VALUES
                (?, ?)
            ON CONFLICT (key) DO NOTHING
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
