use anyhow::Result;
use std::env;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:./inntime.db";
pub const DEFAULT_JWT_SECRET: &str = "inntime-development-jwt-secret-change-this-in-production";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_days: i64,
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub client_base_url: String,
    /// Only used to seed the admin password when none is stored yet.
    pub admin_password: String,
    pub default_hourly_wage: f64,
    pub default_employment_type: String,
    pub password_hash_cost: u32,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_env_only()
    }

    /// Load configuration from environment variables only (without loading .env files)
    /// This is useful for testing where you want to control the environment directly
    pub fn from_env_only() -> Result<Self> {
        Ok(Config {
            database_url: var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            jwt_secret: var_or("JWT_SECRET", DEFAULT_JWT_SECRET),
            jwt_expiration_days: parsed_or("JWT_EXPIRATION_DAYS", 30),
            host: var_or("HOST", "127.0.0.1"),
            port: parsed_or("PORT", 8080),
            environment: var_or("ENVIRONMENT", "development"),
            client_base_url: var_or("BASE_URL", "http://localhost:3000"),
            admin_password: var_or("ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD),
            default_hourly_wage: parsed_or("DEFAULT_HOURLY_WAGE", 12.00),
            default_employment_type: var_or("DEFAULT_EMPLOYMENT_TYPE", "Regular"),
            password_hash_cost: parsed_or("PASSWORD_HASH_COST", bcrypt::DEFAULT_COST),
            seed_demo_data: parsed_or("SEED_DEMO_DATA", false),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
