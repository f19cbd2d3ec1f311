use actix_web::{
    Error as ActixError, FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized,
    web::Data,
};
use anyhow::{Result, anyhow};
use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};

use crate::config::Config;
use crate::database::models::{AuthResponse, ChangePasswordInput};
use crate::database::repositories::{SettingsRepository, settings::ADMIN_PASSWORD_HASH_KEY};

pub const ADMIN_SUBJECT: &str = "admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Extractor guarding the admin routes: a valid bearer token or 401.
#[derive(Debug)]
pub struct AdminClaims(pub Claims);

impl FromRequest for AdminClaims {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let (Some(token), Some(config)) = (token, req.app_data::<Data<Config>>()) else {
            return ready(Err(ErrorUnauthorized(
                "Missing or invalid authorization header",
            )));
        };

        match verify_token(token, config) {
            Ok(claims) if claims.sub == ADMIN_SUBJECT => ready(Ok(AdminClaims(claims))),
            _ => ready(Err(ErrorUnauthorized("Invalid token"))),
        }
    }
}

pub fn generate_token(config: &Config) -> Result<AuthResponse> {
    let expires_at = Utc::now()
        .checked_add_signed(Duration::days(config.jwt_expiration_days))
        .ok_or_else(|| anyhow!("Token expiration out of range"))?;

    let claims = Claims {
        sub: ADMIN_SUBJECT.to_string(),
        exp: expires_at.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )?;

    Ok(AuthResponse { token, expires_at })
}

pub fn verify_token(token: &str, config: &Config) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )?;

    Ok(token_data.claims)
}

/// Single shared admin password, kept as a bcrypt hash in `settings`.
#[derive(Clone)]
pub struct AdminAuthService {
    settings: SettingsRepository,
    config: Config,
}

impl AdminAuthService {
    pub fn new(settings: SettingsRepository, config: Config) -> Self {
        Self { settings, config }
    }

    /// Seeds the configured initial password unless one is stored already.
    pub async fn ensure_admin_password(&self) -> Result<()> {
        let password_hash = hash(&self.config.admin_password, self.config.password_hash_cost)?;
        if self
            .settings
            .set_if_absent(ADMIN_PASSWORD_HASH_KEY, &password_hash)
            .await?
        {
            log::info!("Admin password initialised from configuration");
            if self.config.is_production()
                && self.config.admin_password == crate::config::DEFAULT_ADMIN_PASSWORD
            {
                log::warn!("Admin password is the default one, change it after the first login");
            }
        }
        Ok(())
    }

    /// `None` when the password does not match.
    pub async fn login(&self, password: &str) -> Result<Option<AuthResponse>> {
        if !self.check_password(password).await? {
            log::warn!("Rejected admin login attempt");
            return Ok(None);
        }

        generate_token(&self.config).map(Some)
    }

    /// Returns `false` when the old password does not match.
    pub async fn change_password(&self, input: &ChangePasswordInput) -> Result<bool> {
        if input.new_password.trim().is_empty() {
            return Err(anyhow!("New password must not be empty"));
        }
        if !self.check_password(&input.old_password).await? {
            return Ok(false);
        }

        let password_hash = hash(&input.new_password, self.config.password_hash_cost)?;
        self.settings
            .set(ADMIN_PASSWORD_HASH_KEY, &password_hash)
            .await?;
        log::info!("Admin password changed");

        Ok(true)
    }

    async fn check_password(&self, password: &str) -> Result<bool> {
        let Some(password_hash) = self.settings.get(ADMIN_PASSWORD_HASH_KEY).await? else {
            return Ok(false);
        };

        Ok(verify(password, &password_hash)?)
    }
}
