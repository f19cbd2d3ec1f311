use actix_web::{HttpResponse, web};

use crate::AppState;
use crate::database::models::{ChangePasswordInput, LoginInput};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::AdminClaims;

/// Exchange the admin password for a bearer token
pub async fn login(
    state: web::Data<AppState>,
    input: web::Json<LoginInput>,
) -> Result<HttpResponse, AppError> {
    match state.auth_service.login(&input.password).await? {
        Some(auth) => Ok(HttpResponse::Ok().json(ApiResponse::success(auth))),
        None => Err(AppError::Unauthorized),
    }
}

pub async fn change_password(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    input: web::Json<ChangePasswordInput>,
) -> Result<HttpResponse, AppError> {
    if input.new_password.trim().is_empty() {
        return Err(AppError::BadRequest(
            "New password must not be empty".to_string(),
        ));
    }

    if !state.auth_service.change_password(&input).await? {
        return Err(AppError::Unauthorized);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Password changed",
    )))
}
