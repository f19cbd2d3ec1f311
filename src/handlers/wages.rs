use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::AppState;
use crate::database::models::{Period, WageSnapshotInput};
use crate::database::repositories::{EmployeeRepository, WageHistoryRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::AdminClaims;

pub async fn get_wage_history(
    _claims: AdminClaims,
    employees: web::Data<EmployeeRepository>,
    repo: web::Data<WageHistoryRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let employee_id = path.into_inner();
    if employees.find_by_id(employee_id).await?.is_none() {
        return Err(AppError::not_found("Employee not found"));
    }

    let history = repo.list_for_employee(employee_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(history)))
}

/// Correct the wage snapshot of one exact month
pub async fn put_wage_snapshot(
    _claims: AdminClaims,
    employees: web::Data<EmployeeRepository>,
    repo: web::Data<WageHistoryRepository>,
    path: web::Path<(Uuid, i32, u32)>,
    input: web::Json<WageSnapshotInput>,
) -> Result<HttpResponse, AppError> {
    let (employee_id, year, month) = path.into_inner();
    let period = Period::new(year, month)?;
    let wage = input.wage_mode().map_err(AppError::BadRequest)?;

    if employees.find_by_id(employee_id).await?.is_none() {
        return Err(AppError::not_found("Employee not found"));
    }

    let snapshot = repo.upsert_snapshot(employee_id, period, wage).await?;
    log::info!("Wage snapshot of {} for {} set explicitly", employee_id, period);

    Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot)))
}

/// Import wage snapshots from a CSV body
pub async fn import_wages(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    body: String,
) -> Result<HttpResponse, AppError> {
    if body.trim().lines().count() < 2 {
        return Err(AppError::BadRequest(
            "CSV must contain a header and at least one line".to_string(),
        ));
    }

    let summary = state
        .wage_import_service
        .import(&body, Period::current())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
}
