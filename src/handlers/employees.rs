use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::config::Config;
use crate::database::models::{EmployeeInput, EmployeeSummary, Period};
use crate::database::repositories::EmployeeRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::AdminClaims;

// Employee-facing lookups

pub async fn list_employee_summaries(
    repo: web::Data<EmployeeRepository>,
) -> Result<HttpResponse, AppError> {
    let employees = repo.list_employees().await?;
    let summaries: Vec<EmployeeSummary> = employees.iter().map(EmployeeSummary::from).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(summaries)))
}

pub async fn get_employee_summary(
    repo: web::Data<EmployeeRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let employee = repo
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Employee not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(EmployeeSummary::from(&employee))))
}

/// Resolve the personal time-tracking link
pub async fn get_employee_by_link(
    repo: web::Data<EmployeeRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let employee = repo
        .find_by_link_token(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Link not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(EmployeeSummary::from(&employee))))
}

// Admin management

pub async fn list_employees(
    _claims: AdminClaims,
    repo: web::Data<EmployeeRepository>,
) -> Result<HttpResponse, AppError> {
    let employees = repo.list_employees().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(employees)))
}

pub async fn create_employee(
    _claims: AdminClaims,
    repo: web::Data<EmployeeRepository>,
    config: web::Data<Config>,
    input: web::Json<EmployeeInput>,
) -> Result<HttpResponse, AppError> {
    let employee = input
        .into_inner()
        .validate(config.default_hourly_wage, &config.default_employment_type)
        .map_err(AppError::BadRequest)?;

    let employee = repo.create_employee(employee, Period::current()).await?;
    log::info!("Created employee {} ({})", employee.display_name(), employee.id);

    Ok(HttpResponse::Created().json(ApiResponse::success(employee)))
}

pub async fn update_employee(
    _claims: AdminClaims,
    repo: web::Data<EmployeeRepository>,
    config: web::Data<Config>,
    path: web::Path<Uuid>,
    input: web::Json<EmployeeInput>,
) -> Result<HttpResponse, AppError> {
    let employee = input
        .into_inner()
        .validate(config.default_hourly_wage, &config.default_employment_type)
        .map_err(AppError::BadRequest)?;

    let employee = repo
        .update_employee(path.into_inner(), employee, Period::current())
        .await?
        .ok_or_else(|| AppError::not_found("Employee not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(employee)))
}

pub async fn delete_employee(
    _claims: AdminClaims,
    repo: web::Data<EmployeeRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if !repo.delete_employee(id).await? {
        return Err(AppError::not_found("Employee not found"));
    }
    log::info!("Deleted employee {}", id);

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Employee deleted",
    )))
}
