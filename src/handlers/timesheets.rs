use actix_web::{HttpResponse, web};

use crate::database::models::{TimesheetInput, TimesheetQuery, UpsertOutcome};
use crate::database::repositories::{EmployeeRepository, TimesheetRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;

async fn ensure_employee_exists(
    employees: &EmployeeRepository,
    input: &TimesheetInput,
) -> Result<(), AppError> {
    input.validate().map_err(AppError::BadRequest)?;
    employees
        .find_by_id(input.employee_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found("Employee not found"))
}

pub async fn get_day_entries(
    repo: web::Data<TimesheetRepository>,
    query: web::Query<TimesheetQuery>,
) -> Result<HttpResponse, AppError> {
    let entries = repo
        .find_by_employee_and_date(query.employee_id, query.date)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(entries)))
}

/// Record the working time of a day, replacing what was stored for it
pub async fn upsert_entry(
    repo: web::Data<TimesheetRepository>,
    employees: web::Data<EmployeeRepository>,
    input: web::Json<TimesheetInput>,
) -> Result<HttpResponse, AppError> {
    ensure_employee_exists(&employees, &input).await?;

    let (entry, outcome) = repo.upsert_entry(&input).await?;
    let response = match outcome {
        UpsertOutcome::Created => HttpResponse::Created(),
        UpsertOutcome::Updated => HttpResponse::Ok(),
    }
    .json(ApiResponse::success(entry));

    Ok(response)
}

/// Add a further entry to the day (split shift)
pub async fn append_entry(
    repo: web::Data<TimesheetRepository>,
    employees: web::Data<EmployeeRepository>,
    input: web::Json<TimesheetInput>,
) -> Result<HttpResponse, AppError> {
    ensure_employee_exists(&employees, &input).await?;

    let entry = repo.append_entry(&input).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(entry)))
}

pub async fn delete_entry(
    repo: web::Data<TimesheetRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    if !repo.delete_entry(path.into_inner()).await? {
        return Err(AppError::not_found("Timesheet entry not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Timesheet entry deleted",
    )))
}
