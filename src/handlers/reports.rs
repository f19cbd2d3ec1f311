use actix_web::{HttpResponse, http::header, web};
use uuid::Uuid;

use crate::AppState;
use crate::database::models::{EmployeeMonthView, Period};
use crate::database::repositories::EmployeeRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::{AdminClaims, export};

fn csv_attachment(filename: &str, body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(format!("{}{}", export::CSV_BOM, body))
}

/// Monthly hours and wages of all employees
pub async fn get_monthly_report(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    path: web::Path<(i32, u32)>,
) -> Result<HttpResponse, AppError> {
    let (year, month) = path.into_inner();
    let period = Period::new(year, month)?;

    let report = state.report_service.monthly_report(period).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(report)))
}

pub async fn export_monthly_report_csv(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    path: web::Path<(i32, u32)>,
) -> Result<HttpResponse, AppError> {
    let (year, month) = path.into_inner();
    let period = Period::new(year, month)?;

    let report = state.report_service.monthly_report(period).await?;
    let body = export::monthly_report_csv(&report)?;

    Ok(csv_attachment(&export::report_filename(period), body))
}

/// Month view for the employee's own history page, without wage figures
pub async fn get_employee_month(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, i32, u32)>,
) -> Result<HttpResponse, AppError> {
    let (employee_id, year, month) = path.into_inner();
    let period = Period::new(year, month)?;

    let report = state
        .report_service
        .employee_month(employee_id, period)
        .await?
        .ok_or_else(|| AppError::not_found("Employee not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(EmployeeMonthView::from(report))))
}

pub async fn export_employees_csv(
    _claims: AdminClaims,
    repo: web::Data<EmployeeRepository>,
) -> Result<HttpResponse, AppError> {
    let employees = repo.list_employees().await?;
    let body = export::employees_csv(&employees)?;

    Ok(csv_attachment(export::employees_filename(), body))
}
