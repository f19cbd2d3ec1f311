use actix_web::web;

use crate::handlers::{auth, employees, reports, wages};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/login", web::post().to(auth::login))
            .route("/change-password", web::post().to(auth::change_password))
            // Static segment before the `{id}` routes
            .route(
                "/employees/export",
                web::get().to(reports::export_employees_csv),
            )
            .route("/employees", web::get().to(employees::list_employees))
            .route("/employees", web::post().to(employees::create_employee))
            .route("/employees/{id}", web::put().to(employees::update_employee))
            .route(
                "/employees/{id}",
                web::delete().to(employees::delete_employee),
            )
            .route(
                "/employees/{id}/wages",
                web::get().to(wages::get_wage_history),
            )
            .route(
                "/employees/{id}/wages/{year}/{month}",
                web::put().to(wages::put_wage_snapshot),
            )
            .route("/wages/import", web::post().to(wages::import_wages))
            .route(
                "/reports/{year}/{month}",
                web::get().to(reports::get_monthly_report),
            )
            .route(
                "/reports/{year}/{month}/csv",
                web::get().to(reports::export_monthly_report_csv),
            ),
    );
}
