use actix_web::web;

use crate::handlers::{employees, reports};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/employees")
            .route("", web::get().to(employees::list_employee_summaries))
            .route("/{id}", web::get().to(employees::get_employee_summary))
            .route(
                "/{id}/report/{year}/{month}",
                web::get().to(reports::get_employee_month),
            ),
    )
    .route(
        "/links/{token}",
        web::get().to(employees::get_employee_by_link),
    );
}
