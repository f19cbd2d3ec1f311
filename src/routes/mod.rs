use actix_web::web;

pub mod admin;
pub mod employees;
pub mod timesheets;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(employees::configure)
            .configure(timesheets::configure)
            .configure(admin::configure),
    );
}
