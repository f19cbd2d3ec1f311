use actix_web::web;

use crate::handlers::timesheets;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/timesheets")
            .route("", web::get().to(timesheets::get_day_entries))
            .route("", web::post().to(timesheets::upsert_entry))
            .route("/entries", web::post().to(timesheets::append_entry))
            .route("/{id}", web::delete().to(timesheets::delete_entry)),
    );
}
