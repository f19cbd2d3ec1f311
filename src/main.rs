use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, web};
use anyhow::Result;

use inntime::database::{
    init_database,
    repositories::{EmployeeRepository, TimesheetRepository, WageHistoryRepository},
    seed::seed_demo_employees,
};
use inntime::middleware::RequestIdMiddleware;
use inntime::{AppState, Config, routes};

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    log::info!(
        "Starting InnTime API (environment: {})",
        config.environment
    );

    let pool = init_database(&config.database_url).await?;

    let employee_repository = EmployeeRepository::new(pool.clone());
    let timesheet_repository = TimesheetRepository::new(pool.clone());
    let wage_history_repository = WageHistoryRepository::new(pool.clone());
    let app_state = web::Data::new(AppState::new(pool, config.clone()));

    app_state.auth_service.ensure_admin_password().await?;

    if config.seed_demo_data {
        let created = seed_demo_employees(&employee_repository, &config).await?;
        if created > 0 {
            log::info!("Seeded {} demo employees", created);
        }
    }

    let employee_repo_data = web::Data::new(employee_repository);
    let timesheet_repo_data = web::Data::new(timesheet_repository);
    let wage_history_repo_data = web::Data::new(wage_history_repository);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    log::info!("Server listening on http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(employee_repo_data.clone())
            .app_data(timesheet_repo_data.clone())
            .app_data(wage_history_repo_data.clone())
            .app_data(config_data.clone())
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new(
                r#"%a "%r" %s %b %T [%{x-correlation-id}o]"#,
            ))
            .wrap(
                Cors::default()
                    .allowed_origin(&config.client_base_url)
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "X-Correlation-ID",
                    ])
                    .expose_headers(vec!["Content-Disposition", "X-Correlation-ID"])
                    .max_age(3600),
            )
            .service(health)
            .configure(routes::configure)
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
