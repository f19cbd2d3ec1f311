pub mod auth;
pub mod export;
pub mod report;
pub mod wage_import;

pub use auth::{AdminAuthService, AdminClaims};
pub use report::{ReportError, ReportService};
pub use wage_import::WageImportService;
