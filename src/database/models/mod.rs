pub mod auth;
pub mod employee;
pub mod macros;
pub mod period;
pub mod report;
pub mod timesheet;
pub mod wage;

// Re-export all models for easy importing
pub use auth::*;
pub use employee::*;
pub use period::*;
pub use report::*;
pub use timesheet::*;
pub use wage::*;
