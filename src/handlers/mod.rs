pub mod auth;
pub mod employees;
pub mod reports;
pub mod shared;
pub mod timesheets;
pub mod wages;
