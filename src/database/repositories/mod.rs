pub mod employee;
pub mod report;
pub mod settings;
pub mod timesheet;
pub mod wage_history;

// Re-export all repositories for easy importing
pub use employee::EmployeeRepository;
pub use report::ReportRepository;
pub use settings::SettingsRepository;
pub use timesheet::TimesheetRepository;
pub use wage_history::WageHistoryRepository;
