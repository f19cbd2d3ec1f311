use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::wage::{SalaryType, WageMode};

/// Where the wage terms used for a month came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WageSource {
    /// The snapshot stored for that exact month.
    History,
    /// No snapshot exists, the employee's current terms were used.
    Current,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_time: String,
    pub end_time: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayReport {
    pub hours: f64,
    /// Start of the first entry of the day.
    pub start_time: String,
    /// End of the last entry seen for the day.
    pub end_time: String,
    pub entries: Vec<TimeRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeReport {
    pub id: Uuid,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub wage_mode: SalaryType,
    pub rate_or_amount: f64,
    pub employment_type: String,
    pub wage_source: WageSource,
    pub days: BTreeMap<NaiveDate, DayReport>,
    pub total_hours: f64,
    pub total_wage: f64,
}

impl EmployeeReport {
    pub fn wage(&self) -> WageMode {
        match self.wage_mode {
            SalaryType::Hourly => WageMode::Hourly {
                rate: self.rate_or_amount,
            },
            SalaryType::Fixed => WageMode::Fixed {
                amount: self.rate_or_amount,
            },
        }
    }

    pub fn work_days(&self) -> usize {
        self.days.len()
    }
}

/// Month as shown on the employee's own history page: hours only, no pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeMonthView {
    pub id: Uuid,
    pub name: String,
    pub days: BTreeMap<NaiveDate, DayReport>,
    pub total_hours: f64,
}

impl From<EmployeeReport> for EmployeeMonthView {
    fn from(report: EmployeeReport) -> Self {
        Self {
            id: report.id,
            name: report.name,
            days: report.days,
            total_hours: report.total_hours,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WageModeTotals {
    pub hourly: f64,
    pub fixed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub employees: Vec<EmployeeReport>,
    pub total_hours: f64,
    pub total_wage: f64,
    pub total_wage_by_wage_mode: WageModeTotals,
    pub total_wage_by_category: BTreeMap<String, f64>,
}

impl MonthlyReport {
    pub fn employee(&self, id: Uuid) -> Option<&EmployeeReport> {
        self.employees.iter().find(|employee| employee.id == id)
    }
}

/// One row of the employee x wage snapshot x timesheet left join.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ReportRow {
    pub employee_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub employment_type: String,
    pub salary_type: SalaryType,
    pub hourly_wage: f64,
    pub fixed_salary: f64,
    pub from_history: bool,
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}
