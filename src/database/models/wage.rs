use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;
use super::period::Period;

string_enum! {
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum SalaryType {
        #[default]
        Hourly => "hourly",
        Fixed => "fixed",
    }
}

/// Compensation terms: paid per hour worked, or a flat monthly amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "salaryType", rename_all = "camelCase")]
pub enum WageMode {
    Hourly { rate: f64 },
    Fixed { amount: f64 },
}

impl WageMode {
    /// Builds terms from the flat column layout shared by `employees` and `wage_history`.
    pub fn from_columns(salary_type: SalaryType, hourly_wage: f64, fixed_salary: f64) -> Self {
        match salary_type {
            SalaryType::Hourly => WageMode::Hourly { rate: hourly_wage },
            SalaryType::Fixed => WageMode::Fixed {
                amount: fixed_salary,
            },
        }
    }

    /// Inverse of [`WageMode::from_columns`]; the unused column is stored as zero.
    pub fn to_columns(&self) -> (SalaryType, f64, f64) {
        match *self {
            WageMode::Hourly { rate } => (SalaryType::Hourly, rate, 0.0),
            WageMode::Fixed { amount } => (SalaryType::Fixed, 0.0, amount),
        }
    }

    pub fn salary_type(&self) -> SalaryType {
        match self {
            WageMode::Hourly { .. } => SalaryType::Hourly,
            WageMode::Fixed { .. } => SalaryType::Fixed,
        }
    }

    pub fn rate_or_amount(&self) -> f64 {
        match *self {
            WageMode::Hourly { rate } => rate,
            WageMode::Fixed { amount } => amount,
        }
    }

    /// Fixed salaries are not pro-rated by the hours worked.
    pub fn total_wage(&self, hours: f64) -> f64 {
        match *self {
            WageMode::Hourly { rate } => hours * rate,
            WageMode::Fixed { amount } => amount,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let value = self.rate_or_amount();
        if !value.is_finite() || value < 0.0 {
            return Err(format!("Wage must be a non-negative number, got {}", value));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WageSnapshot {
    pub id: i64,
    pub employee_id: Uuid,
    pub year: i32,
    pub month: u32,
    pub wage: WageMode,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WageSnapshot {
    pub fn period(&self) -> Period {
        Period {
            year: self.year,
            month: self.month,
        }
    }
}

/// Body of an explicit snapshot correction for one exact month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WageSnapshotInput {
    pub salary_type: SalaryType,
    pub hourly_wage: Option<f64>,
    pub fixed_salary: Option<f64>,
}

impl WageSnapshotInput {
    pub fn wage_mode(&self) -> Result<WageMode, String> {
        let wage = match self.salary_type {
            SalaryType::Hourly => WageMode::Hourly {
                rate: self
                    .hourly_wage
                    .ok_or_else(|| "hourlyWage is required for hourly wages".to_string())?,
            },
            SalaryType::Fixed => WageMode::Fixed {
                amount: self
                    .fixed_salary
                    .ok_or_else(|| "fixedSalary is required for fixed salaries".to_string())?,
            },
        };
        wage.validate()?;
        Ok(wage)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WageImportSummary {
    pub imported: usize,
    pub errors: Vec<String>,
}
