use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::wage::{SalaryType, WageMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Token of the personal time-tracking link handed to the employee.
    pub link_token: Uuid,
    /// Current terms. Past months are priced from `wage_history`.
    pub wage: WageMode,
    pub employment_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }
}

pub fn display_name(first_name: &str, last_name: &str) -> String {
    let name = format!("{} {}", first_name.trim(), last_name.trim());
    let name = name.trim();
    if name.is_empty() {
        "Unknown".to_string()
    } else {
        name.to_string()
    }
}

/// What the employee-facing pages get to see.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub id: Uuid,
    pub name: String,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.display_name(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub salary_type: Option<SalaryType>,
    pub hourly_wage: Option<f64>,
    pub fixed_salary: Option<f64>,
    pub employment_type: Option<String>,
}

/// Validated employee fields with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub wage: WageMode,
    pub employment_type: String,
}

impl EmployeeInput {
    pub fn validate(
        self,
        default_hourly_wage: f64,
        default_employment_type: &str,
    ) -> Result<NewEmployee, String> {
        let first_name = self.first_name.trim().to_string();
        let last_name = self.last_name.trim().to_string();
        if first_name.is_empty() || last_name.is_empty() {
            return Err("First and last name are required".to_string());
        }

        let wage = match self.salary_type.unwrap_or_default() {
            SalaryType::Hourly => WageMode::Hourly {
                rate: self.hourly_wage.unwrap_or(default_hourly_wage),
            },
            SalaryType::Fixed => WageMode::Fixed {
                amount: self.fixed_salary.unwrap_or(0.0),
            },
        };
        wage.validate()?;

        let employment_type = self
            .employment_type
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default_employment_type.to_string());

        Ok(NewEmployee {
            first_name,
            last_name,
            wage,
            employment_type,
        })
    }
}
