use anyhow::Result;
use serde::Deserialize;

use crate::database::{
    models::{Period, SalaryType, WageImportSummary, WageMode},
    repositories::{EmployeeRepository, WageHistoryRepository},
};

/// One line of a wage spreadsheet. The German headers of the legacy export
/// are accepted as well.
#[derive(Debug, Deserialize)]
struct WageImportRecord {
    #[serde(alias = "Mitarbeitername", alias = "name")]
    employee: String,
    #[serde(alias = "Jahr", default)]
    year: Option<i32>,
    #[serde(alias = "Monat", default)]
    month: Option<u32>,
    #[serde(alias = "Gehaltstyp")]
    salary_type: String,
    #[serde(alias = "Stundenlohn/Festgehalt")]
    amount: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedWage {
    pub employee_name: String,
    pub period: Period,
    pub wage: WageMode,
}

#[derive(Clone)]
pub struct WageImportService {
    employees: EmployeeRepository,
    wage_history: WageHistoryRepository,
}

impl WageImportService {
    pub fn new(employees: EmployeeRepository, wage_history: WageHistoryRepository) -> Self {
        Self {
            employees,
            wage_history,
        }
    }

    /// Writes one snapshot per valid line. Bad lines and unknown employees
    /// are reported back without aborting the import.
    pub async fn import(&self, csv_data: &str, default_period: Period) -> Result<WageImportSummary> {
        let (parsed, mut errors) = parse_wage_csv(csv_data, default_period);
        let mut imported = 0;

        for line in parsed {
            let Some(employee) = self.employees.find_by_full_name(&line.employee_name).await? else {
                errors.push(format!("Employee \"{}\" not found", line.employee_name));
                continue;
            };

            if let Err(e) = self
                .wage_history
                .upsert_snapshot(employee.id, line.period, line.wage)
                .await
            {
                log::error!(
                    "Failed to store wage snapshot of {} for {}: {}",
                    line.employee_name,
                    line.period,
                    e
                );
                errors.push(format!(
                    "Employee \"{}\": wage for {} could not be saved",
                    line.employee_name, line.period
                ));
                continue;
            }
            imported += 1;
        }

        log::info!(
            "Wage import finished: {} imported, {} error(s)",
            imported,
            errors.len()
        );
        Ok(WageImportSummary { imported, errors })
    }
}

pub fn parse_wage_csv(csv_data: &str, default_period: Period) -> (Vec<ParsedWage>, Vec<String>) {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_data.trim().as_bytes());

    let mut parsed = Vec::new();
    let mut errors = Vec::new();

    for (index, record) in reader.deserialize::<WageImportRecord>().enumerate() {
        // Header is line 1.
        let line_number = index + 2;
        match record
            .map_err(|e| e.to_string())
            .and_then(|record| parse_record(record, default_period))
        {
            Ok(line) => parsed.push(line),
            Err(message) => errors.push(format!("Line {}: {}", line_number, message)),
        }
    }

    (parsed, errors)
}

fn parse_record(record: WageImportRecord, default_period: Period) -> Result<ParsedWage, String> {
    if record.employee.is_empty() {
        return Err("employee name is missing".to_string());
    }

    let period = Period::new(
        record.year.unwrap_or(default_period.year),
        record.month.unwrap_or(default_period.month),
    )
    .map_err(|e| e.to_string())?;

    let salary_type = parse_salary_type(&record.salary_type)?;
    let amount = parse_amount(&record.amount)?;
    let wage = WageMode::from_columns(salary_type, amount, amount);
    wage.validate()?;

    Ok(ParsedWage {
        employee_name: record.employee,
        period,
        wage,
    })
}

fn parse_salary_type(value: &str) -> Result<SalaryType, String> {
    match value.trim().to_lowercase().as_str() {
        "festgehalt" => Ok(SalaryType::Fixed),
        "stundenlohn" => Ok(SalaryType::Hourly),
        other => other.parse(),
    }
}

/// Accepts `12.5`, `12,50`, `12,50 €/h` and `2000 €`.
pub fn parse_amount(value: &str) -> Result<f64, String> {
    let cleaned: String = value
        .replace("/h", "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '€')
        .collect::<String>()
        .replace(',', ".");

    cleaned
        .parse::<f64>()
        .map_err(|_| format!("invalid amount {:?}", value))
}
