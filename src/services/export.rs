use anyhow::{Context, Result};

use crate::database::models::{Employee, EmployeeReport, MonthlyReport, Period, WageMode};

/// Prepended to CSV downloads so spreadsheet tools pick UTF-8.
pub const CSV_BOM: &str = "\u{FEFF}";

pub fn report_filename(period: Period) -> String {
    format!("InnTime_Report_{}.csv", period.date_prefix())
}

pub fn employees_filename() -> &'static str {
    "InnTime_Employees.csv"
}

/// One row per employee: name, wage mode, rate/amount, work days, per-day
/// detail, total hours, total wage.
pub fn monthly_report_csv(report: &MonthlyReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Employee",
        "Wage mode",
        "Rate/Amount",
        "Work days",
        "Hours detail",
        "Total hours",
        "Total wage",
    ])?;

    for employee in &report.employees {
        writer.write_record([
            employee.name.clone(),
            wage_mode_label(&employee.wage()).to_string(),
            rate_label(&employee.wage()),
            employee.work_days().to_string(),
            day_details(employee),
            format!("{:.2}", employee.total_hours),
            format!("{:.2}", employee.total_wage),
        ])?;
    }

    into_string(writer)
}

pub fn employees_csv(employees: &[Employee]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "id",
        "first_name",
        "last_name",
        "salary_type",
        "hourly_wage",
        "fixed_salary",
        "employment_type",
    ])?;

    for employee in employees {
        let (salary_type, hourly_wage, fixed_salary) = employee.wage.to_columns();
        writer.write_record([
            employee.id.to_string(),
            employee.first_name.clone(),
            employee.last_name.clone(),
            salary_type.to_string(),
            format!("{:.2}", hourly_wage),
            format!("{:.2}", fixed_salary),
            employee.employment_type.clone(),
        ])?;
    }

    into_string(writer)
}

pub fn wage_mode_label(wage: &WageMode) -> &'static str {
    match wage {
        WageMode::Hourly { .. } => "Hourly",
        WageMode::Fixed { .. } => "Fixed",
    }
}

pub fn rate_label(wage: &WageMode) -> String {
    match *wage {
        WageMode::Hourly { rate } => format!("{:.2} €/h", rate),
        WageMode::Fixed { amount } => format!("{:.2} €", amount),
    }
}

/// `2024-03-01: 4.00h (08:00-12:00); 2024-03-02: ...`
pub fn day_details(employee: &EmployeeReport) -> String {
    employee
        .days
        .iter()
        .map(|(date, day)| {
            let ranges = day
                .entries
                .iter()
                .map(|range| format!("{}-{}", range.start_time, range.end_time))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {:.2}h ({})", date, day.hours, ranges)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}
