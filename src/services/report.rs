use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use uuid::Uuid;

use crate::database::{
    models::{
        DayReport, EmployeeReport, MonthlyReport, Period, ReportRow, TimeRange, WageMode,
        WageModeTotals, WageSource, display_name, worked_hours,
    },
    repositories::{ReportRepository, WageHistoryRepository},
};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("wage history backfill failed: {0:#}")]
    Backfill(anyhow::Error),
    #[error("report query failed: {0:#}")]
    Query(anyhow::Error),
}

impl ReportError {
    pub fn stage(&self) -> &'static str {
        match self {
            ReportError::Backfill(_) => "wage history could not be completed",
            ReportError::Query(_) => "timesheets could not be read",
        }
    }
}

/// Builds monthly reports in two steps: make sure every employee with
/// activity has a wage snapshot for the month, then read and reduce.
#[derive(Clone)]
pub struct ReportService {
    wage_history: WageHistoryRepository,
    reports: ReportRepository,
}

impl ReportService {
    pub fn new(wage_history: WageHistoryRepository, reports: ReportRepository) -> Self {
        Self {
            wage_history,
            reports,
        }
    }

    pub async fn ensure_wage_coverage(&self, period: Period) -> Result<u64, ReportError> {
        let inserted = self
            .wage_history
            .backfill_month(period)
            .await
            .map_err(ReportError::Backfill)?;

        if inserted > 0 {
            log::info!(
                "Backfilled {} wage snapshot(s) for {} from current wages",
                inserted,
                period
            );
        }
        Ok(inserted)
    }

    pub async fn monthly_report(&self, period: Period) -> Result<MonthlyReport, ReportError> {
        self.ensure_wage_coverage(period).await?;

        let rows = self
            .reports
            .fetch_month_rows(period)
            .await
            .map_err(ReportError::Query)?;

        Ok(aggregate_report(period, rows))
    }

    /// Month of a single employee, `None` if the employee does not exist.
    pub async fn employee_month(
        &self,
        employee_id: Uuid,
        period: Period,
    ) -> Result<Option<EmployeeReport>, ReportError> {
        let report = self.monthly_report(period).await?;
        Ok(report
            .employees
            .into_iter()
            .find(|employee| employee.id == employee_id))
    }
}

/// Reduces joined rows into the report. Pure: the same rows always give
/// the same report.
pub fn aggregate_report(period: Period, rows: Vec<ReportRow>) -> MonthlyReport {
    let mut employees: Vec<EmployeeReport> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for row in rows {
        let position = *index.entry(row.employee_id).or_insert_with(|| {
            employees.push(new_employee_report(&row));
            employees.len() - 1
        });
        let employee = &mut employees[position];

        let (Some(date), Some(start_time), Some(end_time)) = (row.date, row.start_time, row.end_time)
        else {
            continue;
        };
        let Some(hours) = worked_hours(Some(&start_time), Some(&end_time)) else {
            continue;
        };
        if !period.contains(date) {
            log::warn!(
                "Ignoring timesheet dated {} outside of {} for employee {}",
                date,
                period,
                employee.id
            );
            continue;
        }

        let day = employee.days.entry(date).or_insert_with(|| DayReport {
            hours: 0.0,
            start_time: start_time.clone(),
            end_time: end_time.clone(),
            entries: Vec::new(),
        });
        day.hours += hours;
        day.end_time = end_time.clone();
        day.entries.push(TimeRange {
            start_time,
            end_time,
            hours,
        });
        employee.total_hours += hours;
    }

    let mut totals_by_mode = WageModeTotals::default();
    let mut totals_by_category: BTreeMap<String, f64> = BTreeMap::new();
    let mut total_hours = 0.0;

    for employee in &mut employees {
        let wage = employee.wage();
        employee.total_wage = wage.total_wage(employee.total_hours);

        match wage {
            WageMode::Hourly { .. } => totals_by_mode.hourly += employee.total_wage,
            WageMode::Fixed { .. } => totals_by_mode.fixed += employee.total_wage,
        }
        *totals_by_category
            .entry(employee.employment_type.clone())
            .or_insert(0.0) += employee.total_wage;
        total_hours += employee.total_hours;
    }

    employees.sort_by(|a, b| {
        (&a.first_name, &a.last_name, a.id).cmp(&(&b.first_name, &b.last_name, b.id))
    });

    MonthlyReport {
        year: period.year,
        month: period.month,
        employees,
        total_hours,
        total_wage: totals_by_mode.hourly + totals_by_mode.fixed,
        total_wage_by_wage_mode: totals_by_mode,
        total_wage_by_category: totals_by_category,
    }
}

fn new_employee_report(row: &ReportRow) -> EmployeeReport {
    let wage = WageMode::from_columns(row.salary_type, row.hourly_wage, row.fixed_salary);
    let wage_source = if row.from_history {
        WageSource::History
    } else {
        log::debug!(
            "No wage snapshot for employee {}, using current wage",
            row.employee_id
        );
        WageSource::Current
    };

    EmployeeReport {
        id: row.employee_id,
        name: display_name(&row.first_name, &row.last_name),
        first_name: row.first_name.clone(),
        last_name: row.last_name.clone(),
        wage_mode: wage.salary_type(),
        rate_or_amount: wage.rate_or_amount(),
        employment_type: row.employment_type.clone(),
        wage_source,
        days: BTreeMap::new(),
        total_hours: 0.0,
        total_wage: 0.0,
    }
}
