use anyhow::Result;

use crate::config::Config;
use crate::database::models::{NewEmployee, Period, WageMode};
use crate::database::repositories::EmployeeRepository;

const DEMO_EMPLOYEES: [(&str, &str); 4] = [
    ("Anna", "Berg"),
    ("Marco", "Rossi"),
    ("Lisa", "Wagner"),
    ("Tom", "Keller"),
];

/// Inserts a handful of demo employees into an empty database.
///
/// Returns the number of employees created; nothing happens once any employee exists.
pub async fn seed_demo_employees(repo: &EmployeeRepository, config: &Config) -> Result<usize> {
    if repo.count_employees().await? > 0 {
        return Ok(0);
    }

    let period = Period::current();
    for (first_name, last_name) in DEMO_EMPLOYEES {
        let employee = repo
            .create_employee(
                NewEmployee {
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    wage: WageMode::Hourly {
                        rate: config.default_hourly_wage,
                    },
                    employment_type: config.default_employment_type.clone(),
                },
                period,
            )
            .await?;
        log::info!(
            "Demo employee {} created (link token {})",
            employee.display_name(),
            employee.link_token
        );
    }

    Ok(DEMO_EMPLOYEES.len())
}
