use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetEntry {
    pub id: i64,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetInput {
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

impl TimesheetInput {
    /// Both clock times must parse. End before start is accepted and counts as zero hours.
    pub fn validate(&self) -> Result<(), String> {
        for (label, value) in [("start time", &self.start_time), ("end time", &self.end_time)] {
            if parse_clock_time(value).is_none() {
                return Err(format!("Invalid {}: {:?}, expected HH:MM", label, value));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOutcome {
    Created,
    Updated,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetQuery {
    pub employee_id: Uuid,
    pub date: NaiveDate,
}

pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Hours between two wall-clock times of the same day.
///
/// `None` when either side is missing. Unparseable times and an end before
/// the start both yield `Some(0.0)`.
pub fn worked_hours(start_time: Option<&str>, end_time: Option<&str>) -> Option<f64> {
    let (start, end) = (start_time?, end_time?);
    let hours = match (parse_clock_time(start), parse_clock_time(end)) {
        (Some(start), Some(end)) => (end - start).num_seconds().max(0) as f64 / 3600.0,
        _ => 0.0,
    };
    Some(hours)
}
