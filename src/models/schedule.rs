use super::assignment::StoredAssignment;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

/// A rostering horizon for one ward.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: String,
    pub ward_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Opaque roster summary, `None` until the first publish.
    pub metrics: Option<Value>,
    pub created_at: String,
}

/// Rows and metrics of one schedule, read from the same committed state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleState {
    pub schedule_id: String,
    pub assignments: Vec<StoredAssignment>,
    pub metrics: Option<Value>,
}

impl ScheduleState {
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
