use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One staff member bound to one shift slot on one date of a schedule.
///
/// This is the writer's input: `created_at` is not part of it, the
/// bulk-load channel stamps it at transfer time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRow {
    pub id: String,
    pub schedule_id: String,
    pub staff_id: String,
    pub ward_id: String,
    pub date: NaiveDate, // ⇔ assignments.date (TEXT "YYYY-MM-DD")
    pub slot: String,    // "Early", "Late", "Night", ...
    pub shift_type_id: String,
}

impl AssignmentRow {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// An assignment as persisted, with the writer-assigned `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAssignment {
    #[serde(flatten)]
    pub row: AssignmentRow,
    pub created_at: String, // ⇔ assignments.created_at (TEXT, RFC 3339 UTC)
}
