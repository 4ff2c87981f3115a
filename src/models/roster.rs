//! Roster files produced by the scheduling engine.
//!
//! ```json
//! {
//!   "metrics": { "coverage": 0.92 },
//!   "assignments": [
//!     { "staffId": "N1", "wardId": "W1", "shiftTypeId": "E",
//!       "date": "2025-03-01", "slot": "Early" }
//!   ]
//! }
//! ```

use super::assignment::AssignmentRow;
use crate::errors::{AppError, AppResult};
use crate::utils::date;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct RosterFile {
    #[serde(default)]
    pub metrics: Value,
    #[serde(default)]
    pub assignments: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: Option<String>,
    pub schedule_id: Option<String>,
    pub staff_id: String,
    pub ward_id: String,
    pub shift_type_id: String,
    pub date: String,
    pub slot: String,
}

impl RosterFile {
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> AppResult<Self> {
        serde_json::from_str(content).map_err(|e| AppError::InvalidRoster(e.to_string()))
    }

    /// Turn the file entries into writer rows for `schedule_id`.
    ///
    /// Missing ids get a fresh UUID, missing schedule ids default to the
    /// target. An entry naming another schedule is kept as-is so the writer
    /// can reject the batch.
    pub fn into_rows(self, schedule_id: &str) -> AppResult<(Vec<AssignmentRow>, Value)> {
        let mut rows = Vec::with_capacity(self.assignments.len());

        for (i, entry) in self.assignments.into_iter().enumerate() {
            let d = date::parse_date(&entry.date).ok_or_else(|| {
                AppError::InvalidRoster(format!(
                    "assignment #{}: invalid date '{}'",
                    i + 1,
                    entry.date
                ))
            })?;

            if entry.slot.trim().is_empty() {
                return Err(AppError::InvalidRoster(format!(
                    "assignment #{}: empty slot",
                    i + 1
                )));
            }

            rows.push(AssignmentRow {
                id: entry.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                schedule_id: entry
                    .schedule_id
                    .unwrap_or_else(|| schedule_id.to_string()),
                staff_id: entry.staff_id,
                ward_id: entry.ward_id,
                date: d,
                slot: entry.slot,
                shift_type_id: entry.shift_type_id,
            });
        }

        Ok((rows, self.metrics))
    }
}
