use chrono::NaiveTime;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftType {
    pub id: String,
    pub name: String,
    pub slot: String,
    pub start_time: Option<NaiveTime>, // ⇔ shift_types.start_time (TEXT "HH:MM")
    pub end_time: Option<NaiveTime>,
}

impl ShiftType {
    /// "07:00-15:00", or "--:--" for the missing ends.
    pub fn hours(&self) -> String {
        let fmt = |t: Option<NaiveTime>| {
            t.map(|t| t.format("%H:%M").to_string())
                .unwrap_or_else(|| "--:--".to_string())
        };
        format!("{}-{}", fmt(self.start_time), fmt(self.end_time))
    }
}
