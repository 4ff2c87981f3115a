use crate::errors::{AppError, AppResult};
use crate::models::assignment::{AssignmentRow, StoredAssignment};
use crate::models::schedule::{Schedule, ScheduleState};
use crate::models::shift_type::ShiftType;
use crate::models::staff::Staff;
use crate::models::ward::Ward;
use chrono::{NaiveDate, NaiveTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use serde_json::Value;

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn get_date(row: &Row, col: &str) -> Result<NaiveDate> {
    let s: String = row.get(col)?;
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| conversion_error(0, AppError::InvalidDate(s)))
}

fn get_time(row: &Row, col: &str) -> Result<Option<NaiveTime>> {
    let s: Option<String> = row.get(col)?;
    match s {
        None => Ok(None),
        Some(s) => NaiveTime::parse_from_str(&s, "%H:%M")
            .map(Some)
            .map_err(|_| conversion_error(0, AppError::InvalidTime(s))),
    }
}

fn get_metrics(row: &Row, col: &str) -> Result<Option<Value>> {
    let s: Option<String> = row.get(col)?;
    match s {
        None => Ok(None),
        Some(s) => serde_json::from_str(&s)
            .map(Some)
            .map_err(|e| conversion_error(0, AppError::Other(format!("invalid metrics: {e}")))),
    }
}

// ── Wards ──────────────────────────────────────────────────────────

pub fn insert_ward(conn: &Connection, ward: &Ward) -> AppResult<()> {
    conn.execute(
        "INSERT INTO wards (id, name) VALUES (?1, ?2)",
        params![ward.id, ward.name],
    )?;
    Ok(())
}

pub fn list_wards(conn: &Connection) -> AppResult<Vec<Ward>> {
    let mut stmt = conn.prepare("SELECT id, name FROM wards ORDER BY id ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(Ward {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ── Staff ──────────────────────────────────────────────────────────

pub fn insert_staff(conn: &Connection, staff: &Staff) -> AppResult<()> {
    conn.execute(
        "INSERT INTO staff (id, name, ward_id) VALUES (?1, ?2, ?3)",
        params![staff.id, staff.name, staff.ward_id],
    )?;
    Ok(())
}

pub fn list_staff(conn: &Connection) -> AppResult<Vec<Staff>> {
    let mut stmt = conn.prepare("SELECT id, name, ward_id FROM staff ORDER BY id ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(Staff {
            id: row.get("id")?,
            name: row.get("name")?,
            ward_id: row.get("ward_id")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ── Shift types ────────────────────────────────────────────────────

pub fn insert_shift_type(conn: &Connection, st: &ShiftType) -> AppResult<()> {
    conn.execute(
        "INSERT INTO shift_types (id, name, slot, start_time, end_time)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            st.id,
            st.name,
            st.slot,
            st.start_time.map(|t| t.format("%H:%M").to_string()),
            st.end_time.map(|t| t.format("%H:%M").to_string()),
        ],
    )?;
    Ok(())
}

pub fn list_shift_types(conn: &Connection) -> AppResult<Vec<ShiftType>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, slot, start_time, end_time FROM shift_types ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(ShiftType {
            id: row.get("id")?,
            name: row.get("name")?,
            slot: row.get("slot")?,
            start_time: get_time(row, "start_time")?,
            end_time: get_time(row, "end_time")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ── Schedules ──────────────────────────────────────────────────────

fn map_schedule(row: &Row) -> Result<Schedule> {
    Ok(Schedule {
        id: row.get("id")?,
        ward_id: row.get("ward_id")?,
        start_date: get_date(row, "start_date")?,
        end_date: get_date(row, "end_date")?,
        metrics: get_metrics(row, "metrics")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert a new schedule without metrics.
pub fn insert_schedule(
    conn: &Connection,
    id: &str,
    ward_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<()> {
    if start > end {
        return Err(AppError::InvalidDate(format!(
            "schedule starts after it ends: {start} > {end}"
        )));
    }

    conn.execute(
        "INSERT INTO schedules (id, ward_id, start_date, end_date, metrics, created_at)
         VALUES (?1, ?2, ?3, ?4, NULL, ?5)",
        params![
            id,
            ward_id,
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string(),
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn get_schedule(conn: &Connection, id: &str) -> AppResult<Option<Schedule>> {
    let mut stmt = conn.prepare(
        "SELECT id, ward_id, start_date, end_date, metrics, created_at
         FROM schedules WHERE id = ?1",
    )?;
    Ok(stmt.query_row([id], map_schedule).optional()?)
}

pub fn list_schedules(conn: &Connection) -> AppResult<Vec<Schedule>> {
    let mut stmt = conn.prepare(
        "SELECT id, ward_id, start_date, end_date, metrics, created_at
         FROM schedules ORDER BY start_date ASC, id ASC",
    )?;
    let rows = stmt.query_map([], map_schedule)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Delete a schedule; its assignments go with it (ON DELETE CASCADE).
pub fn delete_schedule(conn: &Connection, id: &str) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM schedules WHERE id = ?1", [id])?)
}

pub fn load_metrics(conn: &Connection, schedule_id: &str) -> AppResult<Option<Value>> {
    let metrics: Option<Option<Value>> = conn
        .query_row(
            "SELECT metrics FROM schedules WHERE id = ?1",
            [schedule_id],
            |row| get_metrics(row, "metrics"),
        )
        .optional()?;

    metrics.ok_or_else(|| AppError::ScheduleNotFound(schedule_id.to_string()))
}

// ── Assignments ────────────────────────────────────────────────────

pub fn map_assignment(row: &Row) -> Result<StoredAssignment> {
    Ok(StoredAssignment {
        row: AssignmentRow {
            id: row.get("id")?,
            schedule_id: row.get("schedule_id")?,
            staff_id: row.get("staff_id")?,
            ward_id: row.get("ward_id")?,
            date: get_date(row, "date")?,
            slot: row.get("slot")?,
            shift_type_id: row.get("shift_type_id")?,
        },
        created_at: row.get("created_at")?,
    })
}

/// Persisted rows of a schedule, ordered by date, slot and id.
pub fn load_assignments(conn: &Connection, schedule_id: &str) -> AppResult<Vec<StoredAssignment>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, schedule_id, staff_id, ward_id, date, slot, shift_type_id, created_at
         FROM assignments
         WHERE schedule_id = ?1
         ORDER BY date ASC, slot ASC, id ASC",
    )?;
    let rows = stmt.query_map([schedule_id], map_assignment)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Persisted rows of a schedule in the order the writer received them.
pub fn load_assignments_as_written(
    conn: &Connection,
    schedule_id: &str,
) -> AppResult<Vec<StoredAssignment>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, schedule_id, staff_id, ward_id, date, slot, shift_type_id, created_at
         FROM assignments
         WHERE schedule_id = ?1
         ORDER BY rowid ASC",
    )?;
    let rows = stmt.query_map([schedule_id], map_assignment)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_assignments(conn: &Connection, schedule_id: &str) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM assignments WHERE schedule_id = ?1",
        [schedule_id],
        |row| row.get(0),
    )?)
}

/// Rows and metrics of a schedule read inside one transaction, so both
/// come from the same committed replacement.
pub fn load_schedule_state(conn: &Connection, schedule_id: &str) -> AppResult<ScheduleState> {
    let tx = conn.unchecked_transaction()?;
    let metrics = load_metrics(&tx, schedule_id)?;
    let assignments = load_assignments(&tx, schedule_id)?;
    tx.commit()?;

    Ok(ScheduleState {
        schedule_id: schedule_id.to_string(),
        assignments,
        metrics,
    })
}
