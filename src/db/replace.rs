//! Assignment replacement writer.
//!
//! Replaces every stored assignment of a schedule with a freshly computed
//! set and stamps the schedule's metrics, all in one transaction:
//!
//! 1. `BEGIN IMMEDIATE`
//! 2. delete the schedule's rows (unconditionally)
//! 3. bulk-load the new rows, unless there are none
//! 4. update `schedules.metrics`
//! 5. `COMMIT`
//!
//! Any failure before the commit rolls everything back and the original
//! error reaches the caller unchanged. Callers must not run two
//! replacements of the same schedule at once (see `core::publish`).

use crate::db::copy::{CopyOptions, copy_assignments};
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::models::assignment::AssignmentRow;
use crate::ui::messages::error;
use rusqlite::{Connection, Transaction, TransactionBehavior, params};
use serde_json::Value;

/// Atomically replace the assignments of `schedule_id` with `rows` and
/// store `metrics` on the schedule. Returns the number of rows written.
pub fn replace_assignments(
    conn: &mut Connection,
    schedule_id: &str,
    rows: &[AssignmentRow],
    metrics: &Value,
    opts: &CopyOptions,
) -> AppResult<usize> {
    // Checked before anything is touched.
    if let Some(stray) = rows.iter().find(|r| r.schedule_id != schedule_id) {
        return Err(AppError::ScheduleMismatch {
            row_id: stray.id.clone(),
            expected: schedule_id.to_string(),
            found: stray.schedule_id.clone(),
        });
    }

    let metrics_json = serde_json::to_string(metrics)
        .map_err(|e| AppError::Other(format!("cannot serialize metrics: {e}")))?;

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let outcome = write_in_tx(&tx, schedule_id, rows, &metrics_json, opts);
    finish(tx, outcome)
}

fn write_in_tx(
    tx: &Transaction<'_>,
    schedule_id: &str,
    rows: &[AssignmentRow],
    metrics_json: &str,
    opts: &CopyOptions,
) -> AppResult<usize> {
    let removed = tx.execute(
        "DELETE FROM assignments WHERE schedule_id = ?1",
        [schedule_id],
    )?;

    let written = if rows.is_empty() {
        0
    } else {
        let loaded = copy_assignments(tx, rows, opts)?;
        if loaded != rows.len() {
            return Err(AppError::Transfer(format!(
                "loaded {} of {} assignments",
                loaded,
                rows.len()
            )));
        }
        loaded
    };

    let updated = tx.execute(
        "UPDATE schedules SET metrics = ?1 WHERE id = ?2",
        params![metrics_json, schedule_id],
    )?;
    if updated == 0 {
        return Err(AppError::ScheduleNotFound(schedule_id.to_string()));
    }

    ttlog(
        tx,
        "replace",
        schedule_id,
        &format!("Replaced {removed} assignments with {written}"),
    )?;

    Ok(written)
}

/// Commit on success, roll back on failure.
fn finish<T>(tx: Transaction<'_>, outcome: AppResult<T>) -> AppResult<T> {
    match outcome {
        Ok(value) => {
            tx.commit().map_err(AppError::Commit)?;
            Ok(value)
        }
        Err(cause) => Err(abort(tx, cause)),
    }
}

/// Roll back after `cause`. A failing rollback is reported, never dropped.
fn abort(tx: Transaction<'_>, cause: AppError) -> AppError {
    match tx.rollback() {
        Ok(()) => cause,
        Err(rollback) => {
            error(format!("Rollback failed after '{cause}': {rollback}"));
            AppError::Rollback {
                cause: Box::new(cause),
                rollback,
            }
        }
    }
}
