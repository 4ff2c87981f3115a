//! Unified application error type.
//! All modules (db, core, cli) return AppError so that the writer's
//! failures reach the caller unchanged and the CLI can report them in one place.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    /// COMMIT failed: the persisted state is indeterminate.
    #[error("Commit failed, persisted state is indeterminate: {0}")]
    Commit(rusqlite::Error),

    /// The original failure plus the failure of the rollback that followed it.
    #[error("{cause} (rollback also failed: {rollback})")]
    Rollback {
        cause: Box<AppError>,
        rollback: rusqlite::Error,
    },

    // ---------------------------
    // Bulk-load transfer
    // ---------------------------
    #[error("Bulk-load transfer failed: {0}")]
    Transfer(String),

    // ---------------------------
    // Roster / schedule errors
    // ---------------------------
    #[error("Schedule not found: {0}")]
    ScheduleNotFound(String),

    #[error("Assignment '{row_id}' belongs to schedule '{found}', expected '{expected}'")]
    ScheduleMismatch {
        row_id: String,
        expected: String,
        found: String,
    },

    #[error("Invalid roster file: {0}")]
    InvalidRoster(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True when the underlying SQLite error is a constraint violation
    /// (foreign key, unique, not null, check).
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            AppError::Db(rusqlite::Error::SqliteFailure(e, _)) => {
                e.code == rusqlite::ErrorCode::ConstraintViolation
            }
            AppError::Rollback { cause, .. } => cause.is_constraint_violation(),
            _ => false,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
