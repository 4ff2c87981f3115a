//! SQLite connection wrapper (one exclusively owned connection per invocation).

use crate::config::Config;
use rusqlite::{Connection, Result};
use std::path::Path;
use std::time::Duration;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        Self::with_busy_timeout(path, Duration::from_millis(5000))
    }

    /// Open the database configured in `cfg`.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::with_busy_timeout(&cfg.database, Duration::from_millis(cfg.busy_timeout_ms))
    }

    /// Open a connection with foreign keys enforced and the given busy timeout,
    /// so that concurrent writers wait for the write lock instead of failing.
    pub fn with_busy_timeout(path: &str, timeout: Duration) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.busy_timeout(timeout)?;
        Ok(Self { conn })
    }
}
