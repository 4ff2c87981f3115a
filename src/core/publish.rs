//! Publish orchestration: the caller side of the replacement writer.
//!
//! The writer itself takes no locks. Holding a per-schedule lock for the
//! whole call is this layer's job, so that at most one replacement per
//! schedule is in flight in this process.

use crate::db::copy::CopyOptions;
use crate::db::pool::DbPool;
use crate::db::replace::replace_assignments;
use crate::errors::AppResult;
use crate::models::assignment::AssignmentRow;
use crate::models::roster::RosterFile;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// One mutex per schedule id, created on first use.
#[derive(Debug, Default, Clone)]
pub struct ScheduleLocks {
    inner: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl ScheduleLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, schedule_id: &str) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.entry(schedule_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the entry of `schedule_id` once nobody else holds or awaits it.
    fn release(&self, schedule_id: &str, m: &Arc<Mutex<()>>) {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        // one reference in the map, one held by the caller
        if Arc::strong_count(m) == 2 {
            map.remove(schedule_id);
        }
    }

    /// Run `f` while holding the lock of `schedule_id`.
    /// A poisoned lock is taken over: the panicking holder's transaction
    /// never committed.
    pub fn with_lock<T>(&self, schedule_id: &str, f: impl FnOnce() -> T) -> T {
        let m = self.entry(schedule_id);
        let out = {
            let _guard = m.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };
        self.release(schedule_id, &m);
        out
    }

    /// Number of schedules currently locked or awaited.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct PublishLogic;

impl PublishLogic {
    /// Publish a roster file for `schedule_id`. Returns the rows written.
    pub fn publish(
        pool: &mut DbPool,
        locks: &ScheduleLocks,
        opts: &CopyOptions,
        schedule_id: &str,
        roster: RosterFile,
    ) -> AppResult<usize> {
        let (rows, metrics) = roster.into_rows(schedule_id)?;
        Self::publish_rows(pool, locks, opts, schedule_id, &rows, &metrics)
    }

    /// Publish already-built rows for `schedule_id` under its lock.
    pub fn publish_rows(
        pool: &mut DbPool,
        locks: &ScheduleLocks,
        opts: &CopyOptions,
        schedule_id: &str,
        rows: &[AssignmentRow],
        metrics: &Value,
    ) -> AppResult<usize> {
        locks.with_lock(schedule_id, || {
            replace_assignments(&mut pool.conn, schedule_id, rows, metrics, opts)
        })
    }
}
