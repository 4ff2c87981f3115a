//! Bulk-load channel for the `assignments` table.
//!
//! Modelled on a `COPY ... FROM STDIN` exchange: a pump thread encodes rows
//! as CSV records and pushes them in chunks over a bounded channel, then
//! signals end-of-stream. The loader runs on the caller's thread (it owns the
//! transaction) and inserts every record through one cached statement.
//!
//! Values are quoted by the CSV rules, so delimiters, quotes and line breaks
//! inside identifiers or slot labels survive the transfer unchanged.

use crate::config::{Config, CreatedAtMode};
use crate::errors::{AppError, AppResult};
use crate::models::assignment::AssignmentRow;
use chrono::{SecondsFormat, Utc};
use crossbeam_channel::{Receiver, Sender, bounded};
use rusqlite::{Connection, params_from_iter};
use std::thread;

/// Destination of a bulk load: a table and its columns, in record order.
#[derive(Debug, Clone, Copy)]
pub struct CopyTarget {
    pub table: &'static str,
    pub columns: &'static [&'static str],
}

impl CopyTarget {
    pub fn insert_sql(&self) -> String {
        let placeholders: Vec<String> = (1..=self.columns.len()).map(|i| format!("?{i}")).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            self.columns.join(", "),
            placeholders.join(", ")
        )
    }
}

pub const ASSIGNMENT_COPY: CopyTarget = CopyTarget {
    table: "assignments",
    columns: &[
        "id",
        "schedule_id",
        "staff_id",
        "ward_id",
        "date",
        "slot",
        "shift_type_id",
        "created_at",
    ],
};

/// Messages travelling from the pump to the loader.
#[derive(Debug)]
pub enum CopyMessage {
    /// One or more complete CSV records.
    Data(Vec<u8>),
    /// End of stream.
    Done,
    /// The sender gave up; the load must fail.
    Fail(String),
}

#[derive(Debug, Clone, Copy)]
pub struct CopyOptions {
    /// Records per `Data` message.
    pub chunk_rows: usize,
    /// `Data` messages buffered before the pump blocks.
    pub channel_capacity: usize,
    pub created_at_mode: CreatedAtMode,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            chunk_rows: 256,
            channel_capacity: 4,
            created_at_mode: CreatedAtMode::PerRow,
        }
    }
}

impl CopyOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            chunk_rows: cfg.copy_chunk_rows.max(1),
            channel_capacity: cfg.copy_channel_capacity.max(1),
            created_at_mode: cfg.created_at_mode,
        }
    }
}

/// Write-time stamp stored in `created_at`.
pub fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Stream `rows` into `assignments` and wait for the transfer to finish.
///
/// Returns the number of records the loader inserted. The pump thread is
/// always joined before returning; if the loader fails first, dropping its
/// receiver makes the pump's next send fail and the pump stops.
pub fn copy_assignments(
    conn: &Connection,
    rows: &[AssignmentRow],
    opts: &CopyOptions,
) -> AppResult<usize> {
    let opts = *opts;
    let (tx, rx) = bounded(opts.channel_capacity.max(1));

    thread::scope(|s| {
        let pump = s.spawn(move || pump_assignments(rows, opts, tx));
        let loaded = copy_in(conn, &ASSIGNMENT_COPY, rx);

        match pump.join() {
            Ok(()) => loaded,
            Err(_) => Err(AppError::Transfer("bulk-load pump panicked".to_string())),
        }
    })
}

/// Producer side: encode rows and push them through `tx`.
fn pump_assignments(rows: &[AssignmentRow], opts: CopyOptions, tx: Sender<CopyMessage>) {
    let batch_stamp = match opts.created_at_mode {
        CreatedAtMode::PerBatch => Some(now_stamp()),
        CreatedAtMode::PerRow => None,
    };

    for chunk in rows.chunks(opts.chunk_rows.max(1)) {
        let msg = match encode_chunk(chunk, batch_stamp.as_deref()) {
            Ok(buf) => CopyMessage::Data(buf),
            Err(reason) => CopyMessage::Fail(reason),
        };
        let failed = matches!(msg, CopyMessage::Fail(_));

        // Loader hung up: it already has its error.
        if tx.send(msg).is_err() || failed {
            return;
        }
    }

    let _ = tx.send(CopyMessage::Done);
}

fn encode_chunk(chunk: &[AssignmentRow], batch_stamp: Option<&str>) -> Result<Vec<u8>, String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    for row in chunk {
        let created_at = match batch_stamp {
            Some(s) => s.to_string(),
            None => now_stamp(),
        };
        let date = row.date_str();

        wtr.write_record([
            row.id.as_str(),
            row.schedule_id.as_str(),
            row.staff_id.as_str(),
            row.ward_id.as_str(),
            date.as_str(),
            row.slot.as_str(),
            row.shift_type_id.as_str(),
            created_at.as_str(),
        ])
        .map_err(|e| format!("cannot encode assignment '{}': {}", row.id, e))?;
    }

    wtr.into_inner()
        .map_err(|e| format!("cannot flush record buffer: {e}"))
}

/// Consumer side: decode records from `rx` and insert them into `target`.
///
/// Fails on a `Fail` message, on a record whose field count differs from
/// the target's column list, on any insert error, and when the stream closes
/// without `Done`.
pub fn copy_in(
    conn: &Connection,
    target: &CopyTarget,
    rx: Receiver<CopyMessage>,
) -> AppResult<usize> {
    let sql = target.insert_sql();
    let mut stmt = conn.prepare_cached(&sql)?;
    let mut loaded = 0usize;

    loop {
        match rx.recv() {
            Ok(CopyMessage::Data(chunk)) => {
                let mut rdr = csv::ReaderBuilder::new()
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(chunk.as_slice());

                for rec in rdr.records() {
                    let rec = rec.map_err(|e| {
                        AppError::Transfer(format!("malformed record #{}: {}", loaded + 1, e))
                    })?;

                    if rec.len() != target.columns.len() {
                        return Err(AppError::Transfer(format!(
                            "malformed record #{}: expected {} fields, got {}",
                            loaded + 1,
                            target.columns.len(),
                            rec.len()
                        )));
                    }

                    stmt.execute(params_from_iter(rec.iter()))?;
                    loaded += 1;
                }
            }
            Ok(CopyMessage::Done) => return Ok(loaded),
            Ok(CopyMessage::Fail(reason)) => return Err(AppError::Transfer(reason)),
            Err(_) => {
                return Err(AppError::Transfer(format!(
                    "stream into '{}' closed after {} records without end-of-copy",
                    target.table, loaded
                )));
            }
        }
    }
}
