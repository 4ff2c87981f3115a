use crate::db::pool::DbPool;
use crate::db::queries::{get_schedule, load_assignments_as_written};
use crate::errors::{AppError, AppResult};
use crate::models::assignment::StoredAssignment;
use crate::ui::messages::{info, success, warning};
use clap::ValueEnum;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Flat row written by both exporters, in bulk-load column order.
#[derive(Serialize, Clone, Debug)]
pub struct AssignmentExport {
    pub id: String,
    pub schedule_id: String,
    pub staff_id: String,
    pub ward_id: String,
    pub date: String,
    pub slot: String,
    pub shift_type_id: String,
    pub created_at: String,
}

impl From<&StoredAssignment> for AssignmentExport {
    fn from(a: &StoredAssignment) -> Self {
        Self {
            id: a.row.id.clone(),
            schedule_id: a.row.schedule_id.clone(),
            staff_id: a.row.staff_id.clone(),
            ward_id: a.row.ward_id.clone(),
            date: a.row.date_str(),
            slot: a.row.slot.clone(),
            shift_type_id: a.row.shift_type_id.clone(),
            created_at: a.created_at.clone(),
        }
    }
}

pub struct ExportLogic;

impl ExportLogic {
    /// Export the persisted roster of `schedule_id`, rows in the order
    /// they were published.
    ///
    /// - `file`: absolute path of the output file
    /// - `force`: overwrite without asking
    ///
    /// Returns the number of rows written (0 means nothing was exported).
    pub fn export(
        pool: &mut DbPool,
        schedule_id: &str,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        if get_schedule(&pool.conn, schedule_id)?.is_none() {
            return Err(AppError::ScheduleNotFound(schedule_id.to_string()));
        }

        let rows: Vec<AssignmentExport> = load_assignments_as_written(&pool.conn, schedule_id)?
            .iter()
            .map(AssignmentExport::from)
            .collect();

        if rows.is_empty() {
            warning(format!(
                "No assignments stored for schedule {schedule_id}. Nothing to export."
            ));
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        success(format!(
            "{} export completed: {} ({} rows)",
            format.as_str().to_uppercase(),
            path.display(),
            rows.len()
        ));
        Ok(rows.len())
    }
}

/// Check whether the output file may be created or overwritten.
///
/// - file missing → Ok
/// - file present and `force` → Ok
/// - file present otherwise → ask the user
fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "Export cancelled: existing file not overwritten".to_string(),
        ))
    }
}

fn export_json(rows: &[AssignmentExport], path: &Path) -> AppResult<()> {
    let json_data = serde_json::to_string_pretty(rows)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;
    Ok(())
}

fn export_csv(rows: &[AssignmentExport], path: &Path) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    for item in rows {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()?;
    Ok(())
}
