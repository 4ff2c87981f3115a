use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::load_schedule_state;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::table::Table;

/// Print the persisted roster of a schedule.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Roster { schedule, json } = cmd {
        let pool = DbPool::from_config(cfg)?;
        let state = load_schedule_state(&pool.conn, schedule)?;

        if *json {
            let out = serde_json::to_string_pretty(&state)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
            return Ok(());
        }

        let metrics = state
            .metrics
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "--".to_string());

        println!("\n=== Roster {} ===", state.schedule_id);
        println!("Metrics: {}\n", metrics);

        if state.is_empty() {
            info(format!("No assignments stored for schedule {}.", schedule));
            return Ok(());
        }

        let mut table = Table::new(&["DATE", "SLOT", "STAFF", "WARD", "SHIFT", "ID"])
            .with_separator(&cfg.separator_char);
        for a in &state.assignments {
            table.add_row(vec![
                a.row.date_str(),
                a.row.slot.clone(),
                a.row.staff_id.clone(),
                a.row.ward_id.clone(),
                a.row.shift_type_id.clone(),
                a.row.id.clone(),
            ]);
        }
        print!("{}", table.render());
        println!("{} assignments", state.assignments.len());
    }
    Ok(())
}
