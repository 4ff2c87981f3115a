use crate::cli::parser::{Commands, ScheduleAction};
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    count_assignments, delete_schedule, get_schedule, insert_schedule, list_schedules,
};
use crate::errors::{AppError, AppResult};
use crate::models::schedule::Schedule;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{RESET, color_for_count, color_for_optional_field};
use crate::utils::date;
use crate::utils::table::Table;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

fn metrics_str(s: &Schedule) -> String {
    s.metrics
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "--".to_string())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Schedule { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::from_config(cfg)?;

    match action {
        ScheduleAction::Add { id, ward, from, to } => {
            let start =
                date::parse_date(from).ok_or_else(|| AppError::InvalidDate(from.clone()))?;
            let end = date::parse_date(to).ok_or_else(|| AppError::InvalidDate(to.clone()))?;

            insert_schedule(&pool.conn, id, ward, start, end)?;
            ttlog(
                &pool.conn,
                "schedule_add",
                id,
                &format!("Ward {} from {} to {}", ward, start, end),
            )?;
            success(format!(
                "Schedule {} added ({} days).",
                id,
                date::horizon_len(start, end)
            ));
        }

        ScheduleAction::List => {
            let schedules = list_schedules(&pool.conn)?;
            if schedules.is_empty() {
                info("No schedules defined.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "WARD", "FROM", "TO", "ROWS", "METRICS"])
                .with_separator(&cfg.separator_char);
            for s in &schedules {
                let rows = count_assignments(&pool.conn, &s.id)?;
                table.add_row(vec![
                    s.id.clone(),
                    s.ward_id.clone(),
                    s.start_date.to_string(),
                    s.end_date.to_string(),
                    rows.to_string(),
                    metrics_str(s),
                ]);
            }
            print!("{}", table.render());
        }

        ScheduleAction::Show { id } => {
            let s = get_schedule(&pool.conn, id)?
                .ok_or_else(|| AppError::ScheduleNotFound(id.clone()))?;
            let rows = count_assignments(&pool.conn, id)?;
            let days = date::horizon_len(s.start_date, s.end_date);
            let metrics = metrics_str(&s);

            println!("\n=== Schedule {} ===", s.id);
            println!("Ward:     {}", s.ward_id);
            println!("Horizon:  {} → {} ({} days)", s.start_date, s.end_date, days);
            println!(
                "Rows:     {}{}{}",
                color_for_count(rows),
                rows,
                RESET
            );
            println!(
                "Metrics:  {}{}{}",
                color_for_optional_field(Some(&metrics)),
                metrics,
                RESET
            );
            println!("Created:  {}", s.created_at);
        }

        ScheduleAction::Del { id, yes } => {
            if get_schedule(&pool.conn, id)?.is_none() {
                return Err(AppError::ScheduleNotFound(id.clone()));
            }

            let prompt = format!(
                "Delete schedule {} and its whole roster? This action is irreversible.",
                id
            );
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            let removed = count_assignments(&pool.conn, id)?;
            delete_schedule(&pool.conn, id)?;
            ttlog(
                &pool.conn,
                "schedule_del",
                id,
                &format!("Deleted with {} assignments", removed),
            )?;
            success(format!("Schedule {} has been deleted.", id));
        }
    }

    Ok(())
}
