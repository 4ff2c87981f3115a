use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::publish::{PublishLogic, ScheduleLocks};
use crate::db::copy::CopyOptions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::roster::RosterFile;
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;

/// Publish a computed roster file for one schedule.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Publish { schedule, file } = cmd {
        let path = expand_tilde(file);
        let roster = RosterFile::load(&path)?;
        info(format!(
            "Publishing {} assignments to schedule {}…",
            roster.assignments.len(),
            schedule
        ));

        let mut pool = DbPool::from_config(cfg)?;
        let locks = ScheduleLocks::new();
        let opts = CopyOptions::from_config(cfg);

        let written = PublishLogic::publish(&mut pool, &locks, &opts, schedule, roster)?;

        success(format!(
            "Schedule {} published: {} assignments stored.",
            schedule, written
        ));
    }
    Ok(())
}
