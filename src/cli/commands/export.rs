use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        schedule,
        format,
        file,
        force,
    } = cmd
    {
        let mut pool = DbPool::from_config(cfg)?;
        ExportLogic::export(&mut pool, schedule, *format, file, *force)?;
    }
    Ok(())
}
