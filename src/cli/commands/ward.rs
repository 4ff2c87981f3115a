use crate::cli::parser::{Commands, WardAction};
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_ward, list_wards};
use crate::errors::AppResult;
use crate::models::ward::Ward;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Ward { action } = cmd {
        let pool = DbPool::from_config(cfg)?;

        match action {
            WardAction::Add { id, name } => {
                insert_ward(
                    &pool.conn,
                    &Ward {
                        id: id.clone(),
                        name: name.clone(),
                    },
                )?;
                ttlog(&pool.conn, "ward_add", id, name)?;
                success(format!("Ward {} added.", id));
            }
            WardAction::List => {
                let wards = list_wards(&pool.conn)?;
                if wards.is_empty() {
                    info("No wards defined.");
                    return Ok(());
                }

                let mut table = Table::new(&["ID", "NAME"]).with_separator(&cfg.separator_char);
                for w in wards {
                    table.add_row(vec![w.id, w.name]);
                }
                print!("{}", table.render());
            }
        }
    }
    Ok(())
}
