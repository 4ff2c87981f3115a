use crate::cli::parser::{Commands, StaffAction};
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_staff, list_staff};
use crate::errors::AppResult;
use crate::models::staff::Staff;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Staff { action } = cmd {
        let pool = DbPool::from_config(cfg)?;

        match action {
            StaffAction::Add { id, name, ward } => {
                insert_staff(
                    &pool.conn,
                    &Staff {
                        id: id.clone(),
                        name: name.clone(),
                        ward_id: ward.clone(),
                    },
                )?;
                ttlog(&pool.conn, "staff_add", id, name)?;
                success(format!("Staff member {} added.", id));
            }
            StaffAction::List => {
                let staff = list_staff(&pool.conn)?;
                if staff.is_empty() {
                    info("No staff members defined.");
                    return Ok(());
                }

                let mut table =
                    Table::new(&["ID", "NAME", "WARD"]).with_separator(&cfg.separator_char);
                for s in staff {
                    table.add_row(vec![s.id, s.name, s.ward_id.unwrap_or_else(|| "--".into())]);
                }
                print!("{}", table.render());
            }
        }
    }
    Ok(())
}
