use crate::cli::parser::{Commands, ShiftTypeAction};
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_shift_type, list_shift_types};
use crate::errors::AppResult;
use crate::models::shift_type::ShiftType;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;
use crate::utils::time::parse_optional_time;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::ShiftType { action } = cmd {
        let pool = DbPool::from_config(cfg)?;

        match action {
            ShiftTypeAction::Add {
                id,
                name,
                slot,
                start,
                end,
            } => {
                let st = ShiftType {
                    id: id.clone(),
                    name: name.clone(),
                    slot: slot.clone(),
                    start_time: parse_optional_time(start.as_ref())?,
                    end_time: parse_optional_time(end.as_ref())?,
                };
                insert_shift_type(&pool.conn, &st)?;
                ttlog(
                    &pool.conn,
                    "shift_type_add",
                    id,
                    &format!("{} [{}] {}", name, slot, st.hours()),
                )?;
                success(format!("Shift type {} added.", id));
            }
            ShiftTypeAction::List => {
                let types = list_shift_types(&pool.conn)?;
                if types.is_empty() {
                    info("No shift types defined.");
                    return Ok(());
                }

                let mut table = Table::new(&["ID", "NAME", "SLOT", "HOURS"])
                    .with_separator(&cfg.separator_char);
                for t in types {
                    let hours = t.hours();
                    table.add_row(vec![t.id, t.name, t.slot, hours]);
                }
                print!("{}", table.render());
            }
        }
    }
    Ok(())
}
