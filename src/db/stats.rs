use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, table: &str) -> rusqlite::Result<i64> {
    pool.conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TABLE COUNTS
    //
    for (label, table) in [
        ("Wards", "wards"),
        ("Staff", "staff"),
        ("Shift types", "shift_types"),
        ("Schedules", "schedules"),
        ("Assignments", "assignments"),
    ] {
        let n = count(pool, table)?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, n, RESET);
    }

    //
    // 3) HORIZON COVERED BY SCHEDULES
    //
    let range: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row(
            "SELECT MIN(start_date), MAX(end_date) FROM schedules",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (first, last) = range.unwrap_or((None, None));
    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Horizon:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE ASSIGNMENTS/SCHEDULE
    //
    let schedules = count(pool, "schedules")?;
    if schedules > 0 {
        let avg = count(pool, "assignments")? as f64 / schedules as f64;
        println!("{}• Average assignments/schedule:{} {:.2}", CYAN, RESET, avg);
    }

    //
    // 5) SCHEMA VERSION
    //
    let versions = applied_versions(&pool.conn)?;
    match versions.last() {
        Some(latest) => println!(
            "{}• Migrations:{} {} (latest {})",
            CYAN,
            RESET,
            versions.len(),
            latest
        ),
        None => println!("{}• Migrations:{} {}none{}", CYAN, RESET, GREY, RESET),
    }

    println!();
    Ok(())
}
