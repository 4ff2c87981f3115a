use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// A schema step, recorded in `log` as `migration_applied` once run.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_reference_tables",
        description: "Created wards, staff and shift_types tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS wards (
            id    TEXT PRIMARY KEY NOT NULL,
            name  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS staff (
            id       TEXT PRIMARY KEY NOT NULL,
            name     TEXT NOT NULL,
            ward_id  TEXT REFERENCES wards(id)
        );

        CREATE TABLE IF NOT EXISTS shift_types (
            id          TEXT PRIMARY KEY NOT NULL,
            name        TEXT NOT NULL,
            slot        TEXT NOT NULL,
            start_time  TEXT,
            end_time    TEXT
        );
        "#,
    },
    Migration {
        version: "20250301_0002_create_schedules",
        description: "Created schedules table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id          TEXT PRIMARY KEY NOT NULL,
            ward_id     TEXT NOT NULL REFERENCES wards(id),
            start_date  TEXT NOT NULL,
            end_date    TEXT NOT NULL,
            metrics     TEXT,
            created_at  TEXT NOT NULL,
            CHECK (start_date <= end_date)
        );
        "#,
    },
    Migration {
        version: "20250301_0003_create_assignments",
        description: "Created assignments table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS assignments (
            id             TEXT PRIMARY KEY NOT NULL,
            schedule_id    TEXT NOT NULL REFERENCES schedules(id) ON DELETE CASCADE,
            staff_id       TEXT NOT NULL REFERENCES staff(id),
            ward_id        TEXT NOT NULL REFERENCES wards(id),
            date           TEXT NOT NULL,
            slot           TEXT NOT NULL,
            shift_type_id  TEXT NOT NULL REFERENCES shift_types(id),
            created_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_assignments_schedule ON assignments(schedule_id);
        "#,
    },
    Migration {
        version: "20250412_0004_index_assignments_staff_date",
        description: "Added staff/date index on assignments",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_assignments_staff_date ON assignments(staff_id, date);
        "#,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions already recorded in the log, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    // Each step and its log marker commit together.
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;
    tx.commit()?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Returns the number of migrations applied by this call.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        applied += 1;
    }

    Ok(applied)
}
