#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use std::env;
use std::fs;
use std::path::PathBuf;
use wardroster::db::initialize::init_db;
use wardroster::db::pool::DbPool;
use wardroster::db::queries::{insert_schedule, insert_shift_type, insert_staff, insert_ward};
use wardroster::models::assignment::AssignmentRow;
use wardroster::models::shift_type::ShiftType;
use wardroster::models::staff::Staff;
use wardroster::models::ward::Ward;

pub fn wr() -> Command {
    cargo_bin_cmd!("wardroster")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_wardroster.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    fs::remove_file(format!("{db_path}-journal")).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Open a fresh database with ward W1, staff N1..N5, shift types E/L/N
/// and schedules S1, S2 (both on W1, March 2025).
pub fn open_seeded(name: &str) -> (DbPool, String) {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    seed(&pool);
    (pool, db_path)
}

pub fn seed(pool: &DbPool) {
    let conn = &pool.conn;
    insert_ward(
        conn,
        &Ward {
            id: "W1".into(),
            name: "Cardiology".into(),
        },
    )
    .expect("ward");

    for i in 1..=5 {
        insert_staff(
            conn,
            &Staff {
                id: format!("N{i}"),
                name: format!("Nurse {i}"),
                ward_id: Some("W1".into()),
            },
        )
        .expect("staff");
    }

    for (id, slot) in [("E", "Early"), ("L", "Late"), ("N", "Night")] {
        insert_shift_type(
            conn,
            &ShiftType {
                id: id.into(),
                name: format!("{slot} shift"),
                slot: slot.into(),
                start_time: None,
                end_time: None,
            },
        )
        .expect("shift type");
    }

    insert_schedule(conn, "S1", "W1", d("2025-03-01"), d("2025-03-31")).expect("S1");
    insert_schedule(conn, "S2", "W1", d("2025-03-01"), d("2025-03-31")).expect("S2");
}

/// Build an assignment row on ward W1 whose shift type follows the slot.
pub fn row(id: &str, schedule: &str, staff: &str, date: &str, slot: &str) -> AssignmentRow {
    let shift_type_id = match slot {
        "Early" => "E",
        "Late" => "L",
        _ => "N",
    };
    AssignmentRow {
        id: id.into(),
        schedule_id: schedule.into(),
        staff_id: staff.into(),
        ward_id: "W1".into(),
        date: d(date),
        slot: slot.into(),
        shift_type_id: shift_type_id.into(),
    }
}

/// `n` rows for `schedule`, ids `<prefix>-1..n`, one per day starting March 1st.
pub fn rows(prefix: &str, schedule: &str, n: usize) -> Vec<AssignmentRow> {
    (1..=n)
        .map(|i| {
            let day = ((i - 1) % 28) + 1;
            let staff = format!("N{}", ((i - 1) % 5) + 1);
            let slot = ["Early", "Late", "Night"][i % 3];
            row(
                &format!("{prefix}-{i}"),
                schedule,
                &staff,
                &format!("2025-03-{day:02}"),
                slot,
            )
        })
        .collect()
}

/// Persisted rows without the writer-assigned timestamp, sorted by id.
pub fn persisted(pool: &DbPool, schedule: &str) -> Vec<AssignmentRow> {
    let mut out: Vec<AssignmentRow> =
        wardroster::db::queries::load_assignments(&pool.conn, schedule)
            .expect("load assignments")
            .into_iter()
            .map(|a| a.row)
            .collect();
    out.sort_by(|a, b| a.id.cmp(&b.id));
    out
}

pub fn sorted(mut v: Vec<AssignmentRow>) -> Vec<AssignmentRow> {
    v.sort_by(|a, b| a.id.cmp(&b.id));
    v
}

/// Init a DB through the CLI and create W1, N1, N2, E, L and schedule S1.
pub fn init_cli_db(db_path: &str) {
    wr().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for args in [
        vec!["ward", "add", "W1", "Cardiology"],
        vec!["staff", "add", "N1", "Alice", "--ward", "W1"],
        vec!["staff", "add", "N2", "Bob", "--ward", "W1"],
        vec![
            "shift-type", "add", "E", "Early shift", "--slot", "Early", "--start", "07:00",
            "--end", "15:00",
        ],
        vec![
            "shift-type", "add", "L", "Late shift", "--slot", "Late", "--start", "14:30",
            "--end", "22:30",
        ],
        vec![
            "schedule",
            "add",
            "S1",
            "--ward",
            "W1",
            "--from",
            "2025-03-01",
            "--to",
            "2025-03-07",
        ],
    ] {
        wr().args(["--db", db_path])
            .args(&args)
            .assert()
            .success();
    }
}

/// Write a roster file into the temp dir and return its path.
pub fn write_roster(name: &str, json: &str) -> String {
    let p = temp_out(name, "json");
    fs::write(&p, json).expect("write roster");
    p
}
