use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_cli_db, setup_test_db, temp_out, wr, write_roster};

const ROSTER_TWO: &str = r#"{
    "metrics": {"coverage": 0.92},
    "assignments": [
        {"id": "rowA", "staffId": "N1", "wardId": "W1", "shiftTypeId": "E",
         "date": "2025-03-01", "slot": "Early"},
        {"id": "rowB", "staffId": "N2", "wardId": "W1", "shiftTypeId": "L",
         "date": "2025-03-01", "slot": "Late"}
    ]
}"#;

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("cli_init");

    wr().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    wr().args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"))
        .stdout(contains("Foreign key check passed"));
}

#[test]
fn test_reference_entities_are_listed() {
    let db_path = setup_test_db("cli_entities");
    init_cli_db(&db_path);

    wr().args(["--db", &db_path, "ward", "list"])
        .assert()
        .success()
        .stdout(contains("Cardiology"));

    wr().args(["--db", &db_path, "staff", "list"])
        .assert()
        .success()
        .stdout(contains("Alice").and(contains("Bob")));

    wr().args(["--db", &db_path, "shift-type", "list"])
        .assert()
        .success()
        .stdout(contains("07:00-15:00"));

    wr().args(["--db", &db_path, "schedule", "list"])
        .assert()
        .success()
        .stdout(contains("S1").and(contains("2025-03-07")));
}

#[test]
fn test_schedule_with_unknown_ward_fails() {
    let db_path = setup_test_db("cli_schedule_bad_ward");
    init_cli_db(&db_path);

    wr().args([
        "--db",
        &db_path,
        "schedule",
        "add",
        "S9",
        "--ward",
        "NOPE",
        "--from",
        "2025-03-01",
        "--to",
        "2025-03-07",
    ])
    .assert()
    .failure()
    .stderr(contains("FOREIGN KEY"));
}

#[test]
fn test_publish_then_roster_shows_rows_and_metrics() {
    let db_path = setup_test_db("cli_publish");
    init_cli_db(&db_path);
    let roster = write_roster("cli_publish_roster", ROSTER_TWO);

    wr().args(["--db", &db_path, "publish", "S1", "--file", &roster])
        .assert()
        .success()
        .stdout(contains("2 assignments stored"));

    wr().args(["--db", &db_path, "roster", "S1"])
        .assert()
        .success()
        .stdout(contains("rowA"))
        .stdout(contains("rowB"))
        .stdout(contains("0.92"));

    wr().args(["--db", &db_path, "schedule", "show", "S1"])
        .assert()
        .success()
        .stdout(contains("coverage"));
}

#[test]
fn test_publish_empty_roster_clears_schedule() {
    let db_path = setup_test_db("cli_publish_empty");
    init_cli_db(&db_path);

    let full = write_roster("cli_publish_empty_full", ROSTER_TWO);
    wr().args(["--db", &db_path, "publish", "S1", "--file", &full])
        .assert()
        .success();

    let empty = write_roster("cli_publish_empty_none", r#"{"metrics": {}, "assignments": []}"#);
    wr().args(["--db", &db_path, "publish", "S1", "--file", &empty])
        .assert()
        .success()
        .stdout(contains("0 assignments stored"));

    wr().args(["--db", &db_path, "roster", "S1"])
        .assert()
        .success()
        .stdout(contains("No assignments stored"))
        .stdout(contains("rowA").not());
}

#[test]
fn test_failed_publish_keeps_previous_roster() {
    let db_path = setup_test_db("cli_publish_fail");
    init_cli_db(&db_path);

    let good = write_roster("cli_publish_fail_good", ROSTER_TWO);
    wr().args(["--db", &db_path, "publish", "S1", "--file", &good])
        .assert()
        .success();

    let bad = write_roster(
        "cli_publish_fail_bad",
        r#"{"metrics": {"coverage": 0.1}, "assignments": [
            {"id": "x1", "staffId": "N1", "wardId": "W1", "shiftTypeId": "E",
             "date": "2025-03-02", "slot": "Early"},
            {"id": "x2", "staffId": "GHOST", "wardId": "W1", "shiftTypeId": "E",
             "date": "2025-03-02", "slot": "Early"}
        ]}"#,
    );
    wr().args(["--db", &db_path, "publish", "S1", "--file", &bad])
        .assert()
        .failure()
        .stderr(contains("Error:"));

    wr().args(["--db", &db_path, "roster", "S1", "--json"])
        .assert()
        .success()
        .stdout(contains("rowA"))
        .stdout(contains("x1").not())
        .stdout(contains("0.92"));
}

#[test]
fn test_publish_invalid_roster_file_fails() {
    let db_path = setup_test_db("cli_publish_invalid");
    init_cli_db(&db_path);
    let bad = write_roster("cli_publish_invalid_roster", "{ not json");

    wr().args(["--db", &db_path, "publish", "S1", "--file", &bad])
        .assert()
        .failure()
        .stderr(contains("Invalid roster file"));
}

#[test]
fn test_export_csv_and_json() {
    let db_path = setup_test_db("cli_export");
    init_cli_db(&db_path);
    let roster = write_roster("cli_export_roster", ROSTER_TWO);
    wr().args(["--db", &db_path, "publish", "S1", "--file", &roster])
        .assert()
        .success();

    let csv_out = temp_out("cli_export", "csv");
    wr().args([
        "--db", &db_path, "export", "--schedule", "S1", "--format", "csv", "--file", &csv_out,
    ])
    .assert()
    .success();

    let csv = fs::read_to_string(&csv_out).expect("csv written");
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("id,schedule_id,staff_id,ward_id,date,slot,shift_type_id,created_at")
    );
    assert_eq!(lines.count(), 2);

    let json_out = temp_out("cli_export", "json");
    wr().args([
        "--db", &db_path, "export", "--schedule", "S1", "--format", "json", "--file", &json_out,
    ])
    .assert()
    .success();

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).expect("json written")).unwrap();
    let arr = parsed.as_array().expect("array");
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["schedule_id"], "S1");
}

#[test]
fn test_export_relative_path_fails() {
    let db_path = setup_test_db("cli_export_relative");
    init_cli_db(&db_path);

    wr().args([
        "--db",
        &db_path,
        "export",
        "--schedule",
        "S1",
        "--file",
        "relative.csv",
    ])
    .assert()
    .failure()
    .stderr(contains("must be absolute"));
}

#[test]
fn test_export_existing_file_needs_force() {
    let db_path = setup_test_db("cli_export_force");
    init_cli_db(&db_path);
    let roster = write_roster("cli_export_force_roster", ROSTER_TWO);
    wr().args(["--db", &db_path, "publish", "S1", "--file", &roster])
        .assert()
        .success();

    let out = temp_out("cli_export_force", "csv");
    fs::write(&out, "keep me").unwrap();

    // answering "n" keeps the file
    wr().args(["--db", &db_path, "export", "--schedule", "S1", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    wr().args(["--db", &db_path, "export", "--schedule", "S1", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("rowA"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log");
    init_cli_db(&db_path);
    let roster = write_roster("cli_log_roster", ROSTER_TWO);
    wr().args(["--db", &db_path, "publish", "S1", "--file", &roster])
        .assert()
        .success();

    wr().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("schedule_add"))
        .stdout(contains("Replaced 0 assignments with 2"));
}

#[test]
fn test_schedule_delete_removes_roster() {
    let db_path = setup_test_db("cli_schedule_del");
    init_cli_db(&db_path);
    let roster = write_roster("cli_schedule_del_roster", ROSTER_TWO);
    wr().args(["--db", &db_path, "publish", "S1", "--file", &roster])
        .assert()
        .success();

    wr().args(["--db", &db_path, "schedule", "del", "S1", "--yes"])
        .assert()
        .success();

    wr().args(["--db", &db_path, "roster", "S1"])
        .assert()
        .failure()
        .stderr(contains("Schedule not found"));
}

#[test]
fn test_backup_compressed() {
    let db_path = setup_test_db("cli_backup");
    init_cli_db(&db_path);

    let out = temp_out("cli_backup", "sqlite");
    let zip = temp_out("cli_backup", "zip");

    wr().args(["--db", &db_path, "backup", "--file", &out, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed"));

    assert!(fs::metadata(&zip).is_ok());
    assert!(fs::metadata(&out).is_err());
}

#[test]
fn test_db_info_counts_tables() {
    let db_path = setup_test_db("cli_db_info");
    init_cli_db(&db_path);

    wr().args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Schedules:"))
        .stdout(contains("Assignments:"))
        .stdout(contains("Migrations:"));
}
