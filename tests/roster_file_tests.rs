use serde_json::json;
use uuid::Uuid;
use wardroster::core::publish::{PublishLogic, ScheduleLocks};
use wardroster::db::copy::CopyOptions;
use wardroster::db::queries::load_schedule_state;
use wardroster::errors::AppError;
use wardroster::models::roster::RosterFile;

mod common;
use common::{d, open_seeded};

#[test]
fn test_roster_entries_default_id_and_schedule() {
    let roster = RosterFile::parse(
        r#"{
            "metrics": {"coverage": 0.92},
            "assignments": [
                {"id": "A", "staffId": "N1", "wardId": "W1", "shiftTypeId": "E",
                 "date": "2025-03-02", "slot": "Early"},
                {"staffId": "N2", "wardId": "W1", "shiftTypeId": "L",
                 "date": "2025-03-02", "slot": "Late"}
            ]
        }"#,
    )
    .expect("parse");

    let (rows, metrics) = roster.into_rows("S1").expect("rows");

    assert_eq!(metrics, json!({"coverage": 0.92}));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "A");
    assert!(rows.iter().all(|r| r.schedule_id == "S1"));
    assert_eq!(rows[1].date, d("2025-03-02"));
    Uuid::parse_str(&rows[1].id).expect("generated id is a UUID");
}

#[test]
fn test_roster_keeps_foreign_schedule_id_for_the_writer_to_reject() {
    let roster = RosterFile::parse(
        r#"{"assignments": [{"scheduleId": "S9", "staffId": "N1", "wardId": "W1",
             "shiftTypeId": "E", "date": "2025-03-02", "slot": "Early"}]}"#,
    )
    .expect("parse");

    let (rows, metrics) = roster.into_rows("S1").expect("rows");
    assert_eq!(rows[0].schedule_id, "S9");
    assert_eq!(metrics, serde_json::Value::Null);
}

#[test]
fn test_roster_metrics_keep_full_float_precision() {
    let roster = RosterFile::parse(
        r#"{"metrics": {"coverage": 0.00015789473684210527}, "assignments": []}"#,
    )
    .expect("parse");

    assert_eq!(
        roster.metrics["coverage"].as_f64(),
        Some(0.00015789473684210527_f64)
    );
}

#[test]
fn test_roster_with_bad_date_is_rejected() {
    let roster = RosterFile::parse(
        r#"{"assignments": [{"staffId": "N1", "wardId": "W1", "shiftTypeId": "E",
             "date": "02/03/2025", "slot": "Early"}]}"#,
    )
    .expect("parse");

    let err = roster.into_rows("S1").expect_err("bad date");
    assert!(matches!(err, AppError::InvalidRoster(ref m) if m.contains("02/03/2025")));
}

#[test]
fn test_roster_missing_required_field_is_rejected() {
    let err = RosterFile::parse(r#"{"assignments": [{"staffId": "N1"}]}"#).expect_err("invalid");
    assert!(matches!(err, AppError::InvalidRoster(_)));
}

#[test]
fn test_publish_roster_file_end_to_end() {
    let (mut pool, _) = open_seeded("roster_publish");
    let roster = RosterFile::parse(
        r#"{
            "metrics": {"coverage": 1.0},
            "assignments": [
                {"id": "r1", "staffId": "N1", "wardId": "W1", "shiftTypeId": "N",
                 "date": "2025-03-05", "slot": "Night"}
            ]
        }"#,
    )
    .expect("parse");

    let written = PublishLogic::publish(
        &mut pool,
        &ScheduleLocks::new(),
        &CopyOptions::default(),
        "S1",
        roster,
    )
    .expect("publish");

    assert_eq!(written, 1);
    let state = load_schedule_state(&pool.conn, "S1").expect("state");
    assert_eq!(state.assignments[0].row.id, "r1");
    assert_eq!(state.metrics, Some(json!({"coverage": 1.0})));
}
