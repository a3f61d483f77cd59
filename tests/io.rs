#![forbid(unsafe_code)]
use semainier::{io, ScheduleConfig, Scheduler, SlotId, TieBreak};
use std::fs;
use tempfile::tempdir;

#[test]
fn import_members_and_export_assignments() {
    let dir = tempdir().unwrap();
    let members = dir.path().join("members.csv");
    fs::write(
        &members,
        "name,busy_slots\nAlex,\"MON-0900, mon-0930,sat-0900\"\nBlair\n",
    )
    .unwrap();

    let mut s = Scheduler::new(ScheduleConfig::new(9, 10, 5.0).with_devotional(true)).unwrap();
    let people = io::import_members_csv(&members, s.catalog(), s.restrictions()).unwrap();
    assert_eq!(people.len(), 2);
    assert!(!people[0].is_available(&SlotId::new("mon-0900")));
    assert_eq!(people[0].availability.len(), 8);
    assert_eq!(people[1].availability.len(), 10);

    s.add_people(people).unwrap();
    s.generate(TieBreak::Registration);

    let out = dir.path().join("plan.csv");
    io::export_assignments_csv(&out, s.catalog(), s.assignments()).unwrap();
    let text = fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("slot_id,day,time,display,members"));
    assert_eq!(lines.next(), Some("mon-0900,mon,0900,9:00 AM,Blair"));
    assert_eq!(text.lines().count(), 11);
}

#[test]
fn import_rejects_empty_names() {
    let dir = tempdir().unwrap();
    let members = dir.path().join("members.csv");
    fs::write(&members, "name,busy_slots\n ,mon-0900\n").unwrap();

    let s = Scheduler::new(ScheduleConfig::new(9, 10, 5.0)).unwrap();
    assert!(io::import_members_csv(&members, s.catalog(), s.restrictions()).is_err());
}

#[test]
fn config_round_trips_through_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("semainier.json");
    fs::write(
        &path,
        r#"{ "shift_start_hour": 8, "shift_end_hour": 16, "max_hours_limit": 7.5,
             "people_per_shift": 2, "include_devotional": true,
             "meeting": { "day": "fri", "start": "1400", "end": "1530" },
             "require_overlap": false }"#,
    )
    .unwrap();

    let cfg = io::load_config_json(&path).unwrap();
    assert_eq!(cfg.max_half_slots(), 15);
    let s = Scheduler::new(cfg).unwrap();
    assert_eq!(s.restrictions().len(), 5);
}
