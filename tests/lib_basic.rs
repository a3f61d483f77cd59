#![forbid(unsafe_code)]
use semainier::{ScheduleConfig, Scheduler, SlotId, TieBreak, Weekday};

fn busy_except(s: &Scheduler, keep: &[&str]) -> Vec<SlotId> {
    s.catalog()
        .iter()
        .map(|slot| slot.id.clone())
        .filter(|id| !keep.contains(&id.as_str()))
        .collect()
}

#[test]
fn single_member_is_capped_at_max_hours() {
    let mut s = Scheduler::new(ScheduleConfig::new(9, 11, 1.0)).unwrap();
    s.add_member("Alex", Vec::new()).unwrap();

    s.generate(TieBreak::Registration);
    let view = s.view();

    assert_eq!(view.hours_for("Alex"), Some(1.0));
    assert_eq!(s.assignments().half_slots_for("Alex"), 2);
    // toutes les autres demi-heures restent vides
    assert_eq!(s.under_filled().len(), s.catalog().len() - 2);
}

#[test]
fn devotional_slots_stay_empty() {
    let cfg = ScheduleConfig::new(9, 13, 20.0).with_devotional(true);
    let mut s = Scheduler::new(cfg).unwrap();
    s.add_member("Alex", Vec::new()).unwrap();
    s.add_member("Blair", Vec::new()).unwrap();

    s.generate(TieBreak::Registration);

    assert!(s.assignments().roster(&SlotId::new("tue-1100")).is_empty());
    assert!(s.assignments().roster(&SlotId::new("tue-1130")).is_empty());
    assert!(s.view().roster(Weekday::Tue, "1100").is_empty());
    assert!(!s.assignments().roster(&SlotId::new("tue-1030")).is_empty());
}

#[test]
fn full_slot_rejects_third_member() {
    let cfg = ScheduleConfig::new(9, 10, 10.0).with_people_per_shift(2);
    let mut s = Scheduler::new(cfg).unwrap();
    for name in ["Alex", "Blair", "Casey"] {
        let busy = busy_except(&s, &["mon-0900"]);
        s.add_member(name, busy).unwrap();
    }

    s.generate(TieBreak::Seeded(3));
    let slot = SlotId::new("mon-0900");
    let roster = s.assignments().roster(&slot).to_vec();
    assert_eq!(roster.len(), 2);

    let left_out = ["Alex", "Blair", "Casey"]
        .into_iter()
        .find(|n| !roster.iter().any(|r| r == n))
        .unwrap();
    let before = s.assignments().clone();
    let err = s.add_person(left_out, &slot).unwrap_err();
    assert_eq!(err, semainier::OverrideError::SlotFull { capacity: 2 });
    assert!(err.to_string().contains("already full"));
    assert_eq!(s.assignments(), &before);
}

#[test]
fn prefers_members_who_have_not_worked_that_day() {
    let mut s = Scheduler::new(ScheduleConfig::new(9, 10, 10.0)).unwrap();
    s.add_member("Alex", Vec::new()).unwrap();
    s.add_member("Blair", Vec::new()).unwrap();

    s.generate(TieBreak::ByName);

    for day in Weekday::ALL {
        let first = s.view().roster(day, "0900").to_vec();
        let second = s.view().roster(day, "0930").to_vec();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_ne!(first, second, "{day} should be split between both members");
    }
}

#[test]
fn lighter_load_wins_when_nobody_worked_that_day() {
    let mut s = Scheduler::new(ScheduleConfig::new(9, 10, 10.0)).unwrap();
    s.add_member("Alex", Vec::new()).unwrap();
    s.add_member("Blair", vec![SlotId::new("mon-0900"), SlotId::new("mon-0930")])
        .unwrap();

    s.generate(TieBreak::Registration);

    let roster = |id: &str| s.assignments().roster(&SlotId::new(id)).to_vec();
    assert_eq!(roster("mon-0900"), ["Alex"]);
    assert_eq!(roster("mon-0930"), ["Alex"]);
    // personne n'a travaillé mardi : Blair (0 demi-heure) passe devant Alex (2)
    assert_eq!(roster("tue-0900"), ["Blair"]);
}

#[test]
fn overlap_anchor_is_ranked_last() {
    let cfg = ScheduleConfig::new(9, 11, 10.0).with_overlap(true);
    let mut s = Scheduler::new(cfg).unwrap();
    // Alex : lundi 9:30 et 10:00 seulement ; Blair : toute la semaine
    let busy = busy_except(&s, &["mon-0930", "mon-1000"]);
    s.add_member("Alex", busy).unwrap();
    s.add_member("Blair", Vec::new()).unwrap();

    s.generate(TieBreak::Registration);

    let roster = |id: &str| s.assignments().roster(&SlotId::new(id)).to_vec();
    assert_eq!(roster("mon-0900"), ["Blair"]);
    assert_eq!(roster("mon-0930"), ["Alex"]);
    // égalité jour + compteur : Alex vient de travailler, Blair passe devant
    assert_eq!(roster("mon-1000"), ["Blair"]);
}

#[test]
fn rerun_discards_manual_edits() {
    let mut s = Scheduler::new(ScheduleConfig::new(9, 10, 10.0)).unwrap();
    s.add_member("Alex", Vec::new()).unwrap();
    s.generate(TieBreak::Registration);
    let generated = s.assignments().clone();

    assert!(s.remove_person("Alex", &SlotId::new("mon-0900")));
    assert_ne!(s.assignments(), &generated);

    s.generate(TieBreak::Registration);
    assert_eq!(s.assignments(), &generated);
}

#[test]
fn no_members_means_empty_schedule() {
    let mut s = Scheduler::new(ScheduleConfig::new(9, 17, 8.0)).unwrap();
    s.generate(TieBreak::default());
    assert!(!s.view().has_any_assignment);
    assert_eq!(s.assignments().iter().count(), s.catalog().len());
}

#[test]
fn invalid_config_is_rejected() {
    let err = Scheduler::new(ScheduleConfig::new(9, 9, 8.0)).unwrap_err();
    assert!(matches!(err, semainier::SchedError::Config(_)));
    assert!(Scheduler::new(ScheduleConfig::new(9, 17, 8.0).with_people_per_shift(0)).is_err());
}

#[test]
fn empty_member_name_is_rejected() {
    let mut s = Scheduler::new(ScheduleConfig::new(9, 17, 8.0)).unwrap();
    assert!(matches!(
        s.add_member("  ", Vec::new()),
        Err(semainier::SchedError::EmptyMemberName)
    ));
    assert!(s.members().is_empty());
}
