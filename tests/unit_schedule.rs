use chrono::NaiveTime;

use lectern::modules::lesson_programs::schedule::{
    ScheduleError, ScheduleSlot, check_no_conflicts, slots_conflict,
};
use lectern_models::lesson_programs::DayOfWeek;

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn slot(day: DayOfWeek, start: (u32, u32), stop: (u32, u32)) -> ScheduleSlot {
    ScheduleSlot {
        day,
        start_time: time(start.0, start.1),
        stop_time: time(stop.0, stop.1),
    }
}

#[test]
fn test_overlapping_slots_on_same_day_conflict() {
    let a = slot(DayOfWeek::Monday, (9, 0), (11, 0));
    let b = slot(DayOfWeek::Monday, (10, 0), (12, 0));

    assert!(slots_conflict(&a, &b));
    assert!(slots_conflict(&b, &a));
}

#[test]
fn test_same_times_on_different_days_do_not_conflict() {
    let a = slot(DayOfWeek::Monday, (9, 0), (11, 0));
    let b = slot(DayOfWeek::Tuesday, (9, 0), (11, 0));

    assert!(!slots_conflict(&a, &b));
}

#[test]
fn test_back_to_back_slots_do_not_conflict() {
    let a = slot(DayOfWeek::Monday, (9, 0), (11, 0));
    let b = slot(DayOfWeek::Monday, (11, 0), (13, 0));

    assert!(!slots_conflict(&a, &b));
    assert!(!slots_conflict(&b, &a));
}

#[test]
fn test_new_slots_checked_against_existing() {
    let existing = [slot(DayOfWeek::Wednesday, (14, 0), (16, 0))];
    let candidates = [slot(DayOfWeek::Wednesday, (15, 0), (17, 0))];

    assert_eq!(
        check_no_conflicts(&candidates, &existing),
        Err(ScheduleError::Conflict)
    );
}

#[test]
fn test_new_slots_checked_against_each_other() {
    let candidates = [
        slot(DayOfWeek::Friday, (9, 0), (11, 0)),
        slot(DayOfWeek::Friday, (10, 0), (12, 0)),
    ];

    assert_eq!(
        check_no_conflicts(&candidates, &[]),
        Err(ScheduleError::Conflict)
    );
}

#[test]
fn test_inverted_time_range_is_rejected() {
    let candidates = [slot(DayOfWeek::Monday, (11, 0), (9, 0))];

    assert_eq!(
        check_no_conflicts(&candidates, &[]),
        Err(ScheduleError::InvalidTimeRange)
    );
}

#[test]
fn test_compatible_weekly_schedule_passes() {
    let existing = [
        slot(DayOfWeek::Monday, (9, 0), (11, 0)),
        slot(DayOfWeek::Wednesday, (14, 0), (16, 0)),
    ];
    let candidates = [
        slot(DayOfWeek::Monday, (11, 0), (13, 0)),
        slot(DayOfWeek::Friday, (9, 0), (11, 0)),
    ];

    assert_eq!(check_no_conflicts(&candidates, &existing), Ok(()));
}
