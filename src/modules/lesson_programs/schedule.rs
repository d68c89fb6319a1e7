//! Weekly schedule conflict rules.
//!
//! Pure functions over schedule slots; the service fetches the slots a
//! user already holds and calls [`check_no_conflicts`] before linking new
//! programs.

use chrono::NaiveTime;
use thiserror::Error;

use lectern_models::lesson_programs::{DayOfWeek, LessonProgram};

/// A schedule slot reduced to the fields conflict checking compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleSlot {
    pub day: DayOfWeek,
    pub start_time: NaiveTime,
    pub stop_time: NaiveTime,
}

impl From<&LessonProgram> for ScheduleSlot {
    fn from(program: &LessonProgram) -> Self {
        Self {
            day: program.day,
            start_time: program.start_time,
            stop_time: program.stop_time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("stop time must be after start time")]
    InvalidTimeRange,
    #[error("lesson program conflicts with another slot on the same day")]
    Conflict,
}

/// Two slots conflict when they share a day and their half-open time
/// ranges intersect. Back-to-back slots do not conflict.
pub fn slots_conflict(a: &ScheduleSlot, b: &ScheduleSlot) -> bool {
    a.day == b.day && a.start_time < b.stop_time && b.start_time < a.stop_time
}

/// Verify that `candidates` are well-formed, conflict-free among
/// themselves, and conflict-free against `existing`.
pub fn check_no_conflicts(
    candidates: &[ScheduleSlot],
    existing: &[ScheduleSlot],
) -> Result<(), ScheduleError> {
    for slot in candidates {
        if slot.start_time >= slot.stop_time {
            return Err(ScheduleError::InvalidTimeRange);
        }
    }

    for (i, slot) in candidates.iter().enumerate() {
        if existing.iter().any(|e| slots_conflict(slot, e)) {
            return Err(ScheduleError::Conflict);
        }
        if candidates[..i].iter().any(|c| slots_conflict(slot, c)) {
            return Err(ScheduleError::Conflict);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_same_day_overlapping_times_conflict() {
        let a = slot(DayOfWeek::Monday, (9, 0), (11, 0));
        let b = slot(DayOfWeek::Monday, (10, 0), (12, 0));
        assert!(slots_conflict(&a, &b));
        assert!(slots_conflict(&b, &a));
    }

    #[test]
    fn test_different_days_never_conflict() {
        let a = slot(DayOfWeek::Monday, (9, 0), (11, 0));
        let b = slot(DayOfWeek::Tuesday, (9, 0), (11, 0));
        assert!(!slots_conflict(&a, &b));
    }

    #[test]
    fn test_back_to_back_slots_do_not_conflict() {
        let a = slot(DayOfWeek::Friday, (9, 0), (11, 0));
        let b = slot(DayOfWeek::Friday, (11, 0), (13, 0));
        assert!(!slots_conflict(&a, &b));
    }

    #[test]
    fn test_nested_slot_conflicts() {
        let outer = slot(DayOfWeek::Wednesday, (8, 0), (16, 0));
        let inner = slot(DayOfWeek::Wednesday, (10, 0), (11, 0));
        assert!(slots_conflict(&outer, &inner));
    }

    #[test]
    fn test_check_rejects_inverted_time_range() {
        let bad = slot(DayOfWeek::Monday, (11, 0), (9, 0));
        assert_eq!(
            check_no_conflicts(&[bad], &[]),
            Err(ScheduleError::InvalidTimeRange)
        );
    }

    #[test]
    fn test_check_rejects_conflict_with_existing() {
        let existing = [slot(DayOfWeek::Monday, (9, 0), (11, 0))];
        let candidate = [slot(DayOfWeek::Monday, (10, 30), (12, 0))];
        assert_eq!(
            check_no_conflicts(&candidate, &existing),
            Err(ScheduleError::Conflict)
        );
    }

    #[test]
    fn test_check_rejects_conflicts_among_candidates() {
        let candidates = [
            slot(DayOfWeek::Thursday, (9, 0), (11, 0)),
            slot(DayOfWeek::Thursday, (10, 0), (12, 0)),
        ];
        assert_eq!(
            check_no_conflicts(&candidates, &[]),
            Err(ScheduleError::Conflict)
        );
    }

    #[test]
    fn test_check_accepts_compatible_slots() {
        let existing = [slot(DayOfWeek::Monday, (9, 0), (11, 0))];
        let candidates = [
            slot(DayOfWeek::Monday, (11, 0), (13, 0)),
            slot(DayOfWeek::Tuesday, (9, 0), (11, 0)),
        ];
        assert_eq!(check_no_conflicts(&candidates, &existing), Ok(()));
    }
}
