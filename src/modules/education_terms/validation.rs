//! Date-range validation for education terms.
//!
//! Everything here is pure: the service fetches the committed terms for the
//! candidate's year (excluding the row being replaced, on update), calls
//! [`validate_candidate`], and only writes on `Ok`. Checks run in a fixed
//! order and the first failure wins.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use lectern_models::education_terms::Term;

/// A proposed education term that has not been committed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateTerm {
    pub term: Term,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub last_registration_date: NaiveDate,
}

impl CandidateTerm {
    /// The year component of the candidate's tag.
    pub fn year(&self) -> i32 {
        self.start_date.year()
    }
}

/// A committed education term, reduced to the fields the validator compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommittedTerm {
    pub term: Term,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub const REGISTRATION_AFTER_START: &str =
    "the start date cannot be earlier than the last registration date";
pub const END_BEFORE_START: &str = "the end date cannot be earlier than the start date";

/// Why a candidate term was rejected.
///
/// All variants are client-input failures, recoverable by resubmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TermValidationError {
    /// The candidate's own dates are internally inconsistent; never compared
    /// against other terms.
    #[error("{0}")]
    DateOrder(&'static str),
    /// A committed term with the same label already exists in this year.
    #[error("an education term with the same term and year already exists")]
    DuplicateTag,
    /// The candidate's date span intersects a committed term in the same year.
    #[error("term dates conflict with an existing education term")]
    Overlap,
}

/// Decide whether `candidate` may be committed against the committed terms
/// sharing its year.
///
/// `existing_for_year` must be exactly the committed terms whose start-date
/// year equals `candidate.year()`; on update the caller excludes the record
/// being replaced, or the update would fail against its own prior row.
pub fn validate_candidate(
    candidate: &CandidateTerm,
    existing_for_year: &[CommittedTerm],
) -> Result<(), TermValidationError> {
    if candidate.last_registration_date > candidate.start_date {
        return Err(TermValidationError::DateOrder(REGISTRATION_AFTER_START));
    }

    if candidate.end_date < candidate.start_date {
        return Err(TermValidationError::DateOrder(END_BEFORE_START));
    }

    // One committed term per label per year, independent of dates.
    if existing_for_year.iter().any(|e| e.term == candidate.term) {
        return Err(TermValidationError::DuplicateTag);
    }

    if existing_for_year.iter().any(|e| overlaps(e, candidate)) {
        return Err(TermValidationError::Overlap);
    }

    Ok(())
}

/// The four-clause overlap predicate, preserved exactly as the workflow has
/// always applied it. It is not a complete closed-interval intersection
/// test: an existing term strictly inside the candidate that shares the
/// candidate's end date is not flagged, nor are single-day touches at either
/// boundary. See the exhaustive test below before changing anything here.
fn overlaps(existing: &CommittedTerm, candidate: &CandidateTerm) -> bool {
    existing.start_date == candidate.start_date
        || (existing.start_date < candidate.start_date
            && existing.end_date > candidate.start_date)
        || (existing.start_date < candidate.end_date && existing.end_date > candidate.end_date)
        || (existing.start_date > candidate.start_date && existing.end_date < candidate.end_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fall_2024() -> CandidateTerm {
        CandidateTerm {
            term: Term::Fall,
            start_date: date(2024, 9, 1),
            end_date: date(2025, 1, 15),
            last_registration_date: date(2024, 8, 20),
        }
    }

    fn committed(term: Term, start: NaiveDate, end: NaiveDate) -> CommittedTerm {
        CommittedTerm {
            term,
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn test_valid_candidate_against_empty_set() {
        assert_eq!(validate_candidate(&fall_2024(), &[]), Ok(()));
    }

    #[test]
    fn test_registration_after_start_is_date_order_error() {
        let candidate = CandidateTerm {
            last_registration_date: date(2024, 9, 2),
            ..fall_2024()
        };
        assert_eq!(
            validate_candidate(&candidate, &[]),
            Err(TermValidationError::DateOrder(REGISTRATION_AFTER_START))
        );
        // The structural check wins regardless of the comparison set.
        let conflicting = committed(Term::Fall, date(2024, 9, 1), date(2025, 1, 15));
        assert_eq!(
            validate_candidate(&candidate, &[conflicting]),
            Err(TermValidationError::DateOrder(REGISTRATION_AFTER_START))
        );
    }

    #[test]
    fn test_end_before_start_is_date_order_error() {
        let candidate = CandidateTerm {
            start_date: date(2024, 12, 20),
            end_date: date(2024, 9, 1),
            last_registration_date: date(2024, 8, 20),
            ..fall_2024()
        };
        assert_eq!(
            validate_candidate(&candidate, &[]),
            Err(TermValidationError::DateOrder(END_BEFORE_START))
        );
    }

    #[test]
    fn test_registration_check_runs_before_end_check() {
        // Both structural checks fail; the registration check is first.
        let candidate = CandidateTerm {
            start_date: date(2024, 12, 20),
            end_date: date(2024, 9, 1),
            last_registration_date: date(2024, 12, 25),
            ..fall_2024()
        };
        assert_eq!(
            validate_candidate(&candidate, &[]),
            Err(TermValidationError::DateOrder(REGISTRATION_AFTER_START))
        );
    }

    #[test]
    fn test_same_tag_different_dates_is_duplicate() {
        let existing = committed(Term::Fall, date(2024, 2, 1), date(2024, 5, 1));
        assert_eq!(
            validate_candidate(&fall_2024(), &[existing]),
            Err(TermValidationError::DuplicateTag)
        );
    }

    #[test]
    fn test_duplicate_tag_wins_over_overlap() {
        // Same tag AND overlapping dates: the tag check runs first.
        let existing = committed(Term::Fall, date(2024, 9, 1), date(2025, 1, 15));
        assert_eq!(
            validate_candidate(&fall_2024(), &[existing]),
            Err(TermValidationError::DuplicateTag)
        );
    }

    #[test]
    fn test_equal_start_dates_overlap_even_if_ends_differ() {
        let existing = committed(Term::Spring, date(2024, 9, 1), date(2024, 9, 2));
        assert_eq!(
            validate_candidate(&fall_2024(), &[existing]),
            Err(TermValidationError::Overlap)
        );
    }

    #[test]
    fn test_existing_straddles_candidate_start() {
        let existing = committed(Term::Spring, date(2024, 8, 1), date(2024, 10, 1));
        assert_eq!(
            validate_candidate(&fall_2024(), &[existing]),
            Err(TermValidationError::Overlap)
        );
    }

    #[test]
    fn test_existing_straddles_candidate_end() {
        let existing = committed(Term::Spring, date(2025, 1, 1), date(2025, 3, 1));
        assert_eq!(
            validate_candidate(&fall_2024(), &[existing]),
            Err(TermValidationError::Overlap)
        );
    }

    #[test]
    fn test_existing_nested_inside_candidate() {
        let existing = committed(Term::Spring, date(2024, 10, 1), date(2024, 12, 1));
        assert_eq!(
            validate_candidate(&fall_2024(), &[existing]),
            Err(TermValidationError::Overlap)
        );
    }

    #[test]
    fn test_candidate_nested_inside_existing() {
        // Candidate strictly inside an existing term: caught by the
        // straddles-start clause, since the existing end passes the
        // candidate's start.
        let existing = committed(Term::Spring, date(2024, 8, 1), date(2025, 2, 1));
        assert_eq!(
            validate_candidate(&fall_2024(), &[existing]),
            Err(TermValidationError::Overlap)
        );
    }

    #[test]
    fn test_disjoint_terms_pass() {
        let existing = committed(Term::Spring, date(2024, 2, 1), date(2024, 6, 1));
        assert_eq!(validate_candidate(&fall_2024(), &[existing]), Ok(()));
    }

    #[test]
    fn known_gap_nested_sharing_end_date_not_flagged() {
        // An existing term strictly inside the candidate that shares the
        // candidate's end date slips through all four clauses. This is
        // long-standing behavior; the test pins it so any change to the
        // predicate is deliberate.
        let candidate = fall_2024();
        let existing = committed(Term::Spring, date(2024, 10, 1), candidate.end_date);
        assert_eq!(validate_candidate(&candidate, &[existing]), Ok(()));
    }

    #[test]
    fn known_gap_single_day_touches_not_flagged() {
        let candidate = fall_2024();
        // Existing ends exactly on the candidate's start day.
        let before = committed(Term::Spring, date(2024, 6, 1), candidate.start_date);
        assert_eq!(validate_candidate(&candidate, &[before]), Ok(()));
        // Existing starts exactly on the candidate's end day.
        let after = committed(Term::Spring, candidate.end_date, date(2025, 5, 1));
        assert_eq!(validate_candidate(&candidate, &[after]), Ok(()));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let candidate = fall_2024();
        let existing = [committed(Term::Spring, date(2024, 10, 1), date(2024, 12, 1))];
        let first = validate_candidate(&candidate, &existing);
        for _ in 0..10 {
            assert_eq!(validate_candidate(&candidate, &existing), first);
        }
    }

    #[test]
    fn exhaustive_predicate_against_true_intersection() {
        // Compare the four-clause predicate with the true closed-interval
        // intersection test over every pair of well-formed intervals on a
        // small domain. The predicate never flags a disjoint pair, and the
        // only intersecting pairs it misses are the two known families:
        // an existing interval inside the candidate sharing its end date,
        // and single-day touches at either boundary.
        let base = date(2024, 3, 1);
        let day = |offset: i64| base + chrono::Duration::days(offset);

        for cs in 0..8i64 {
            for ce in cs..8 {
                for es in 0..8i64 {
                    for ee in es..8 {
                        let candidate = CandidateTerm {
                            term: Term::Fall,
                            start_date: day(cs),
                            end_date: day(ce),
                            last_registration_date: day(cs),
                        };
                        let existing = committed(Term::Spring, day(es), day(ee));

                        let flagged = overlaps(&existing, &candidate);
                        let truly_intersect = es <= ce && cs <= ee;

                        assert!(
                            !flagged || truly_intersect,
                            "false positive: candidate [{cs},{ce}] existing [{es},{ee}]"
                        );

                        if truly_intersect && !flagged {
                            let shares_end = ee == ce && es > cs;
                            let touches = ee == cs || es == ce;
                            assert!(
                                shares_end || touches,
                                "unexpected miss: candidate [{cs},{ce}] existing [{es},{ee}]"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_candidate_year_follows_start_date() {
        let candidate = fall_2024();
        assert_eq!(candidate.year(), 2024);
    }
}
