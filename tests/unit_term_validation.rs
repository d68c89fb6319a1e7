use chrono::NaiveDate;

use lectern::modules::education_terms::validation::{
    CandidateTerm, CommittedTerm, END_BEFORE_START, REGISTRATION_AFTER_START, TermValidationError,
    validate_candidate,
};
use lectern_models::education_terms::Term;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn candidate(term: Term, start: (u32, u32), end: (u32, u32)) -> CandidateTerm {
    CandidateTerm {
        term,
        start_date: date(2024, start.0, start.1),
        end_date: date(2024, end.0, end.1),
        last_registration_date: date(2024, start.0, start.1),
    }
}

fn committed(term: Term, start: (u32, u32), end: (u32, u32)) -> CommittedTerm {
    CommittedTerm {
        term,
        start_date: date(2024, start.0, start.1),
        end_date: date(2024, end.0, end.1),
    }
}

#[test]
fn test_first_term_of_a_year_is_accepted() {
    let fall = candidate(Term::Fall, (9, 1), (12, 20));
    assert_eq!(validate_candidate(&fall, &[]), Ok(()));
}

#[test]
fn test_registration_after_start_is_rejected() {
    let mut fall = candidate(Term::Fall, (9, 1), (12, 20));
    fall.last_registration_date = date(2024, 9, 2);

    assert_eq!(
        validate_candidate(&fall, &[]),
        Err(TermValidationError::DateOrder(REGISTRATION_AFTER_START))
    );
}

#[test]
fn test_end_before_start_is_rejected() {
    let mut fall = candidate(Term::Fall, (9, 1), (12, 20));
    fall.end_date = date(2024, 8, 31);

    assert_eq!(
        validate_candidate(&fall, &[]),
        Err(TermValidationError::DateOrder(END_BEFORE_START))
    );
}

#[test]
fn test_registration_check_runs_before_end_check() {
    let mut fall = candidate(Term::Fall, (9, 1), (12, 20));
    fall.last_registration_date = date(2024, 9, 2);
    fall.end_date = date(2024, 8, 31);

    assert_eq!(
        validate_candidate(&fall, &[]),
        Err(TermValidationError::DateOrder(REGISTRATION_AFTER_START))
    );
}

#[test]
fn test_same_term_in_same_year_is_rejected() {
    let fall = candidate(Term::Fall, (9, 1), (12, 20));
    let existing = [committed(Term::Fall, (1, 10), (4, 20))];

    assert_eq!(
        validate_candidate(&fall, &existing),
        Err(TermValidationError::DuplicateTag)
    );
}

#[test]
fn test_duplicate_wins_over_overlap() {
    let fall = candidate(Term::Fall, (9, 1), (12, 20));
    let existing = [committed(Term::Fall, (9, 1), (12, 20))];

    assert_eq!(
        validate_candidate(&fall, &existing),
        Err(TermValidationError::DuplicateTag)
    );
}

#[test]
fn test_overlapping_spans_are_rejected() {
    let spring = candidate(Term::Spring, (1, 10), (5, 30));
    let existing = [committed(Term::Fall, (1, 1), (2, 1))];

    assert_eq!(
        validate_candidate(&spring, &existing),
        Err(TermValidationError::Overlap)
    );
}

#[test]
fn test_disjoint_terms_coexist() {
    let summer = candidate(Term::Summer, (6, 10), (8, 20));
    let existing = [
        committed(Term::Spring, (1, 10), (5, 30)),
        committed(Term::Fall, (9, 1), (12, 20)),
    ];

    assert_eq!(validate_candidate(&summer, &existing), Ok(()));
}

#[test]
fn test_candidate_swallowing_an_existing_term_is_rejected() {
    let fall = candidate(Term::Fall, (1, 1), (12, 20));
    let existing = [committed(Term::Spring, (2, 1), (5, 30))];

    assert_eq!(
        validate_candidate(&fall, &existing),
        Err(TermValidationError::Overlap)
    );
}

#[test]
fn test_error_messages() {
    assert_eq!(
        TermValidationError::DateOrder(END_BEFORE_START).to_string(),
        "the end date cannot be earlier than the start date"
    );
    assert_eq!(
        TermValidationError::DuplicateTag.to_string(),
        "an education term with the same term and year already exists"
    );
    assert_eq!(
        TermValidationError::Overlap.to_string(),
        "term dates conflict with an existing education term"
    );
}
