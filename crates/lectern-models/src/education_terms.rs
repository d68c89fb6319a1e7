//! Education term domain models and DTOs.
//!
//! An education term is a dated enrollment period (e.g., "Fall 2024")
//! identified by a term label plus the calendar year of its start date.
//! At most one committed term may exist per label and year, and no two
//! committed terms in the same year may overlap; those invariants are
//! enforced by the education terms service before any row is written.

use crate::ids::EducationTermId;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use lectern_core::PaginationMeta;
use lectern_core::PaginationParams;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Named academic term label. Combined with the start date's year it forms
/// the unique tag of a committed education term.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "term_label", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Term {
    Fall,
    Spring,
    Summer,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Fall => write!(f, "fall"),
            Term::Spring => write!(f, "spring"),
            Term::Summer => write!(f, "summer"),
        }
    }
}

/// Education term entity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EducationTerm {
    /// Unique identifier for the term
    pub id: EducationTermId,
    /// Term label (fall, spring, summer)
    pub term: Term,
    /// First day of the term
    pub start_date: NaiveDate,
    /// Last day of the term
    pub end_date: NaiveDate,
    /// Last day on which registration is accepted; never after `start_date`
    pub last_registration_date: NaiveDate,
    /// Timestamp when the term was created
    pub created_at: DateTime<Utc>,
    /// Timestamp when the term was last updated
    pub updated_at: DateTime<Utc>,
}

impl EducationTerm {
    /// The calendar year this term is tagged with, derived from its start date.
    pub fn year(&self) -> i32 {
        self.start_date.year()
    }
}

/// DTO for creating an education term.
///
/// Updates use the same shape: an update is a full replace followed by
/// revalidation, never a partial field mutation.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEducationTermDto {
    /// Term label
    pub term: Term,
    /// First day of the term
    pub start_date: NaiveDate,
    /// Last day of the term
    pub end_date: NaiveDate,
    /// Last day on which registration is accepted
    pub last_registration_date: NaiveDate,
}

/// Query parameters for listing education terms.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct EducationTermFilterParams {
    /// Filter by term label
    pub term: Option<Term>,
    /// Filter by start-date year
    pub year: Option<i32>,
    /// Pagination parameters
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated response containing education terms.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedEducationTermsResponse {
    /// List of education terms
    pub data: Vec<EducationTerm>,
    /// Pagination metadata
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Term::Fall).unwrap(), r#""fall""#);
        let term: Term = serde_json::from_str(r#""spring""#).unwrap();
        assert_eq!(term, Term::Spring);
    }

    #[test]
    fn test_term_display() {
        assert_eq!(Term::Fall.to_string(), "fall");
        assert_eq!(Term::Summer.to_string(), "summer");
    }

    #[test]
    fn test_year_is_derived_from_start_date() {
        let term = EducationTerm {
            id: EducationTermId::new(),
            term: Term::Fall,
            start_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            last_registration_date: NaiveDate::from_ymd_opt(2024, 8, 20).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        // A term straddling a year boundary belongs to its start year.
        assert_eq!(term.year(), 2024);
    }

    #[test]
    fn test_create_dto_deserialize() {
        let json = r#"{
            "term": "fall",
            "start_date": "2024-09-01",
            "end_date": "2025-01-15",
            "last_registration_date": "2024-08-20"
        }"#;
        let dto: CreateEducationTermDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.term, Term::Fall);
        assert_eq!(dto.start_date, NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
    }
}
