//! Lesson program domain models and DTOs.
//!
//! A lesson program is a weekly schedule slot (day of week plus start and
//! stop times) tied to an education term and carrying one or more lessons.
//! Teachers and students are linked to programs through a join table; the
//! services reject links that would put two slots on the same day at
//! overlapping times.

use crate::ids::{EducationTermId, LessonId, LessonProgramId};
use crate::lessons::Lesson;
use chrono::{DateTime, NaiveTime, Utc};
use lectern_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Day of the week a lesson program occupies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "week_day", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Lesson program entity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LessonProgram {
    /// Unique identifier for the program
    pub id: LessonProgramId,
    /// Day of the week the slot occupies
    pub day: DayOfWeek,
    /// Slot start time
    pub start_time: NaiveTime,
    /// Slot stop time; always after `start_time`
    pub stop_time: NaiveTime,
    /// Education term the program belongs to
    pub education_term_id: EducationTermId,
    /// Timestamp when the program was created
    pub created_at: DateTime<Utc>,
    /// Timestamp when the program was last updated
    pub updated_at: DateTime<Utc>,
}

/// Lesson program with its attached lessons, as returned by read endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LessonProgramWithLessons {
    /// The program itself
    #[serde(flatten)]
    pub program: LessonProgram,
    /// Lessons taught in this slot
    pub lessons: Vec<Lesson>,
}

/// DTO for creating a lesson program.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLessonProgramDto {
    /// Day of the week
    pub day: DayOfWeek,
    /// Slot start time
    pub start_time: NaiveTime,
    /// Slot stop time (must be after `start_time`)
    pub stop_time: NaiveTime,
    /// Education term the program belongs to
    pub education_term_id: EducationTermId,
    /// Lessons taught in this slot (at least one)
    #[validate(length(min = 1))]
    pub lesson_ids: Vec<LessonId>,
}

/// Query parameters for listing lesson programs.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct LessonProgramFilterParams {
    /// Filter by education term
    pub education_term_id: Option<EducationTermId>,
    /// Pagination parameters
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated response containing lesson programs.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedLessonProgramsResponse {
    /// List of lesson programs
    pub data: Vec<LessonProgram>,
    /// Pagination metadata
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_week_serde() {
        assert_eq!(
            serde_json::to_string(&DayOfWeek::Monday).unwrap(),
            r#""monday""#
        );
        let day: DayOfWeek = serde_json::from_str(r#""friday""#).unwrap();
        assert_eq!(day, DayOfWeek::Friday);
    }

    #[test]
    fn test_create_dto_requires_lessons() {
        let dto = CreateLessonProgramDto {
            day: DayOfWeek::Monday,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            stop_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            education_term_id: EducationTermId::new(),
            lesson_ids: vec![],
        };
        assert!(dto.validate().is_err());

        let dto = CreateLessonProgramDto {
            lesson_ids: vec![LessonId::new()],
            ..dto
        };
        assert!(dto.validate().is_ok());
    }
}
