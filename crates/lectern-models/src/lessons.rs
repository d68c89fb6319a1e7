//! Lesson domain models and DTOs.

use crate::ids::LessonId;
use chrono::{DateTime, Utc};
use lectern_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Lesson entity (a course offering, e.g., "Mathematics").
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lesson {
    /// Unique identifier for the lesson
    pub id: LessonId,
    /// Lesson name, unique across the system
    pub lesson_name: String,
    /// Credit score awarded for the lesson
    pub credit_score: i32,
    /// Whether the lesson is compulsory
    pub is_compulsory: bool,
    /// Timestamp when the lesson was created
    pub created_at: DateTime<Utc>,
    /// Timestamp when the lesson was last updated
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a lesson.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLessonDto {
    /// Lesson name (2-100 characters, unique)
    #[validate(length(min = 2, max = 100))]
    pub lesson_name: String,
    /// Credit score awarded for the lesson
    #[validate(range(min = 0))]
    pub credit_score: i32,
    /// Whether the lesson is compulsory (defaults to true)
    #[serde(default = "default_compulsory")]
    pub is_compulsory: bool,
}

fn default_compulsory() -> bool {
    true
}

/// Query parameters for listing lessons.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct LessonFilterParams {
    /// Filter by compulsory flag
    pub is_compulsory: Option<bool>,
    /// Pagination parameters
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated response containing lessons.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedLessonsResponse {
    /// List of lessons
    pub data: Vec<Lesson>,
    /// Pagination metadata
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_lesson_dto_validation() {
        let valid = CreateLessonDto {
            lesson_name: "Mathematics".to_string(),
            credit_score: 4,
            is_compulsory: true,
        };
        assert!(valid.validate().is_ok());

        let short_name = CreateLessonDto {
            lesson_name: "M".to_string(),
            credit_score: 4,
            is_compulsory: true,
        };
        assert!(short_name.validate().is_err());

        let negative_credit = CreateLessonDto {
            lesson_name: "Physics".to_string(),
            credit_score: -1,
            is_compulsory: false,
        };
        assert!(negative_credit.validate().is_err());
    }

    #[test]
    fn test_is_compulsory_defaults_to_true() {
        let json = r#"{"lesson_name":"Chemistry","credit_score":3}"#;
        let dto: CreateLessonDto = serde_json::from_str(json).unwrap();
        assert!(dto.is_compulsory);
    }
}
