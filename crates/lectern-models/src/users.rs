//! User domain models and DTOs.
//!
//! A single `users` table backs every account type; the `role` column
//! (admin, manager, teacher, student) decides what the account may do and
//! which columns are meaningful (`student_number` and `advisor_teacher_id`
//! for students, `is_advisor` for teachers). Accounts flagged `built_in`
//! are seed data and refuse password changes, updates, and deletion.

use crate::ids::{LessonProgramId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use lectern_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// System role assigned to a user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    Teacher,
    Student,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Manager => write!(f, "manager"),
            UserRole::Teacher => write!(f, "teacher"),
            UserRole::Student => write!(f, "student"),
        }
    }
}

/// Gender recorded on a user profile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// A user in the system.
///
/// The password hash is deliberately absent; services that need it select
/// it into a private row type.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub surname: String,
    pub birth_day: NaiveDate,
    pub birth_place: String,
    pub ssn: String,
    pub phone_number: String,
    pub email: String,
    pub gender: Gender,
    pub role: UserRole,
    /// Whether this teacher acts as an advisor (always false for non-teachers)
    pub is_advisor: bool,
    /// The advisor teacher assigned to this student, if any
    pub advisor_teacher_id: Option<UserId>,
    /// Monotonically assigned student number (students only)
    pub student_number: Option<i32>,
    pub is_active: bool,
    /// Seed accounts that refuse mutation and deletion
    pub built_in: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shared profile fields for user create/update requests.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 4, max = 16))]
    pub username: String,
    #[validate(length(min = 2, max = 16))]
    pub name: String,
    #[validate(length(min = 2, max = 16))]
    pub surname: String,
    pub birth_day: NaiveDate,
    #[validate(length(min = 2, max = 16))]
    pub birth_place: String,
    /// Social security number, format NNN-NN-NNNN
    #[validate(length(equal = 11, message = "ssn must match NNN-NN-NNNN"))]
    pub ssn: String,
    /// Phone number, format NNN-NNN-NNNN
    #[validate(length(equal = 12, message = "phone number must match NNN-NNN-NNNN"))]
    pub phone_number: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 60))]
    pub password: String,
    pub gender: Gender,
    /// Role the new account is created with
    pub role: UserRole,
}

/// DTO for creating or replacing a teacher.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTeacherDto {
    #[serde(flatten)]
    #[validate(nested)]
    pub user: CreateUserDto,
    /// Whether the teacher is an advisor teacher
    #[serde(default)]
    pub is_advisor_teacher: bool,
    /// Lesson programs assigned to the teacher
    #[serde(default)]
    pub lesson_program_ids: Vec<LessonProgramId>,
}

/// DTO for creating or replacing a student.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[serde(flatten)]
    #[validate(nested)]
    pub user: CreateUserDto,
    /// The advisor teacher responsible for the student
    pub advisor_teacher_id: UserId,
}

/// DTO for a student updating their own profile.
///
/// Password and role changes go through dedicated endpoints.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentSelfDto {
    #[validate(length(min = 4, max = 16))]
    pub username: String,
    #[validate(length(min = 2, max = 16))]
    pub name: String,
    #[validate(length(min = 2, max = 16))]
    pub surname: String,
    pub birth_day: NaiveDate,
    #[validate(length(min = 2, max = 16))]
    pub birth_place: String,
    #[validate(length(equal = 11, message = "ssn must match NNN-NN-NNNN"))]
    pub ssn: String,
    #[validate(length(equal = 12, message = "phone number must match NNN-NNN-NNNN"))]
    pub phone_number: String,
    #[validate(email)]
    pub email: String,
    pub gender: Gender,
}

/// DTO for attaching lesson programs to a teacher or student.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChooseLessonProgramsDto {
    /// Lesson programs to attach (at least one)
    #[validate(length(min = 1))]
    pub lesson_program_ids: Vec<LessonProgramId>,
}

/// Query parameters for listing users.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct UserFilterParams {
    /// Filter by role
    pub role: Option<UserRole>,
    /// Case-insensitive substring match on name
    pub name: Option<String>,
    /// Pagination parameters
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated response containing users.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    /// List of users
    pub data: Vec<User>,
    /// Pagination metadata
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_user_dto() -> CreateUserDto {
        CreateUserDto {
            username: "jdoe".to_string(),
            name: "John".to_string(),
            surname: "Doe".to_string(),
            birth_day: NaiveDate::from_ymd_opt(1990, 5, 12).unwrap(),
            birth_place: "Springfield".to_string(),
            ssn: "123-45-6789".to_string(),
            phone_number: "555-123-4567".to_string(),
            email: "jdoe@example.com".to_string(),
            password: "supersecret".to_string(),
            gender: Gender::Male,
            role: UserRole::Teacher,
        }
    }

    #[test]
    fn test_user_role_serde() {
        assert_eq!(
            serde_json::to_string(&UserRole::Admin).unwrap(),
            r#""admin""#
        );
        let role: UserRole = serde_json::from_str(r#""student""#).unwrap();
        assert_eq!(role, UserRole::Student);
    }

    #[test]
    fn test_create_user_dto_valid() {
        assert!(valid_user_dto().validate().is_ok());
    }

    #[test]
    fn test_create_user_dto_rejects_bad_ssn() {
        let mut dto = valid_user_dto();
        dto.ssn = "12345-6789".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_user_dto_rejects_bad_phone() {
        let mut dto = valid_user_dto();
        dto.phone_number = "5551234567".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_user_dto_rejects_short_password() {
        let mut dto = valid_user_dto();
        dto.password = "short".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_teacher_dto_validates_nested_user() {
        let mut dto = CreateTeacherDto {
            user: valid_user_dto(),
            is_advisor_teacher: true,
            lesson_program_ids: vec![],
        };
        assert!(dto.validate().is_ok());

        dto.user.email = "not-an-email".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_choose_lesson_programs_requires_ids() {
        let dto = ChooseLessonProgramsDto {
            lesson_program_ids: vec![],
        };
        assert!(dto.validate().is_err());
    }
}
