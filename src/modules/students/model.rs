//! Student data models and DTOs.
//!
//! Students share the user models in the `lectern-models` crate.

use lectern_core::PaginationParams;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub use lectern_models::users::{
    ChooseLessonProgramsDto, CreateStudentDto, PaginatedUsersResponse, UpdateStudentSelfDto, User,
};

/// Query parameters for listing students.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct StudentFilterParams {
    /// Case-insensitive substring match on name
    pub name: Option<String>,
    /// Pagination parameters
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// DTO for activating or deactivating a student account.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentStatusDto {
    /// Whether the student account is active
    pub is_active: bool,
}
