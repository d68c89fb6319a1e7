use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use lectern_core::AppError;
use lectern_models::ids::UserId;
use lectern_models::users::{
    ChooseLessonProgramsDto, CreateStudentDto, PaginatedUsersResponse, UpdateStudentSelfDto, User,
    UserRole,
};

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{check_any_role, check_role};
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{StudentFilterParams, UpdateStudentStatusDto};
use super::service::StudentService;

/// Create a student account
#[utoipa::path(
    post,
    path = "/api/students",
    summary = "Create student",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created successfully", body = User),
        (status = 400, description = "Invalid input or advisor teacher is not an advisor"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role"),
        (status = 404, description = "Advisor teacher not found"),
        (status = 409, description = "Unique property taken")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    let student = StudentService::create_student(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Get all students
#[utoipa::path(
    get,
    path = "/api/students",
    summary = "List students",
    params(StudentFilterParams),
    responses(
        (status = 200, description = "Paginated list of students", body = PaginatedUsersResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, filters))]
pub async fn get_students(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(filters): Query<StudentFilterParams>,
) -> Result<Json<PaginatedUsersResponse>, AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    let response =
        StudentService::get_students(&state.db, filters.name, filters.pagination).await?;
    Ok(Json(response))
}

/// Update the authenticated student's own profile
#[utoipa::path(
    patch,
    path = "/api/students/me",
    summary = "Update own profile",
    request_body = UpdateStudentSelfDto,
    responses(
        (status = 200, description = "Profile updated successfully", body = User),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires student role, or built-in account"),
        (status = 409, description = "Unique property taken")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_student_self(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateStudentSelfDto>,
) -> Result<Json<User>, AppError> {
    check_role(&auth_user, UserRole::Student)?;

    let student =
        StudentService::update_student_self(&state.db, auth_user.user_id()?, dto).await?;
    Ok(Json(student))
}

/// Choose lesson programs for the authenticated student
#[utoipa::path(
    post,
    path = "/api/students/me/lesson-programs",
    summary = "Choose lesson programs",
    request_body = ChooseLessonProgramsDto,
    responses(
        (status = 200, description = "Lesson programs chosen", body = MessageResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires student role"),
        (status = 404, description = "Lesson program not found"),
        (status = 409, description = "Schedule conflict")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn choose_lesson_programs(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChooseLessonProgramsDto>,
) -> Result<Json<MessageResponse>, AppError> {
    check_role(&auth_user, UserRole::Student)?;

    StudentService::add_lesson_programs(&state.db, auth_user.user_id()?, dto).await?;
    Ok(Json(MessageResponse {
        message: "Lesson programs chosen successfully.".to_string(),
    }))
}

/// Get a student by ID
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    summary = "Get student by ID",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student details", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    let student = StudentService::get_student_by_id(&state.db, UserId::from(id)).await?;
    Ok(Json(student))
}

/// Replace a student's profile
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    summary = "Update student",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    request_body = CreateStudentDto,
    responses(
        (status = 200, description = "Student updated successfully", body = User),
        (status = 400, description = "Invalid input or advisor teacher is not an advisor"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role, or built-in account"),
        (status = 404, description = "Student or advisor teacher not found"),
        (status = 409, description = "Unique property taken")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<Json<User>, AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    let student = StudentService::update_student(&state.db, UserId::from(id), dto).await?;
    Ok(Json(student))
}

/// Activate or deactivate a student
#[utoipa::path(
    patch,
    path = "/api/students/{id}/status",
    summary = "Update student status",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    request_body = UpdateStudentStatusDto,
    responses(
        (status = 200, description = "Status updated successfully", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_student_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentStatusDto>,
) -> Result<Json<User>, AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    let student =
        StudentService::update_student_status(&state.db, UserId::from(id), dto.is_active).await?;
    Ok(Json(student))
}
