use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use lectern_core::AppError;
use lectern_models::ids::UserId;
use lectern_models::users::{ChooseLessonProgramsDto, CreateTeacherDto, User, UserRole};

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{check_any_role, check_role};
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::TeacherService;

/// Create a teacher account
#[utoipa::path(
    post,
    path = "/api/teachers",
    summary = "Create teacher",
    request_body = CreateTeacherDto,
    responses(
        (status = 201, description = "Teacher created successfully", body = User),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role"),
        (status = 409, description = "Unique property taken or schedule conflict")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateTeacherDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    let teacher = TeacherService::create_teacher(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

/// Get all advisor teachers
#[utoipa::path(
    get,
    path = "/api/teachers/advisors",
    summary = "List advisor teachers",
    responses(
        (status = 200, description = "List of advisor teachers", body = Vec<User>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_advisor_teachers(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<User>>, AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    let advisors = TeacherService::get_advisor_teachers(&state.db).await?;
    Ok(Json(advisors))
}

/// Grant a teacher advisor duty
#[utoipa::path(
    post,
    path = "/api/teachers/advisors/{id}",
    summary = "Grant advisor duty",
    params(
        ("id" = Uuid, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Advisor duty granted", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role"),
        (status = 404, description = "Teacher not found"),
        (status = 409, description = "Teacher is already an advisor")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn save_advisor_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    let teacher = TeacherService::save_advisor_teacher(&state.db, UserId::from(id)).await?;
    Ok(Json(teacher))
}

/// Revoke a teacher's advisor duty
#[utoipa::path(
    delete,
    path = "/api/teachers/advisors/{id}",
    summary = "Revoke advisor duty",
    params(
        ("id" = Uuid, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Advisor duty revoked", body = User),
        (status = 400, description = "Teacher is not an advisor"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role"),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_advisor_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    let teacher = TeacherService::delete_advisor_teacher(&state.db, UserId::from(id)).await?;
    Ok(Json(teacher))
}

/// Get the authenticated teacher's advisees
#[utoipa::path(
    get,
    path = "/api/teachers/me/advisees",
    summary = "List own advisees",
    responses(
        (status = 200, description = "Students advised by the caller", body = Vec<User>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teacher role")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_my_advisees(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<User>>, AppError> {
    check_role(&auth_user, UserRole::Teacher)?;

    let students = TeacherService::get_advisees(&state.db, auth_user.user_id()?).await?;
    Ok(Json(students))
}

/// Get a teacher by ID
#[utoipa::path(
    get,
    path = "/api/teachers/{id}",
    summary = "Get teacher by ID",
    params(
        ("id" = Uuid, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Teacher details", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role"),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_teacher_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    let teacher = TeacherService::get_teacher_by_id(&state.db, UserId::from(id)).await?;
    Ok(Json(teacher))
}

/// Replace a teacher's profile
#[utoipa::path(
    put,
    path = "/api/teachers/{id}",
    summary = "Update teacher",
    params(
        ("id" = Uuid, Path, description = "Teacher ID")
    ),
    request_body = CreateTeacherDto,
    responses(
        (status = 200, description = "Teacher updated successfully", body = User),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role, or built-in account"),
        (status = 404, description = "Teacher not found"),
        (status = 409, description = "Unique property taken or schedule conflict")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateTeacherDto>,
) -> Result<Json<User>, AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    let teacher = TeacherService::update_teacher(&state.db, UserId::from(id), dto).await?;
    Ok(Json(teacher))
}

/// Attach lesson programs to a teacher
#[utoipa::path(
    post,
    path = "/api/teachers/{id}/lesson-programs",
    summary = "Assign lesson programs",
    params(
        ("id" = Uuid, Path, description = "Teacher ID")
    ),
    request_body = ChooseLessonProgramsDto,
    responses(
        (status = 200, description = "Lesson programs assigned", body = MessageResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role"),
        (status = 404, description = "Teacher or lesson program not found"),
        (status = 409, description = "Schedule conflict")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn add_teacher_lesson_programs(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<ChooseLessonProgramsDto>,
) -> Result<Json<MessageResponse>, AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    TeacherService::add_lesson_programs(&state.db, UserId::from(id), dto).await?;
    Ok(Json(MessageResponse {
        message: "Lesson programs assigned successfully.".to_string(),
    }))
}
