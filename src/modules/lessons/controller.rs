use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use lectern_core::AppError;
use lectern_models::ids::LessonId;
use lectern_models::lessons::{
    CreateLessonDto, Lesson, LessonFilterParams, PaginatedLessonsResponse,
};
use lectern_models::users::UserRole;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_any_role;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::LessonService;

/// Create a lesson
#[utoipa::path(
    post,
    path = "/api/lessons",
    summary = "Create lesson",
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Lesson created successfully", body = Lesson),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role"),
        (status = 409, description = "Lesson name already taken")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_lesson(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateLessonDto>,
) -> Result<(StatusCode, Json<Lesson>), AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    let lesson = LessonService::create_lesson(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

/// Get paginated lessons
#[utoipa::path(
    get,
    path = "/api/lessons",
    summary = "List lessons",
    params(LessonFilterParams),
    responses(
        (status = 200, description = "List of lessons", body = PaginatedLessonsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teaching staff role")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_lessons(
    State(state): State<AppState>,
    Query(filters): Query<LessonFilterParams>,
) -> Result<Json<PaginatedLessonsResponse>, AppError> {
    let lessons = LessonService::get_lessons(&state.db, filters).await?;
    Ok(Json(lessons))
}

/// Get a lesson by name
#[utoipa::path(
    get,
    path = "/api/lessons/by-name/{name}",
    summary = "Get lesson by name",
    params(
        ("name" = String, Path, description = "Lesson name")
    ),
    responses(
        (status = 200, description = "Lesson details", body = Lesson),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teaching staff role"),
        (status = 404, description = "Lesson not found")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_lesson_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = LessonService::get_lesson_by_name(&state.db, &name).await?;
    Ok(Json(lesson))
}

/// Delete a lesson
#[utoipa::path(
    delete,
    path = "/api/lessons/{id}",
    summary = "Delete lesson",
    params(
        ("id" = Uuid, Path, description = "Lesson ID")
    ),
    responses(
        (status = 204, description = "Lesson deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role"),
        (status = 404, description = "Lesson not found")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_lesson(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    LessonService::delete_lesson(&state.db, LessonId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
