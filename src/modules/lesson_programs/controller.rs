use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use lectern_core::AppError;
use lectern_models::ids::LessonProgramId;
use lectern_models::lesson_programs::{
    CreateLessonProgramDto, LessonProgram, LessonProgramFilterParams, LessonProgramWithLessons,
    PaginatedLessonProgramsResponse,
};
use lectern_models::users::UserRole;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_any_role;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::LessonProgramService;

/// Create a lesson program
#[utoipa::path(
    post,
    path = "/api/lesson-programs",
    summary = "Create lesson program",
    request_body = CreateLessonProgramDto,
    responses(
        (status = 201, description = "Lesson program created successfully", body = LessonProgramWithLessons),
        (status = 400, description = "Invalid input or inverted time range"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role"),
        (status = 404, description = "Education term or lesson not found")
    ),
    tag = "Lesson Programs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_lesson_program(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateLessonProgramDto>,
) -> Result<(StatusCode, Json<LessonProgramWithLessons>), AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    let program = LessonProgramService::create_lesson_program(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(program)))
}

/// Get paginated lesson programs
#[utoipa::path(
    get,
    path = "/api/lesson-programs",
    summary = "List lesson programs",
    params(LessonProgramFilterParams),
    responses(
        (status = 200, description = "List of lesson programs", body = PaginatedLessonProgramsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Lesson Programs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_lesson_programs(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<LessonProgramFilterParams>,
) -> Result<Json<PaginatedLessonProgramsResponse>, AppError> {
    let programs = LessonProgramService::get_lesson_programs(&state.db, filters).await?;
    Ok(Json(programs))
}

/// Get lesson programs linked to at least one user
#[utoipa::path(
    get,
    path = "/api/lesson-programs/assigned",
    summary = "List assigned lesson programs",
    responses(
        (status = 200, description = "Programs linked to a teacher or student", body = Vec<LessonProgram>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Lesson Programs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_assigned_lesson_programs(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<LessonProgram>>, AppError> {
    let programs = LessonProgramService::get_assigned_lesson_programs(&state.db).await?;
    Ok(Json(programs))
}

/// Get lesson programs not linked to any user
#[utoipa::path(
    get,
    path = "/api/lesson-programs/unassigned",
    summary = "List unassigned lesson programs",
    responses(
        (status = 200, description = "Programs with no teacher or student", body = Vec<LessonProgram>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Lesson Programs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_unassigned_lesson_programs(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<LessonProgram>>, AppError> {
    let programs = LessonProgramService::get_unassigned_lesson_programs(&state.db).await?;
    Ok(Json(programs))
}

/// Get a lesson program by ID
#[utoipa::path(
    get,
    path = "/api/lesson-programs/{id}",
    summary = "Get lesson program by ID",
    params(
        ("id" = Uuid, Path, description = "Lesson program ID")
    ),
    responses(
        (status = 200, description = "Lesson program details", body = LessonProgramWithLessons),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Lesson program not found")
    ),
    tag = "Lesson Programs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_lesson_program_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<LessonProgramWithLessons>, AppError> {
    let program =
        LessonProgramService::get_lesson_program_by_id(&state.db, LessonProgramId::from(id))
            .await?;
    Ok(Json(program))
}

/// Delete a lesson program
#[utoipa::path(
    delete,
    path = "/api/lesson-programs/{id}",
    summary = "Delete lesson program",
    params(
        ("id" = Uuid, Path, description = "Lesson program ID")
    ),
    responses(
        (status = 204, description = "Lesson program deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role"),
        (status = 404, description = "Lesson program not found")
    ),
    tag = "Lesson Programs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_lesson_program(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    LessonProgramService::delete_lesson_program(&state.db, LessonProgramId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
