use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use lectern_core::AppError;
use lectern_models::education_terms::{
    CreateEducationTermDto, EducationTerm, EducationTermFilterParams,
    PaginatedEducationTermsResponse,
};
use lectern_models::ids::EducationTermId;
use lectern_models::users::UserRole;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_any_role;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::EducationTermService;

/// Create an education term
#[utoipa::path(
    post,
    path = "/api/education-terms",
    summary = "Create education term",
    request_body = CreateEducationTermDto,
    responses(
        (status = 201, description = "Education term created successfully", body = EducationTerm),
        (status = 400, description = "Dates are internally inconsistent"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role"),
        (status = 409, description = "Duplicate tag or overlapping dates")
    ),
    tag = "Education Terms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_education_term(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateEducationTermDto>,
) -> Result<(StatusCode, Json<EducationTerm>), AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    let term = EducationTermService::create_education_term(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(term)))
}

/// Get paginated education terms
#[utoipa::path(
    get,
    path = "/api/education-terms",
    summary = "List education terms",
    params(EducationTermFilterParams),
    responses(
        (status = 200, description = "List of education terms", body = PaginatedEducationTermsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Education Terms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_education_terms(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<EducationTermFilterParams>,
) -> Result<Json<PaginatedEducationTermsResponse>, AppError> {
    let terms = EducationTermService::get_education_terms(&state.db, filters).await?;
    Ok(Json(terms))
}

/// Get an education term by ID
#[utoipa::path(
    get,
    path = "/api/education-terms/{id}",
    summary = "Get education term by ID",
    params(
        ("id" = Uuid, Path, description = "Education term ID")
    ),
    responses(
        (status = 200, description = "Education term details", body = EducationTerm),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Education term not found")
    ),
    tag = "Education Terms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_education_term_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<EducationTerm>, AppError> {
    let term =
        EducationTermService::get_education_term_by_id(&state.db, EducationTermId::from(id))
            .await?;
    Ok(Json(term))
}

/// Replace an education term
#[utoipa::path(
    put,
    path = "/api/education-terms/{id}",
    summary = "Update education term",
    params(
        ("id" = Uuid, Path, description = "Education term ID")
    ),
    request_body = CreateEducationTermDto,
    responses(
        (status = 200, description = "Education term updated successfully", body = EducationTerm),
        (status = 400, description = "Dates are internally inconsistent"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role"),
        (status = 404, description = "Education term not found"),
        (status = 409, description = "Duplicate tag or overlapping dates")
    ),
    tag = "Education Terms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_education_term(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateEducationTermDto>,
) -> Result<Json<EducationTerm>, AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    let term =
        EducationTermService::update_education_term(&state.db, EducationTermId::from(id), dto)
            .await?;
    Ok(Json(term))
}

/// Delete an education term
#[utoipa::path(
    delete,
    path = "/api/education-terms/{id}",
    summary = "Delete education term",
    params(
        ("id" = Uuid, Path, description = "Education term ID")
    ),
    responses(
        (status = 204, description = "Education term deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires admin or manager role"),
        (status = 404, description = "Education term not found")
    ),
    tag = "Education Terms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_education_term(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Manager])?;

    EducationTermService::delete_education_term(&state.db, EducationTermId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
