use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use lectern_core::{AppError, PaginationMeta};
use lectern_models::education_terms::{
    CreateEducationTermDto, EducationTerm, EducationTermFilterParams,
    PaginatedEducationTermsResponse, Term,
};
use lectern_models::ids::EducationTermId;

use super::validation::{
    CandidateTerm, CommittedTerm, TermValidationError, validate_candidate,
};

const TERM_COLUMNS: &str =
    "id, term, start_date, end_date, last_registration_date, created_at, updated_at";

pub struct EducationTermService;

impl EducationTermService {
    fn candidate_from_dto(dto: &CreateEducationTermDto) -> CandidateTerm {
        CandidateTerm {
            term: dto.term,
            start_date: dto.start_date,
            end_date: dto.end_date,
            last_registration_date: dto.last_registration_date,
        }
    }

    fn map_validation_error(err: TermValidationError) -> AppError {
        match err {
            TermValidationError::DateOrder(_) => {
                AppError::bad_request(anyhow::anyhow!("{}", err))
            }
            TermValidationError::DuplicateTag | TermValidationError::Overlap => {
                AppError::conflict(anyhow::anyhow!("{}", err))
            }
        }
    }

    /// Fetch the committed terms sharing the candidate's year, minus the
    /// record being replaced on update.
    async fn committed_terms_for_year(
        db: &PgPool,
        year: i32,
        exclude_id: Option<EducationTermId>,
    ) -> Result<Vec<CommittedTerm>, AppError> {
        let rows = sqlx::query_as::<_, (Term, NaiveDate, NaiveDate)>(
            "SELECT term, start_date, end_date FROM education_terms
             WHERE date_part('year', start_date)::int = $1
               AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(year)
        .bind(exclude_id)
        .fetch_all(db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(term, start_date, end_date)| CommittedTerm {
                term,
                start_date,
                end_date,
            })
            .collect())
    }

    /// Create an education term after validating it against the committed
    /// terms of its year.
    #[instrument(skip(db, dto))]
    pub async fn create_education_term(
        db: &PgPool,
        dto: CreateEducationTermDto,
    ) -> Result<EducationTerm, AppError> {
        let candidate = Self::candidate_from_dto(&dto);
        let existing = Self::committed_terms_for_year(db, candidate.year(), None).await?;

        validate_candidate(&candidate, &existing).map_err(Self::map_validation_error)?;

        let term = sqlx::query_as::<_, EducationTerm>(&format!(
            "INSERT INTO education_terms (term, start_date, end_date, last_registration_date)
             VALUES ($1, $2, $3, $4)
             RETURNING {TERM_COLUMNS}"
        ))
        .bind(dto.term)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(dto.last_registration_date)
        .fetch_one(db)
        .await?;

        Ok(term)
    }

    /// Get paginated education terms, optionally filtered by label and year.
    #[instrument(skip(db))]
    pub async fn get_education_terms(
        db: &PgPool,
        filters: EducationTermFilterParams,
    ) -> Result<PaginatedEducationTermsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM education_terms
             WHERE ($1::term_label IS NULL OR term = $1)
               AND ($2::int IS NULL OR date_part('year', start_date)::int = $2)",
        )
        .bind(filters.term)
        .bind(filters.year)
        .fetch_one(db)
        .await?;

        let terms = sqlx::query_as::<_, EducationTerm>(&format!(
            "SELECT {TERM_COLUMNS} FROM education_terms
             WHERE ($1::term_label IS NULL OR term = $1)
               AND ($2::int IS NULL OR date_part('year', start_date)::int = $2)
             ORDER BY start_date ASC
             LIMIT $3 OFFSET $4"
        ))
        .bind(filters.term)
        .bind(filters.year)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let has_more = offset + limit < total;

        Ok(PaginatedEducationTermsResponse {
            data: terms,
            meta: PaginationMeta {
                total,
                limit,
                offset: Some(offset),
                page: filters.pagination.page(),
                has_more,
            },
        })
    }

    #[instrument(skip(db))]
    pub async fn get_education_term_by_id(
        db: &PgPool,
        term_id: EducationTermId,
    ) -> Result<EducationTerm, AppError> {
        let term = sqlx::query_as::<_, EducationTerm>(&format!(
            "SELECT {TERM_COLUMNS} FROM education_terms WHERE id = $1"
        ))
        .bind(term_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Education term not found")))?;

        Ok(term)
    }

    /// Replace an education term. The replacement is validated against the
    /// committed terms of its (possibly new) year, excluding its own
    /// previous row.
    #[instrument(skip(db, dto))]
    pub async fn update_education_term(
        db: &PgPool,
        term_id: EducationTermId,
        dto: CreateEducationTermDto,
    ) -> Result<EducationTerm, AppError> {
        // 404 before validation errors for a missing record.
        Self::get_education_term_by_id(db, term_id).await?;

        let candidate = Self::candidate_from_dto(&dto);
        let existing =
            Self::committed_terms_for_year(db, candidate.year(), Some(term_id)).await?;

        validate_candidate(&candidate, &existing).map_err(Self::map_validation_error)?;

        let term = sqlx::query_as::<_, EducationTerm>(&format!(
            "UPDATE education_terms
             SET term = $1, start_date = $2, end_date = $3, last_registration_date = $4,
                 updated_at = NOW()
             WHERE id = $5
             RETURNING {TERM_COLUMNS}"
        ))
        .bind(dto.term)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(dto.last_registration_date)
        .bind(term_id)
        .fetch_one(db)
        .await?;

        Ok(term)
    }

    /// Delete an education term. Lesson programs tied to it go with it.
    #[instrument(skip(db))]
    pub async fn delete_education_term(
        db: &PgPool,
        term_id: EducationTermId,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM education_terms WHERE id = $1")
            .bind(term_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Education term not found"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::NaiveDate;

    fn dto() -> CreateEducationTermDto {
        CreateEducationTermDto {
            term: Term::Fall,
            start_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            last_registration_date: NaiveDate::from_ymd_opt(2024, 8, 20).unwrap(),
        }
    }

    #[test]
    fn test_candidate_mirrors_dto() {
        let candidate = EducationTermService::candidate_from_dto(&dto());
        assert_eq!(candidate.term, Term::Fall);
        assert_eq!(candidate.year(), 2024);
    }

    #[test]
    fn test_date_order_maps_to_bad_request() {
        let err = EducationTermService::map_validation_error(TermValidationError::DateOrder(
            super::super::validation::END_BEFORE_START,
        ));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.error.to_string().contains("end date"));
    }

    #[test]
    fn test_duplicate_and_overlap_map_to_conflict() {
        let err = EducationTermService::map_validation_error(TermValidationError::DuplicateTag);
        assert_eq!(err.status, StatusCode::CONFLICT);

        let err = EducationTermService::map_validation_error(TermValidationError::Overlap);
        assert_eq!(err.status, StatusCode::CONFLICT);
    }
}
