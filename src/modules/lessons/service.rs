use sqlx::PgPool;
use tracing::instrument;

use lectern_core::{AppError, PaginationMeta};
use lectern_models::ids::LessonId;
use lectern_models::lessons::{
    CreateLessonDto, Lesson, LessonFilterParams, PaginatedLessonsResponse,
};

const LESSON_COLUMNS: &str =
    "id, lesson_name, credit_score, is_compulsory, created_at, updated_at";

pub struct LessonService;

impl LessonService {
    /// Create a lesson. The name is unique across the catalog.
    #[instrument(skip(db, dto))]
    pub async fn create_lesson(db: &PgPool, dto: CreateLessonDto) -> Result<Lesson, AppError> {
        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "INSERT INTO lessons (lesson_name, credit_score, is_compulsory)
             VALUES ($1, $2, $3)
             RETURNING {LESSON_COLUMNS}"
        ))
        .bind(&dto.lesson_name)
        .bind(dto.credit_score)
        .bind(dto.is_compulsory)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
                && db_err.message().contains("unique_lesson_name")
            {
                return AppError::conflict(anyhow::anyhow!(
                    "A lesson with this name already exists"
                ));
            }
            AppError::from(e)
        })?;

        Ok(lesson)
    }

    /// Get paginated lessons, optionally filtered by the compulsory flag.
    #[instrument(skip(db))]
    pub async fn get_lessons(
        db: &PgPool,
        filters: LessonFilterParams,
    ) -> Result<PaginatedLessonsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM lessons
             WHERE ($1::bool IS NULL OR is_compulsory = $1)",
        )
        .bind(filters.is_compulsory)
        .fetch_one(db)
        .await?;

        let lessons = sqlx::query_as::<_, Lesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons
             WHERE ($1::bool IS NULL OR is_compulsory = $1)
             ORDER BY lesson_name ASC
             LIMIT $2 OFFSET $3"
        ))
        .bind(filters.is_compulsory)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let has_more = offset + limit < total;

        Ok(PaginatedLessonsResponse {
            data: lessons,
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
    pub async fn get_lesson_by_name(db: &PgPool, lesson_name: &str) -> Result<Lesson, AppError> {
        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE lesson_name = $1"
        ))
        .bind(lesson_name)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lesson not found")))?;

        Ok(lesson)
    }

    /// Resolve a list of lesson IDs, failing if any is unknown.
    pub(crate) async fn get_lessons_by_ids(
        db: &PgPool,
        lesson_ids: &[LessonId],
    ) -> Result<Vec<Lesson>, AppError> {
        let lessons = sqlx::query_as::<_, Lesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE id = ANY($1)"
        ))
        .bind(lesson_ids)
        .fetch_all(db)
        .await?;

        if lessons.len() != lesson_ids.len() {
            return Err(AppError::not_found(anyhow::anyhow!(
                "One or more lessons not found"
            )));
        }

        Ok(lessons)
    }

    #[instrument(skip(db))]
    pub async fn delete_lesson(db: &PgPool, lesson_id: LessonId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(lesson_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Lesson not found")));
        }

        Ok(())
    }
}
