use sqlx::PgPool;
use tracing::instrument;

use lectern_core::{AppError, PaginationMeta};
use lectern_models::ids::{LessonProgramId, UserId};
use lectern_models::lesson_programs::{
    CreateLessonProgramDto, LessonProgram, LessonProgramFilterParams, LessonProgramWithLessons,
    PaginatedLessonProgramsResponse,
};
use lectern_models::lessons::Lesson;

use crate::modules::education_terms::service::EducationTermService;
use crate::modules::lessons::service::LessonService;

use super::schedule::{ScheduleError, ScheduleSlot, check_no_conflicts};

const PROGRAM_COLUMNS: &str =
    "id, day, start_time, stop_time, education_term_id, created_at, updated_at";

pub struct LessonProgramService;

impl LessonProgramService {
    fn map_schedule_error(err: ScheduleError) -> AppError {
        match err {
            ScheduleError::InvalidTimeRange => AppError::bad_request(anyhow::anyhow!("{}", err)),
            ScheduleError::Conflict => AppError::conflict(anyhow::anyhow!("{}", err)),
        }
    }

    /// Create a lesson program slot with its lessons.
    #[instrument(skip(db, dto))]
    pub async fn create_lesson_program(
        db: &PgPool,
        dto: CreateLessonProgramDto,
    ) -> Result<LessonProgramWithLessons, AppError> {
        if dto.start_time >= dto.stop_time {
            return Err(Self::map_schedule_error(ScheduleError::InvalidTimeRange));
        }

        // 404 for an unknown term before any write.
        EducationTermService::get_education_term_by_id(db, dto.education_term_id).await?;
        let lessons = LessonService::get_lessons_by_ids(db, &dto.lesson_ids).await?;

        let mut tx = db.begin().await?;

        let program = sqlx::query_as::<_, LessonProgram>(&format!(
            "INSERT INTO lesson_programs (day, start_time, stop_time, education_term_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {PROGRAM_COLUMNS}"
        ))
        .bind(dto.day)
        .bind(dto.start_time)
        .bind(dto.stop_time)
        .bind(dto.education_term_id)
        .fetch_one(&mut *tx)
        .await?;

        for lesson in &lessons {
            sqlx::query(
                "INSERT INTO lesson_program_lessons (lesson_program_id, lesson_id)
                 VALUES ($1, $2)",
            )
            .bind(program.id)
            .bind(lesson.id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(LessonProgramWithLessons { program, lessons })
    }

    /// Get paginated lesson programs, optionally filtered by term.
    #[instrument(skip(db))]
    pub async fn get_lesson_programs(
        db: &PgPool,
        filters: LessonProgramFilterParams,
    ) -> Result<PaginatedLessonProgramsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM lesson_programs
             WHERE ($1::uuid IS NULL OR education_term_id = $1)",
        )
        .bind(filters.education_term_id)
        .fetch_one(db)
        .await?;

        let programs = sqlx::query_as::<_, LessonProgram>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM lesson_programs
             WHERE ($1::uuid IS NULL OR education_term_id = $1)
             ORDER BY day, start_time
             LIMIT $2 OFFSET $3"
        ))
        .bind(filters.education_term_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let has_more = offset + limit < total;

        Ok(PaginatedLessonProgramsResponse {
            data: programs,
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
    pub async fn get_lesson_program_by_id(
        db: &PgPool,
        program_id: LessonProgramId,
    ) -> Result<LessonProgramWithLessons, AppError> {
        let program = sqlx::query_as::<_, LessonProgram>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM lesson_programs WHERE id = $1"
        ))
        .bind(program_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lesson program not found")))?;

        let lessons = sqlx::query_as::<_, Lesson>(
            "SELECT l.id, l.lesson_name, l.credit_score, l.is_compulsory, l.created_at, l.updated_at
             FROM lessons l
             JOIN lesson_program_lessons lpl ON lpl.lesson_id = l.id
             WHERE lpl.lesson_program_id = $1
             ORDER BY l.lesson_name",
        )
        .bind(program_id)
        .fetch_all(db)
        .await?;

        Ok(LessonProgramWithLessons { program, lessons })
    }

    /// Programs already linked to at least one teacher or student.
    #[instrument(skip(db))]
    pub async fn get_assigned_lesson_programs(db: &PgPool) -> Result<Vec<LessonProgram>, AppError> {
        let programs = sqlx::query_as::<_, LessonProgram>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM lesson_programs p
             WHERE EXISTS (
                 SELECT 1 FROM user_lesson_programs ulp WHERE ulp.lesson_program_id = p.id
             )
             ORDER BY day, start_time"
        ))
        .fetch_all(db)
        .await?;

        Ok(programs)
    }

    /// Programs not linked to any user yet.
    #[instrument(skip(db))]
    pub async fn get_unassigned_lesson_programs(
        db: &PgPool,
    ) -> Result<Vec<LessonProgram>, AppError> {
        let programs = sqlx::query_as::<_, LessonProgram>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM lesson_programs p
             WHERE NOT EXISTS (
                 SELECT 1 FROM user_lesson_programs ulp WHERE ulp.lesson_program_id = p.id
             )
             ORDER BY day, start_time"
        ))
        .fetch_all(db)
        .await?;

        Ok(programs)
    }

    #[instrument(skip(db))]
    pub async fn delete_lesson_program(
        db: &PgPool,
        program_id: LessonProgramId,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM lesson_programs WHERE id = $1")
            .bind(program_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Lesson program not found"
            )));
        }

        Ok(())
    }

    /// Programs currently linked to a user.
    pub(crate) async fn get_programs_for_user(
        db: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<LessonProgram>, AppError> {
        let programs = sqlx::query_as::<_, LessonProgram>(&format!(
            "SELECT p.{} FROM lesson_programs p
             JOIN user_lesson_programs ulp ON ulp.lesson_program_id = p.id
             WHERE ulp.user_id = $1",
            PROGRAM_COLUMNS.replace(", ", ", p.")
        ))
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(programs)
    }

    /// Resolve a list of program IDs, failing if any is unknown.
    pub(crate) async fn get_programs_by_ids(
        db: &PgPool,
        program_ids: &[LessonProgramId],
    ) -> Result<Vec<LessonProgram>, AppError> {
        let programs = sqlx::query_as::<_, LessonProgram>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM lesson_programs WHERE id = ANY($1)"
        ))
        .bind(program_ids)
        .fetch_all(db)
        .await?;

        if programs.len() != program_ids.len() {
            return Err(AppError::not_found(anyhow::anyhow!(
                "One or more lesson programs not found"
            )));
        }

        Ok(programs)
    }

    /// Link programs to a user after checking their weekly schedule stays
    /// conflict-free.
    pub(crate) async fn attach_programs_to_user(
        db: &PgPool,
        user_id: UserId,
        program_ids: &[LessonProgramId],
    ) -> Result<(), AppError> {
        let new_programs = Self::get_programs_by_ids(db, program_ids).await?;
        let current_programs = Self::get_programs_for_user(db, user_id).await?;

        // Re-attaching an already-linked program must not conflict with itself.
        let current_slots: Vec<ScheduleSlot> = current_programs
            .iter()
            .filter(|p| !program_ids.contains(&p.id))
            .map(ScheduleSlot::from)
            .collect();
        let new_slots: Vec<ScheduleSlot> =
            new_programs.iter().map(ScheduleSlot::from).collect();

        check_no_conflicts(&new_slots, &current_slots).map_err(Self::map_schedule_error)?;

        let mut tx = db.begin().await?;

        for program in &new_programs {
            sqlx::query(
                "INSERT INTO user_lesson_programs (user_id, lesson_program_id)
                 VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(user_id)
            .bind(program.id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
