use sqlx::PgPool;
use tracing::instrument;

use lectern_core::{AppError, hash_password};
use lectern_models::ids::UserId;
use lectern_models::users::{ChooseLessonProgramsDto, CreateTeacherDto, User, UserRole};

use crate::modules::lesson_programs::service::LessonProgramService;
use crate::modules::users::service::{USER_COLUMNS, UserService};

pub struct TeacherService;

impl TeacherService {
    /// Fetch a teacher account, 404 for anything else.
    async fn get_teacher_row(db: &PgPool, teacher_id: UserId) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND role = 'teacher'"
        ))
        .bind(teacher_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))?;

        Ok(user)
    }

    /// Create a teacher account, optionally with an initial set of lesson
    /// programs. The role field in the DTO is ignored.
    #[instrument(skip(db, dto))]
    pub async fn create_teacher(db: &PgPool, dto: CreateTeacherDto) -> Result<User, AppError> {
        UserService::check_unique_properties(
            db,
            &dto.user.username,
            &dto.user.ssn,
            &dto.user.phone_number,
            &dto.user.email,
            None,
        )
        .await?;

        let hashed_password = hash_password(&dto.user.password)?;

        let teacher = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, name, surname, birth_day, birth_place, ssn,
                                phone_number, email, password, gender, role, is_advisor)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.user.username)
        .bind(&dto.user.name)
        .bind(&dto.user.surname)
        .bind(dto.user.birth_day)
        .bind(&dto.user.birth_place)
        .bind(&dto.user.ssn)
        .bind(&dto.user.phone_number)
        .bind(&dto.user.email)
        .bind(&hashed_password)
        .bind(dto.user.gender)
        .bind(UserRole::Teacher)
        .bind(dto.is_advisor_teacher)
        .fetch_one(db)
        .await?;

        if !dto.lesson_program_ids.is_empty() {
            LessonProgramService::attach_programs_to_user(db, teacher.id, &dto.lesson_program_ids)
                .await?;
        }

        Ok(teacher)
    }

    #[instrument(skip(db))]
    pub async fn get_teacher_by_id(db: &PgPool, teacher_id: UserId) -> Result<User, AppError> {
        Self::get_teacher_row(db, teacher_id).await
    }

    /// Replace a teacher's profile. Demoting an advisor detaches their
    /// advisees.
    #[instrument(skip(db, dto))]
    pub async fn update_teacher(
        db: &PgPool,
        teacher_id: UserId,
        dto: CreateTeacherDto,
    ) -> Result<User, AppError> {
        let existing = Self::get_teacher_row(db, teacher_id).await?;

        if existing.built_in {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Built-in accounts cannot be updated"
            )));
        }

        UserService::check_unique_properties(
            db,
            &dto.user.username,
            &dto.user.ssn,
            &dto.user.phone_number,
            &dto.user.email,
            Some(teacher_id),
        )
        .await?;

        let hashed_password = hash_password(&dto.user.password)?;

        let mut tx = db.begin().await?;

        let teacher = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET username = $1, name = $2, surname = $3, birth_day = $4, birth_place = $5,
                 ssn = $6, phone_number = $7, email = $8, password = $9, gender = $10,
                 is_advisor = $11, updated_at = NOW()
             WHERE id = $12
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.user.username)
        .bind(&dto.user.name)
        .bind(&dto.user.surname)
        .bind(dto.user.birth_day)
        .bind(&dto.user.birth_place)
        .bind(&dto.user.ssn)
        .bind(&dto.user.phone_number)
        .bind(&dto.user.email)
        .bind(&hashed_password)
        .bind(dto.user.gender)
        .bind(dto.is_advisor_teacher)
        .bind(teacher_id)
        .fetch_one(&mut *tx)
        .await?;

        if existing.is_advisor && !dto.is_advisor_teacher {
            sqlx::query(
                "UPDATE users SET advisor_teacher_id = NULL, updated_at = NOW()
                 WHERE advisor_teacher_id = $1",
            )
            .bind(teacher_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        if !dto.lesson_program_ids.is_empty() {
            LessonProgramService::attach_programs_to_user(db, teacher.id, &dto.lesson_program_ids)
                .await?;
        }

        Ok(teacher)
    }

    /// Attach lesson programs to a teacher's weekly schedule.
    #[instrument(skip(db, dto))]
    pub async fn add_lesson_programs(
        db: &PgPool,
        teacher_id: UserId,
        dto: ChooseLessonProgramsDto,
    ) -> Result<(), AppError> {
        Self::get_teacher_row(db, teacher_id).await?;
        LessonProgramService::attach_programs_to_user(db, teacher_id, &dto.lesson_program_ids)
            .await
    }

    /// Grant a teacher advisor duty.
    #[instrument(skip(db))]
    pub async fn save_advisor_teacher(db: &PgPool, teacher_id: UserId) -> Result<User, AppError> {
        let existing = Self::get_teacher_row(db, teacher_id).await?;

        if existing.is_advisor {
            return Err(AppError::conflict(anyhow::anyhow!(
                "This teacher is already an advisor"
            )));
        }

        let teacher = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET is_advisor = TRUE, updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(teacher_id)
        .fetch_one(db)
        .await?;

        Ok(teacher)
    }

    /// All teachers currently acting as advisors.
    #[instrument(skip(db))]
    pub async fn get_advisor_teachers(db: &PgPool) -> Result<Vec<User>, AppError> {
        let advisors = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE role = 'teacher' AND is_advisor = TRUE
             ORDER BY surname, name"
        ))
        .fetch_all(db)
        .await?;

        Ok(advisors)
    }

    /// Revoke a teacher's advisor duty and detach their advisees.
    #[instrument(skip(db))]
    pub async fn delete_advisor_teacher(
        db: &PgPool,
        teacher_id: UserId,
    ) -> Result<User, AppError> {
        let existing = Self::get_teacher_row(db, teacher_id).await?;

        if !existing.is_advisor {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "This teacher is not an advisor"
            )));
        }

        let mut tx = db.begin().await?;

        let teacher = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET is_advisor = FALSE, updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(teacher_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE users SET advisor_teacher_id = NULL, updated_at = NOW()
             WHERE advisor_teacher_id = $1",
        )
        .bind(teacher_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(teacher)
    }

    /// Students advised by the given teacher.
    #[instrument(skip(db))]
    pub async fn get_advisees(db: &PgPool, teacher_id: UserId) -> Result<Vec<User>, AppError> {
        let students = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE role = 'student' AND advisor_teacher_id = $1
             ORDER BY student_number"
        ))
        .bind(teacher_id)
        .fetch_all(db)
        .await?;

        Ok(students)
    }
}
