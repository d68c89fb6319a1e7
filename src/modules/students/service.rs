use sqlx::PgPool;
use tracing::instrument;

use lectern_core::{AppError, PaginationMeta, PaginationParams, hash_password};
use lectern_models::ids::UserId;
use lectern_models::users::{
    ChooseLessonProgramsDto, CreateStudentDto, PaginatedUsersResponse, UpdateStudentSelfDto, User,
    UserRole,
};

use crate::modules::lesson_programs::service::LessonProgramService;
use crate::modules::users::service::{USER_COLUMNS, UserService};

pub struct StudentService;

impl StudentService {
    /// Fetch a student account, 404 for anything else.
    async fn get_student_row(db: &PgPool, student_id: UserId) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND role = 'student'"
        ))
        .bind(student_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        Ok(user)
    }

    /// The advisor must exist and actually hold advisor duty.
    async fn check_advisor(db: &PgPool, advisor_teacher_id: UserId) -> Result<(), AppError> {
        let is_advisor = sqlx::query_scalar::<_, bool>(
            "SELECT is_advisor FROM users WHERE id = $1 AND role = 'teacher'",
        )
        .bind(advisor_teacher_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Advisor teacher not found")))?;

        if !is_advisor {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "This teacher is not an advisor"
            )));
        }

        Ok(())
    }

    /// Create a student account under an advisor teacher. Student numbers
    /// are assigned sequentially starting at 1000. The role field in the
    /// DTO is ignored.
    #[instrument(skip(db, dto))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<User, AppError> {
        Self::check_advisor(db, dto.advisor_teacher_id).await?;

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

        let student = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, name, surname, birth_day, birth_place, ssn,
                                phone_number, email, password, gender, role,
                                advisor_teacher_id, student_number)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                     (SELECT COALESCE(MAX(student_number), 999) + 1 FROM users))
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
        .bind(UserRole::Student)
        .bind(dto.advisor_teacher_id)
        .fetch_one(db)
        .await?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_student_by_id(db: &PgPool, student_id: UserId) -> Result<User, AppError> {
        Self::get_student_row(db, student_id).await
    }

    /// Paginated list of students, optionally filtered by name.
    #[instrument(skip(db, pagination))]
    pub async fn get_students(
        db: &PgPool,
        name: Option<String>,
        pagination: PaginationParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users
             WHERE role = 'student' AND ($1::text IS NULL OR name ILIKE '%' || $1 || '%')",
        )
        .bind(&name)
        .fetch_one(db)
        .await?;

        let limit = pagination.limit();
        let offset = pagination.offset();

        let students = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE role = 'student' AND ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
             ORDER BY student_number
             LIMIT $2 OFFSET $3"
        ))
        .bind(&name)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let has_more = offset + limit < total;

        Ok(PaginatedUsersResponse {
            data: students,
            meta: PaginationMeta {
                total,
                limit,
                offset: Some(offset),
                page: pagination.page(),
                has_more,
            },
        })
    }

    /// Replace a student's profile and advisor assignment.
    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        student_id: UserId,
        dto: CreateStudentDto,
    ) -> Result<User, AppError> {
        let existing = Self::get_student_row(db, student_id).await?;

        if existing.built_in {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Built-in accounts cannot be updated"
            )));
        }

        Self::check_advisor(db, dto.advisor_teacher_id).await?;

        UserService::check_unique_properties(
            db,
            &dto.user.username,
            &dto.user.ssn,
            &dto.user.phone_number,
            &dto.user.email,
            Some(student_id),
        )
        .await?;

        let hashed_password = hash_password(&dto.user.password)?;

        let student = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET username = $1, name = $2, surname = $3, birth_day = $4, birth_place = $5,
                 ssn = $6, phone_number = $7, email = $8, password = $9, gender = $10,
                 advisor_teacher_id = $11, updated_at = NOW()
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
        .bind(dto.advisor_teacher_id)
        .bind(student_id)
        .fetch_one(db)
        .await?;

        Ok(student)
    }

    /// A student updating their own profile. Password and advisor stay as
    /// they are.
    #[instrument(skip(db, dto))]
    pub async fn update_student_self(
        db: &PgPool,
        student_id: UserId,
        dto: UpdateStudentSelfDto,
    ) -> Result<User, AppError> {
        let existing = Self::get_student_row(db, student_id).await?;

        if existing.built_in {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Built-in accounts cannot be updated"
            )));
        }

        UserService::check_unique_properties(
            db,
            &dto.username,
            &dto.ssn,
            &dto.phone_number,
            &dto.email,
            Some(student_id),
        )
        .await?;

        let student = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET username = $1, name = $2, surname = $3, birth_day = $4, birth_place = $5,
                 ssn = $6, phone_number = $7, email = $8, gender = $9, updated_at = NOW()
             WHERE id = $10
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.username)
        .bind(&dto.name)
        .bind(&dto.surname)
        .bind(dto.birth_day)
        .bind(&dto.birth_place)
        .bind(&dto.ssn)
        .bind(&dto.phone_number)
        .bind(&dto.email)
        .bind(dto.gender)
        .bind(student_id)
        .fetch_one(db)
        .await?;

        Ok(student)
    }

    /// Activate or deactivate a student account.
    #[instrument(skip(db))]
    pub async fn update_student_status(
        db: &PgPool,
        student_id: UserId,
        is_active: bool,
    ) -> Result<User, AppError> {
        Self::get_student_row(db, student_id).await?;

        let student = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET is_active = $1, updated_at = NOW()
             WHERE id = $2
             RETURNING {USER_COLUMNS}"
        ))
        .bind(is_active)
        .bind(student_id)
        .fetch_one(db)
        .await?;

        Ok(student)
    }

    /// Attach lesson programs to a student's weekly schedule.
    #[instrument(skip(db, dto))]
    pub async fn add_lesson_programs(
        db: &PgPool,
        student_id: UserId,
        dto: ChooseLessonProgramsDto,
    ) -> Result<(), AppError> {
        Self::get_student_row(db, student_id).await?;
        LessonProgramService::attach_programs_to_user(db, student_id, &dto.lesson_program_ids)
            .await
    }
}
