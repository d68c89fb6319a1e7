use sqlx::PgPool;
use tracing::instrument;

use lectern_core::{AppError, PaginationMeta, hash_password};
use lectern_models::ids::UserId;
use lectern_models::users::{
    CreateUserDto, PaginatedUsersResponse, User, UserFilterParams, UserRole,
};

/// Column list matching the field order of [`User`]. The password hash is
/// never part of it.
pub(crate) const USER_COLUMNS: &str = "id, username, name, surname, birth_day, birth_place, ssn, \
     phone_number, email, gender, role, is_advisor, advisor_teacher_id, student_number, \
     is_active, built_in, created_at, updated_at";

pub struct UserService;

impl UserService {
    /// Reject the request if another account already holds one of the
    /// unique properties. `exclude_id` skips the account being updated.
    pub(crate) async fn check_unique_properties(
        db: &PgPool,
        username: &str,
        ssn: &str,
        phone_number: &str,
        email: &str,
        exclude_id: Option<UserId>,
    ) -> Result<(), AppError> {
        #[derive(sqlx::FromRow)]
        struct UniqueRow {
            username: String,
            ssn: String,
            phone_number: String,
            email: String,
        }

        let existing = sqlx::query_as::<_, UniqueRow>(
            "SELECT username, ssn, phone_number, email FROM users
             WHERE (username = $1 OR ssn = $2 OR phone_number = $3 OR email = $4)
               AND ($5::uuid IS NULL OR id <> $5)
             LIMIT 1",
        )
        .bind(username)
        .bind(ssn)
        .bind(phone_number)
        .bind(email)
        .bind(exclude_id)
        .fetch_optional(db)
        .await?;

        if let Some(row) = existing {
            let property = if row.username == username {
                "username"
            } else if row.ssn == ssn {
                "ssn"
            } else if row.phone_number == phone_number {
                "phone number"
            } else {
                debug_assert_eq!(row.email, email);
                "email"
            };
            return Err(AppError::conflict(anyhow::anyhow!(
                "A user with this {} already exists",
                property
            )));
        }

        Ok(())
    }

    /// Create an admin or manager account. Teachers and students are
    /// created through their own modules so role-specific fields get set.
    #[instrument(skip(db, dto))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        if matches!(dto.role, UserRole::Teacher | UserRole::Student) {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Use the teachers or students endpoints to create {} accounts",
                dto.role
            )));
        }

        Self::check_unique_properties(
            db,
            &dto.username,
            &dto.ssn,
            &dto.phone_number,
            &dto.email,
            None,
        )
        .await?;

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, name, surname, birth_day, birth_place, ssn,
                                phone_number, email, password, gender, role)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
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
        .bind(&hashed_password)
        .bind(dto.gender)
        .bind(dto.role)
        .fetch_one(db)
        .await?;

        Ok(user)
    }

    /// Get paginated users, optionally filtered by role and name substring.
    #[instrument(skip(db))]
    pub async fn get_users(
        db: &PgPool,
        filters: UserFilterParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users
             WHERE ($1::user_role IS NULL OR role = $1)
               AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')",
        )
        .bind(filters.role)
        .bind(&filters.name)
        .fetch_one(db)
        .await?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE ($1::user_role IS NULL OR role = $1)
               AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        ))
        .bind(filters.role)
        .bind(&filters.name)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let has_more = offset + limit < total;

        Ok(PaginatedUsersResponse {
            data: users,
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
    pub async fn get_user_by_id(db: &PgPool, user_id: UserId) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }

    /// Replace an admin or manager account.
    #[instrument(skip(db, dto))]
    pub async fn update_user(
        db: &PgPool,
        user_id: UserId,
        dto: CreateUserDto,
    ) -> Result<User, AppError> {
        let existing = Self::get_user_by_id(db, user_id).await?;

        if existing.built_in {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Built-in accounts cannot be updated"
            )));
        }

        if matches!(dto.role, UserRole::Teacher | UserRole::Student) {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Use the teachers or students endpoints to manage {} accounts",
                dto.role
            )));
        }

        Self::check_unique_properties(
            db,
            &dto.username,
            &dto.ssn,
            &dto.phone_number,
            &dto.email,
            Some(user_id),
        )
        .await?;

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET username = $1, name = $2, surname = $3, birth_day = $4, birth_place = $5,
                 ssn = $6, phone_number = $7, email = $8, password = $9, gender = $10,
                 role = $11, updated_at = NOW()
             WHERE id = $12
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
        .bind(&hashed_password)
        .bind(dto.gender)
        .bind(dto.role)
        .bind(user_id)
        .fetch_one(db)
        .await?;

        Ok(user)
    }

    /// Delete an account. Built-in accounts refuse deletion.
    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, user_id: UserId) -> Result<(), AppError> {
        let existing = Self::get_user_by_id(db, user_id).await?;

        if existing.built_in {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Built-in accounts cannot be deleted"
            )));
        }

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(db)
            .await?;

        Ok(())
    }
}
