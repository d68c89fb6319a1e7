use sqlx::PgPool;
use tracing::instrument;

use lectern_core::{AppError, hash_password, verify_password};
use lectern_models::ids::UserId;
use lectern_models::users::{User, UserRole};

use crate::config::jwt::JwtConfig;
use crate::modules::users::service::USER_COLUMNS;
use crate::utils::jwt::create_access_token;

use super::model::{LoginRequest, LoginResponse, UpdatePasswordRequest};

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: UserId,
    username: String,
    role: UserRole,
    password: String,
    built_in: bool,
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let credentials = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, username, role, password, built_in FROM users WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            AppError::unauthorized(anyhow::anyhow!("Invalid username or password"))
        })?;

        let is_valid = verify_password(&dto.password, &credentials.password)?;

        if !is_valid {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid username or password"
            )));
        }

        let access_token = create_access_token(
            credentials.id,
            &credentials.username,
            credentials.role,
            jwt_config,
        )?;

        let user = Self::get_profile(db, credentials.id).await?;

        Ok(LoginResponse { access_token, user })
    }

    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, user_id: UserId) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }

    /// Change the caller's password after verifying the old one.
    ///
    /// Built-in accounts refuse password changes.
    #[instrument(skip(db, dto))]
    pub async fn update_password(
        db: &PgPool,
        user_id: UserId,
        dto: UpdatePasswordRequest,
    ) -> Result<(), AppError> {
        let credentials = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, username, role, password, built_in FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        if credentials.built_in {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Built-in accounts cannot change their password"
            )));
        }

        let is_valid = verify_password(&dto.old_password, &credentials.password)?;
        if !is_valid {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Old password is incorrect"
            )));
        }

        let hashed = hash_password(&dto.new_password)?;

        sqlx::query("UPDATE users SET password = $1, updated_at = NOW() WHERE id = $2")
            .bind(&hashed)
            .bind(user_id)
            .execute(db)
            .await?;

        Ok(())
    }
}
