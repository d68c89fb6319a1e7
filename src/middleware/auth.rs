use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use lectern_core::AppError;
use lectern_models::ids::UserId;

use crate::modules::auth::model::Claims;
use crate::state::AppState;
use crate::utils::jwt::verify_token;

/// Extractor that validates the bearer JWT and provides the authenticated
/// user's claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Get the user ID from the token subject.
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0
            .sub
            .parse::<UserId>()
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid user ID in token")))
    }

    /// Get the username recorded in the token.
    pub fn username(&self) -> &str {
        &self.0.username
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::unauthorized(anyhow::anyhow!("Missing authorization header"))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized(anyhow::anyhow!("Invalid authorization header format"))
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn claims_for(sub: String) -> Claims {
        Claims {
            sub,
            username: "jdoe".to_string(),
            role: "teacher".to_string(),
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_user_id_parses_subject() {
        let uuid = Uuid::new_v4();
        let auth_user = AuthUser(claims_for(uuid.to_string()));
        assert_eq!(auth_user.user_id().unwrap().into_inner(), uuid);
    }

    #[test]
    fn test_user_id_rejects_garbage_subject() {
        let auth_user = AuthUser(claims_for("not-a-uuid".to_string()));
        assert!(auth_user.user_id().is_err());
    }

    #[test]
    fn test_username_accessor() {
        let auth_user = AuthUser(claims_for(Uuid::new_v4().to_string()));
        assert_eq!(auth_user.username(), "jdoe");
    }
}
