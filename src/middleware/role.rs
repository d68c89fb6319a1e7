//! Role-based authorization middleware.
//!
//! Two styles are available: router-level layers (`require_admin`,
//! `require_teacher`) applied with `middleware::from_fn_with_state`, and
//! per-handler checks (`check_any_role`) for routers whose handlers span
//! multiple roles.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use lectern_core::AppError;
use lectern_models::users::UserRole;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Middleware that checks if the authenticated user has one of the allowed
/// roles.
pub async fn require_roles(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
    allowed_roles: Vec<UserRole>,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    let user_role = parse_role_from_string(&auth_user.0.role)?;

    if !allowed_roles.contains(&user_role) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Access denied. Required roles: {:?}, but user has role: {:?}",
            allowed_roles,
            user_role
        )));
    }

    req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Layer for admin-only routes.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![UserRole::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Layer for teaching-staff routes (admin, manager, or teacher).
pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(
        State(state),
        req,
        next,
        vec![UserRole::Admin, UserRole::Manager, UserRole::Teacher],
    )
    .await
    {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Check if a user has any of the specified roles inside a handler.
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    let user_role = parse_role_from_string(&auth_user.0.role)?;

    if !allowed_roles.contains(&user_role) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Access denied. Required roles: {:?}, but user has role: {:?}",
            allowed_roles,
            user_role
        )));
    }

    Ok(())
}

/// Check that the user holds exactly the given role.
pub fn check_role(auth_user: &AuthUser, required_role: UserRole) -> Result<(), AppError> {
    check_any_role(auth_user, &[required_role])
}

/// Parse the role claim into a [`UserRole`].
pub fn parse_role_from_string(role_str: &str) -> Result<UserRole, AppError> {
    match role_str {
        "admin" => Ok(UserRole::Admin),
        "manager" => Ok(UserRole::Manager),
        "teacher" => Ok(UserRole::Teacher),
        "student" => Ok(UserRole::Student),
        _ => Err(AppError::internal(anyhow::anyhow!(
            "Invalid role: {}",
            role_str
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::model::Claims;
    use uuid::Uuid;

    fn auth_user_with_role(role: &str) -> AuthUser {
        AuthUser(Claims {
            sub: Uuid::new_v4().to_string(),
            username: "jdoe".to_string(),
            role: role.to_string(),
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn test_parse_role_from_string() {
        assert!(matches!(parse_role_from_string("admin"), Ok(UserRole::Admin)));
        assert!(matches!(
            parse_role_from_string("manager"),
            Ok(UserRole::Manager)
        ));
        assert!(matches!(
            parse_role_from_string("teacher"),
            Ok(UserRole::Teacher)
        ));
        assert!(matches!(
            parse_role_from_string("student"),
            Ok(UserRole::Student)
        ));
        assert!(parse_role_from_string("invalid").is_err());
    }

    #[test]
    fn test_check_any_role_allows_listed_roles() {
        let manager = auth_user_with_role("manager");
        assert!(check_any_role(&manager, &[UserRole::Admin, UserRole::Manager]).is_ok());
    }

    #[test]
    fn test_check_any_role_rejects_unlisted_roles() {
        let student = auth_user_with_role("student");
        let err = check_any_role(&student, &[UserRole::Admin, UserRole::Manager]).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_check_role_exact_match() {
        let teacher = auth_user_with_role("teacher");
        assert!(check_role(&teacher, UserRole::Teacher).is_ok());
        assert!(check_role(&teacher, UserRole::Admin).is_err());
    }
}
