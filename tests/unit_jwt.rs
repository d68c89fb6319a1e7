use lectern::config::jwt::JwtConfig;
use lectern::utils::jwt::{create_access_token, verify_token};
use lectern_models::ids::UserId;
use lectern_models::users::UserRole;
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();
    let user_id = UserId::from(Uuid::new_v4());

    let result = create_access_token(user_id, "jdoe", UserRole::Student, &jwt_config);

    assert!(result.is_ok());
    let token = result.unwrap();
    assert!(!token.is_empty());
}

#[test]
fn test_create_access_token_all_roles() {
    let jwt_config = get_test_jwt_config();
    let user_id = UserId::from(Uuid::new_v4());

    let roles = vec![
        UserRole::Admin,
        UserRole::Manager,
        UserRole::Teacher,
        UserRole::Student,
    ];

    for role in roles {
        let result = create_access_token(user_id, "jdoe", role, &jwt_config);
        assert!(result.is_ok());
    }
}

#[test]
fn test_verify_token_success() {
    let jwt_config = get_test_jwt_config();
    let user_id = UserId::from(Uuid::new_v4());

    let token = create_access_token(user_id, "jdoe", UserRole::Student, &jwt_config).unwrap();
    let result = verify_token(&token, &jwt_config);

    assert!(result.is_ok());
    let claims = result.unwrap();
    assert_eq!(claims.username, "jdoe");
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.role, "student");
}

#[test]
fn test_verify_token_invalid() {
    let jwt_config = get_test_jwt_config();

    let result = verify_token("invalid.token.here", &jwt_config);

    assert!(result.is_err());
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let user_id = UserId::from(Uuid::new_v4());

    let token = create_access_token(user_id, "jdoe", UserRole::Student, &jwt_config).unwrap();

    let wrong_jwt_config = JwtConfig {
        secret: "different_secret_key".to_string(),
        access_token_expiry: 3600,
    };

    let result = verify_token(&token, &wrong_jwt_config);

    assert!(result.is_err());
}

#[test]
fn test_verify_token_empty() {
    let jwt_config = get_test_jwt_config();

    let result = verify_token("", &jwt_config);

    assert!(result.is_err());
}

#[test]
fn test_token_contains_correct_role() {
    let jwt_config = get_test_jwt_config();
    let user_id = UserId::from(Uuid::new_v4());

    for (role, expected) in [
        (UserRole::Admin, "admin"),
        (UserRole::Manager, "manager"),
        (UserRole::Teacher, "teacher"),
        (UserRole::Student, "student"),
    ] {
        let token = create_access_token(user_id, "jdoe", role, &jwt_config).unwrap();
        let claims = verify_token(&token, &jwt_config).unwrap();
        assert_eq!(claims.role, expected);
    }
}

#[test]
fn test_token_expiry_is_set() {
    let jwt_config = get_test_jwt_config();
    let user_id = UserId::from(Uuid::new_v4());

    let token = create_access_token(user_id, "jdoe", UserRole::Student, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert!(claims.exp > claims.iat);
    assert_eq!(
        claims.exp - claims.iat,
        jwt_config.access_token_expiry as usize
    );
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = get_test_jwt_config();
    let malformed_tokens = vec![
        "not.enough.parts",
        "too.many.parts.here.extra",
        "!!!.invalid.chars",
        "header.payload.",
        ".payload.signature",
    ];

    for token in malformed_tokens {
        let result = verify_token(token, &jwt_config);
        assert!(result.is_err());
    }
}

#[test]
fn test_create_token_different_users_different_tokens() {
    let jwt_config = get_test_jwt_config();
    let user_id1 = UserId::from(Uuid::new_v4());
    let user_id2 = UserId::from(Uuid::new_v4());

    let token1 = create_access_token(user_id1, "alice", UserRole::Teacher, &jwt_config).unwrap();
    let token2 = create_access_token(user_id2, "bob", UserRole::Teacher, &jwt_config).unwrap();

    assert_ne!(token1, token2);

    let claims1 = verify_token(&token1, &jwt_config).unwrap();
    let claims2 = verify_token(&token2, &jwt_config).unwrap();

    assert_eq!(claims1.sub, user_id1.to_string());
    assert_eq!(claims2.sub, user_id2.to_string());
    assert_eq!(claims1.username, "alice");
    assert_eq!(claims2.username, "bob");
}
