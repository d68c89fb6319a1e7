use sqlx::PgPool;

use lectern_core::hash_password;
use lectern_models::users::{Gender, UserRole};

/// Create the built-in admin account.
///
/// Built-in accounts cannot be updated or deleted through the API, so the
/// profile fields beyond credentials are seeded with placeholder values.
pub async fn create_built_in_admin(
    db: &PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let result = sqlx::query(
        "INSERT INTO users (username, name, surname, birth_day, birth_place, ssn, phone_number,
                            email, password, gender, role, built_in)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, TRUE)
         ON CONFLICT (username) DO NOTHING",
    )
    .bind(username)
    .bind("Built-in")
    .bind("Admin")
    .bind(chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
    .bind("System")
    .bind("000-00-0000")
    .bind("000-000-0000")
    .bind(email)
    .bind(hashed_password)
    .bind(Gender::Male)
    .bind(UserRole::Admin)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err("User with this username already exists".into());
    }

    Ok(())
}
