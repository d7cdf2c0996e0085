//! Admin user management commands.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use atelier_core::Email;

use super::{CommandError, connect};

/// Create an admin user, or promote the account if the email exists.
///
/// # Errors
///
/// Returns an error if the email or password is invalid, or the database
/// operation fails.
pub async fn create_user(email: &str, password: &str) -> Result<(), CommandError> {
    let email = Email::parse(email).map_err(|e| CommandError::Invalid(format!("email: {e}")))?;
    if password.len() < 8 {
        return Err(CommandError::Invalid(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CommandError::Invalid(format!("password hashing failed: {e}")))?
        .to_string();

    let pool = connect().await?;

    sqlx::query(
        r"
        INSERT INTO users (email, password_hash, is_admin)
        VALUES ($1, $2, TRUE)
        ON CONFLICT (email) DO UPDATE SET is_admin = TRUE, updated_at = NOW()
        ",
    )
    .bind(email.as_str())
    .bind(&password_hash)
    .execute(&pool)
    .await?;

    tracing::info!(email = %email, "Admin user ready");
    Ok(())
}
