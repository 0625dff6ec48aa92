use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use common::error::{AppError, Res};
use db::models::user::User;
use sqlx::PgPool;

use crate::dtos::auth::LoginRequest;

/// Hashes a password for storage.
pub fn hash_password(password: &str) -> Res<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Authenticates existing user.
/// If user does not exist, returns 400.
/// If password does not match stored hash, returns 401.
pub async fn authenticate_user(pool: &PgPool, login_data: &LoginRequest) -> Res<User> {
    let (user, credentials) = db::user::get_user_with_password_hash(pool, &login_data.email)
        .await
        .map_err(|_| AppError::BadRequest("User with this email does not exist".to_string()))?;

    let parsed_hash = PasswordHash::new(&credentials.password_hash)
        .map_err(|e| AppError::Internal(format!("Stored hash is malformed: {}", e)))?;
    let is_valid = Argon2::default()
        .verify_password(login_data.password.as_bytes(), &parsed_hash)
        .is_ok();

    if is_valid {
        Ok(user)
    } else {
        Err(AppError::Unauthorized("Invalid credentials".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_with_original_password_only() {
        let hash = hash_password("correct horse").unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();

        assert!(
            Argon2::default()
                .verify_password(b"correct horse", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"battery staple", &parsed)
                .is_err()
        );
    }
}
