//! Registration and login.

use crate::db::StoreError;
use crate::error::{AppError, Result};
use crate::models::UserProfile;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use serde::Deserialize;

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Hash a password with Argon2id for storage.
fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal("Failed to hash password".to_string()))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> Result<()> {
    let parsed = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash format".to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AppError::Authentication("Invalid email or password".to_string()))
}

/// POST /api/register
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let email = payload.email.trim().to_string();
    let username = payload.username.trim().to_string();

    if !email.contains('@') {
        return Err(AppError::Validation("a valid email is required".to_string()));
    }
    if username.is_empty() {
        return Err(AppError::Validation("username must not be empty".to_string()));
    }
    if payload.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = state
        .db
        .create_user(&email, &username, &password_hash)
        .await?;

    Ok(HttpResponse::Created().json(UserProfile::from(&user)))
}

/// POST /api/login
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let user = match state.db.get_user_by_email(payload.email.trim()).await {
        Ok(user) => user,
        Err(StoreError::NotFound(_)) => {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ))
        }
        Err(other) => return Err(other.into()),
    };

    verify_password(&payload.password, &user.password_hash)?;

    Ok(HttpResponse::Ok().json(UserProfile::from(&user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse battery", &hash).is_ok());
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let hash = hash_password("correct horse battery").unwrap();
        let err = verify_password("wrong guess", &hash).unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
    }

    #[test]
    fn test_malformed_hash_is_an_internal_error() {
        let err = verify_password("anything", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
