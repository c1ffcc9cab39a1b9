use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::NaiveDateTime;
use validator::{Validate, ValidationError};

use crate::database::Database;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// bcrypt-хеш, наружу не отдаётся
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, max = 64, message = "username must be 1-64 characters"))]
    pub username: String,
    #[validate(
        length(min = 1, message = "password must not be empty"),
        custom(function = "within_bcrypt_limit")
    )]
    pub password: String,
}

/// bcrypt учитывает только первые 72 байта пароля.
pub const MAX_PASSWORD_BYTES: usize = 72;

fn within_bcrypt_limit(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long")
            .with_message("password must be at most 72 bytes".into()));
    }
    Ok(())
}

impl User {
    // Найти пользователя по имени
    pub async fn find_by_username(username: &str, db: &Database) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at FROM users WHERE username = $1"
        )
        .bind(username)
        .fetch_optional(&db.pool)
        .await
    }

    /// Возвращает `None`, если имя уже занято.
    pub async fn create(username: &str, password_hash: &str, db: &Database) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, password)
             VALUES ($1, $2)
             ON CONFLICT (username) DO NOTHING
             RETURNING id"
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&db.pool)
        .await
    }
}
