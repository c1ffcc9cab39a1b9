use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::NaiveDate;
use validator::Validate;

use crate::database::Database;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub date: NaiveDate,
    pub capacity: i32,
}

/// Тело POST/PUT запроса. PUT заменяет все поля целиком.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct EventPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: String,
    pub date: NaiveDate,
    #[validate(range(min = 0, message = "capacity must not be negative"))]
    pub capacity: i32,
}

impl Event {
    pub async fn list(db: &Database) -> Result<Vec<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            "SELECT id, name, location, date, capacity FROM events ORDER BY id"
        )
        .fetch_all(&db.pool)
        .await
    }

    pub async fn find(id: i64, db: &Database) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            "SELECT id, name, location, date, capacity FROM events WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&db.pool)
        .await
    }

    pub async fn create(payload: &EventPayload, db: &Database) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO events (name, location, date, capacity)
             VALUES ($1, $2, $3, $4)
             RETURNING id"
        )
        .bind(&payload.name)
        .bind(&payload.location)
        .bind(payload.date)
        .bind(payload.capacity)
        .fetch_one(&db.pool)
        .await
    }

    /// Возвращает false, если события с таким id нет.
    pub async fn update(id: i64, payload: &EventPayload, db: &Database) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE events SET name = $1, location = $2, date = $3, capacity = $4 WHERE id = $5"
        )
        .bind(&payload.name)
        .bind(&payload.location)
        .bind(payload.date)
        .bind(payload.capacity)
        .bind(id)
        .execute(&db.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(id: i64, db: &Database) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&db.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
