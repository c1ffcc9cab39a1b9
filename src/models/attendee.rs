use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::database::Database;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Attendee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub id_card: Option<String>,
    pub event_id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AttendeePayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email is not valid"))]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub id_card: Option<String>,
    #[validate(range(min = 1, message = "event_id must be positive"))]
    pub event_id: i64,
}

impl Attendee {
    pub async fn list(db: &Database) -> Result<Vec<Attendee>, sqlx::Error> {
        sqlx::query_as::<_, Attendee>(
            "SELECT id, name, email, phone, id_card, event_id FROM attendees ORDER BY id"
        )
        .fetch_all(&db.pool)
        .await
    }

    pub async fn find(id: i64, db: &Database) -> Result<Option<Attendee>, sqlx::Error> {
        sqlx::query_as::<_, Attendee>(
            "SELECT id, name, email, phone, id_card, event_id FROM attendees WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&db.pool)
        .await
    }

    pub async fn create(payload: &AttendeePayload, db: &Database) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO attendees (name, email, phone, id_card, event_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id"
        )
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.id_card)
        .bind(payload.event_id)
        .fetch_one(&db.pool)
        .await
    }

    pub async fn update(id: i64, payload: &AttendeePayload, db: &Database) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE attendees
             SET name = $1, email = $2, phone = $3, id_card = $4, event_id = $5
             WHERE id = $6"
        )
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.id_card)
        .bind(payload.event_id)
        .bind(id)
        .execute(&db.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(id: i64, db: &Database) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attendees WHERE id = $1")
            .bind(id)
            .execute(&db.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
