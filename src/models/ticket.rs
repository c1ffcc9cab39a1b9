use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::NaiveDate;
use rand::Rng;
use validator::Validate;

use crate::database::Database;

pub const TICKET_PREFIX: &str = "TICKET-";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub ticket_number: String,
    pub ticket_type: String,
    pub attendee_id: i64,
    pub event_id: i64,
}

/// Строка общего списка: билет вместе с участником и событием.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TicketDetails {
    pub ticket_number: String,
    pub ticket_type: String,
    pub attendee_name: String,
    pub attendee_email: String,
    pub event_name: String,
    pub location: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct TicketPayload {
    #[validate(length(min = 1, message = "ticket_type must not be empty"))]
    pub ticket_type: String,
    #[validate(range(min = 1, message = "attendee_id must be positive"))]
    pub attendee_id: i64,
    #[validate(range(min = 1, message = "event_id must be positive"))]
    pub event_id: i64,
}

/// Номер билета вида TICKET-123456 (всегда шесть цифр).
pub fn generate_ticket_number() -> String {
    ticket_number_from(rand::rng().random_range(100_000..1_000_000))
}

pub fn ticket_number_from(n: u32) -> String {
    format!("{TICKET_PREFIX}{n}")
}

impl Ticket {
    pub async fn list_detailed(db: &Database) -> Result<Vec<TicketDetails>, sqlx::Error> {
        sqlx::query_as::<_, TicketDetails>(
            r#"
            SELECT t.ticket_number, t.ticket_type,
                   a.name AS attendee_name, a.email AS attendee_email,
                   e.name AS event_name, e.location, e.date
            FROM tickets t
            JOIN attendees a ON t.attendee_id = a.id
            JOIN events e ON t.event_id = e.id
            ORDER BY t.id
            "#
        )
        .fetch_all(&db.pool)
        .await
    }

    pub async fn find_by_number(ticket_number: &str, db: &Database) -> Result<Option<Ticket>, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            "SELECT id, ticket_number, ticket_type, attendee_id, event_id
             FROM tickets
             WHERE ticket_number = $1"
        )
        .bind(ticket_number)
        .fetch_optional(&db.pool)
        .await
    }

    /// Выпускает билет с новым номером и возвращает сохранённую строку.
    pub async fn issue(payload: &TicketPayload, db: &Database) -> Result<Ticket, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            "INSERT INTO tickets (ticket_number, ticket_type, attendee_id, event_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, ticket_number, ticket_type, attendee_id, event_id"
        )
        .bind(generate_ticket_number())
        .bind(&payload.ticket_type)
        .bind(payload.attendee_id)
        .bind(payload.event_id)
        .fetch_one(&db.pool)
        .await
    }

    pub async fn update(ticket_number: &str, payload: &TicketPayload, db: &Database) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tickets SET ticket_type = $1, attendee_id = $2, event_id = $3
             WHERE ticket_number = $4"
        )
        .bind(&payload.ticket_type)
        .bind(payload.attendee_id)
        .bind(payload.event_id)
        .bind(ticket_number)
        .execute(&db.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(ticket_number: &str, db: &Database) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tickets WHERE ticket_number = $1")
            .bind(ticket_number)
            .execute(&db.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
