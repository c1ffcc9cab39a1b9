use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::{ApiPath, AuthUser, ValidatedJson},
    models::{Ticket, TicketDetails, TicketPayload},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tickets", get(list_tickets).post(issue_ticket))
        .route(
            "/tickets/{ticket_number}",
            get(get_ticket).put(update_ticket).delete(delete_ticket),
        )
}

// GET /api/tickets (с данными участника и события)
async fn list_tickets(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<TicketDetails>>> {
    Ok(Json(Ticket::list_detailed(&state.db).await?))
}

async fn get_ticket(
    State(state): State<Arc<AppState>>,
    ApiPath(ticket_number): ApiPath<String>,
) -> AppResult<Json<Ticket>> {
    Ticket::find_by_number(&ticket_number, &state.db)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Ticket"))
}

async fn issue_ticket(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<TicketPayload>,
) -> AppResult<impl IntoResponse> {
    let ticket = Ticket::issue(&payload, &state.db).await?;
    tracing::info!("ticket {} issued by {}", ticket.ticket_number, user.username);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Ticket issued",
            "id": ticket.id,
            "ticket_number": ticket.ticket_number,
            "ticket_type": ticket.ticket_type,
            "attendee_id": ticket.attendee_id,
            "event_id": ticket.event_id,
        })),
    ))
}

async fn update_ticket(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    ApiPath(ticket_number): ApiPath<String>,
    ValidatedJson(payload): ValidatedJson<TicketPayload>,
) -> AppResult<Json<serde_json::Value>> {
    if !Ticket::update(&ticket_number, &payload, &state.db).await? {
        return Err(AppError::not_found("Ticket"));
    }
    Ok(Json(json!({ "message": "Ticket updated", "ticket_number": ticket_number })))
}

async fn delete_ticket(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    ApiPath(ticket_number): ApiPath<String>,
) -> AppResult<Json<serde_json::Value>> {
    if !Ticket::delete(&ticket_number, &state.db).await? {
        return Err(AppError::not_found("Ticket"));
    }
    Ok(Json(json!({ "message": "Ticket deleted" })))
}
