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
    models::{Event, EventPayload},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}

// GET /api/events
async fn list_events(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Event>>> {
    Ok(Json(Event::list(&state.db).await?))
}

// GET /api/events/{id}
async fn get_event(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Event>> {
    Event::find(id, &state.db)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Event"))
}

// POST /api/events
async fn create_event(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<EventPayload>,
) -> AppResult<impl IntoResponse> {
    let id = Event::create(&payload, &state.db).await?;
    tracing::info!("event {} created by {}", id, user.username);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Event created", "id": id })),
    ))
}

// PUT /api/events/{id}
async fn update_event(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<EventPayload>,
) -> AppResult<Json<serde_json::Value>> {
    if !Event::update(id, &payload, &state.db).await? {
        return Err(AppError::not_found("Event"));
    }
    Ok(Json(json!({ "message": "Event updated" })))
}

// DELETE /api/events/{id}
async fn delete_event(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<serde_json::Value>> {
    if !Event::delete(id, &state.db).await? {
        return Err(AppError::not_found("Event"));
    }
    Ok(Json(json!({ "message": "Event deleted" })))
}
