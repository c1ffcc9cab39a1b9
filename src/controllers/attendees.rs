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
    models::{Attendee, AttendeePayload},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/attendees", get(list_attendees).post(create_attendee))
        .route(
            "/attendees/{id}",
            get(get_attendee).put(update_attendee).delete(delete_attendee),
        )
}

async fn list_attendees(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Attendee>>> {
    Ok(Json(Attendee::list(&state.db).await?))
}

async fn get_attendee(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Attendee>> {
    Attendee::find(id, &state.db)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Attendee"))
}

async fn create_attendee(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<AttendeePayload>,
) -> AppResult<impl IntoResponse> {
    let id = Attendee::create(&payload, &state.db).await?;
    tracing::info!("attendee {} added to event {} by {}", id, payload.event_id, user.username);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Attendee added", "id": id })),
    ))
}

async fn update_attendee(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<AttendeePayload>,
) -> AppResult<Json<serde_json::Value>> {
    if !Attendee::update(id, &payload, &state.db).await? {
        return Err(AppError::not_found("Attendee"));
    }
    Ok(Json(json!({ "message": "Attendee updated" })))
}

async fn delete_attendee(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<serde_json::Value>> {
    if !Attendee::delete(id, &state.db).await? {
        return Err(AppError::not_found("Attendee"));
    }
    Ok(Json(json!({ "message": "Attendee deleted" })))
}
