use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::ValidatedJson,
    models::{Credentials, User},
    services::auth::IssuedToken,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

// POST /api/signup
async fn signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(creds): ValidatedJson<Credentials>,
) -> AppResult<impl IntoResponse> {
    let password_hash = state.passwords.hash(&creds.password).await?;

    let id = User::create(&creds.username, &password_hash, &state.db)
        .await?
        .ok_or_else(|| {
            tracing::warn!("username already exists: {}", creds.username);
            AppError::BadRequest("Username already exists".to_string())
        })?;

    tracing::info!("user {} registered", creds.username);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered", "id": id })),
    ))
}

// POST /api/login
async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(creds): ValidatedJson<Credentials>,
) -> AppResult<Json<IssuedToken>> {
    // Одинаковый ответ для неизвестного имени и неверного пароля
    let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

    let user = User::find_by_username(&creds.username, &state.db)
        .await?
        .ok_or_else(|| {
            tracing::warn!("login for unknown user: {}", creds.username);
            invalid()
        })?;

    if !state.passwords.verify(&creds.password, &user.password).await? {
        tracing::warn!("invalid password for user: {}", user.username);
        return Err(invalid());
    }

    let token = state.tokens.issue(user.id, &user.username)?;
    tracing::info!("user {} logged in", user.username);
    Ok(Json(token))
}
