use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use validator::Validate;

use crate::{error::AppError, AppState};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

// Bearer JWT extractor: нет заголовка -> 401, токен невалиден -> 403
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                tracing::warn!("missing Authorization header");
                AppError::Unauthorized("Missing bearer token".to_string())
            })?;

        // Имя схемы регистронезависимо (RFC 7235)
        let token = auth_header
            .split_once(' ')
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
            .map(|(_, token)| token.trim())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                tracing::warn!("Authorization header is not a bearer token");
                AppError::Unauthorized("Missing bearer token".to_string())
            })?;

        let claims = state.tokens.verify(token).map_err(|e| {
            tracing::warn!("rejected token: {}", e);
            AppError::Forbidden("Invalid or expired token".to_string())
        })?;

        let user_id = claims.user_id().ok_or_else(|| {
            tracing::warn!("token subject is not a user id: {}", claims.sub);
            AppError::Forbidden("Invalid or expired token".to_string())
        })?;

        Ok(AuthUser {
            user_id,
            username: claims.username,
        })
    }
}

/// JSON тело, прошедшее `validator::Validate`. Ошибки разбора и валидации дают 400.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Параметры пути: ошибка разбора отдаётся как JSON 400, а не текстом axum.
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(ApiPath(value))
    }
}
