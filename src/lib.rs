pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod controllers;
pub mod middleware;
pub mod services;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use services::auth::{PasswordHasher, TokenService};

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub db: database::Database,
    pub config: config::Config,
    pub tokens: TokenService,
    pub passwords: PasswordHasher,
}

impl AppState {
    /// Подключается к БД и применяет миграции.
    pub async fn new(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let db = database::Database::new(&config.database.url, config.database.pool_size).await?;
        tracing::info!("Database connected");

        db.run_migrations().await?;

        Ok(Self::with_database(db, config))
    }

    pub fn with_database(db: database::Database, config: config::Config) -> Arc<Self> {
        Arc::new(Self {
            tokens: TokenService::from_config(&config.jwt),
            passwords: PasswordHasher::from_config(&config.password),
            db,
            config,
        })
    }
}

/// Корневой роутер: служебные маршруты и API под /api.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Event Manager API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
