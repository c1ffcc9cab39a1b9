pub mod auth;
pub mod events;
pub mod attendees;
pub mod tickets;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(auth::routes())
        .merge(events::routes())
        .merge(attendees::routes())
        .merge(tickets::routes())
}
