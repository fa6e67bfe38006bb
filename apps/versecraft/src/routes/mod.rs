pub mod credentials;
pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sheets API
        .route("/api/v1/topics", get(handlers::handle_topics))
        .route("/api/v1/sheets/generate", post(handlers::handle_generate))
        .route("/api/v1/sheets/export", post(handlers::handle_export))
        // Provider key storage
        .route("/api/v1/credentials", get(credentials::handle_list))
        .route(
            "/api/v1/credentials/:provider",
            put(credentials::handle_set).delete(credentials::handle_clear),
        )
        .with_state(state)
}
