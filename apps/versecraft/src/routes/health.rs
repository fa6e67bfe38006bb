use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::background::ProviderKind;
use crate::state::AppState;

/// GET /health
/// Returns service status, version, and which keyed providers are configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "providers": {
            "ai-primary": state.credentials.is_configured(ProviderKind::AiPrimary),
            "ai-secondary": state.credentials.is_configured(ProviderKind::AiSecondary),
        },
        "cached_backgrounds": state.generator.resolver().context().cache.len(),
        "cache_ttl_secs": state.config.background_cache_ttl_secs,
    }))
}
