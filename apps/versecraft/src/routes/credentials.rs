//! Provider key storage. Keys are write-only over HTTP; reads report presence.
//! Writes need `Authorization: Bearer <ADMIN_TOKEN>` and are refused outright
//! when no admin token is configured.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::background::ProviderKind;
use crate::errors::AppError;
use crate::state::AppState;

const KEYED_PROVIDERS: [ProviderKind; 2] = [ProviderKind::AiPrimary, ProviderKind::AiSecondary];

#[derive(Debug, Deserialize)]
pub struct SetCredentialBody {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct CredentialStatus {
    pub provider: ProviderKind,
    pub configured: bool,
}

fn keyed_provider(label: &str) -> Result<ProviderKind, AppError> {
    match ProviderKind::parse(label) {
        Some(kind) if KEYED_PROVIDERS.contains(&kind) => Ok(kind),
        Some(kind) => Err(AppError::Validation(format!(
            "{} does not take a credential",
            kind.as_str()
        ))),
        None => Err(AppError::NotFound(format!("Unknown provider '{label}'"))),
    }
}

fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let Some(expected) = state.config.admin_token.as_deref() else {
        return Err(AppError::Forbidden(
            "Credential changes are disabled: no admin token configured".to_string(),
        ));
    };
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);
    match presented {
        Some(token) if constant_time_compare(token, expected) => Ok(()),
        _ => {
            warn!("Rejected credential change without a valid admin token");
            Err(AppError::Forbidden("Invalid admin token".to_string()))
        }
    }
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// GET /api/v1/credentials
pub async fn handle_list(State(state): State<AppState>) -> Json<Vec<CredentialStatus>> {
    Json(
        KEYED_PROVIDERS
            .iter()
            .map(|&provider| CredentialStatus {
                provider,
                configured: state.credentials.is_configured(provider),
            })
            .collect(),
    )
}

/// PUT /api/v1/credentials/:provider
///
/// A blank key clears the slot.
pub async fn handle_set(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    headers: HeaderMap,
    Json(body): Json<SetCredentialBody>,
) -> Result<StatusCode, AppError> {
    require_admin(&state, &headers)?;
    let kind = keyed_provider(&provider)?;
    state.credentials.set(kind, body.api_key);
    info!(
        "Credential for {} {}",
        kind.as_str(),
        if state.credentials.is_configured(kind) { "stored" } else { "cleared" }
    );
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/credentials/:provider
pub async fn handle_clear(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    require_admin(&state, &headers)?;
    let kind = keyed_provider(&provider)?;
    state.credentials.clear(kind);
    info!("Credential for {} cleared", kind.as_str());
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("s3cret", "s3cret"));
        assert!(!constant_time_compare("s3cret", "s3creT"));
        assert!(!constant_time_compare("s3cret", "s3cre"));
    }
}
