use std::sync::Arc;

use crate::background::CredentialStore;
use crate::config::Config;
use crate::export::Exporter;
use crate::generation::SheetGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub generator: Arc<SheetGenerator>,
    pub exporter: Arc<Exporter>,
    /// Same store the background providers read on every attempt.
    pub credentials: Arc<CredentialStore>,
}
