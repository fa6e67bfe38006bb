mod background;
mod config;
mod corpus;
mod entitlement;
mod errors;
mod export;
mod generation;
mod layout;
mod phrases;
mod routes;
mod selection;
mod state;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::background::{BackgroundResolver, CredentialStore, ProviderKind, ResolverContext};
use crate::config::Config;
use crate::corpus::Corpus;
use crate::export::{assets, AssetLoader, Exporter, RasterRenderer};
use crate::generation::SheetGenerator;
use crate::routes::build_router;
use crate::selection::VerseSelector;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Versecraft v{}", env!("CARGO_PKG_VERSION"));

    // An empty corpus is a configuration error; refuse to start.
    let corpus = Arc::new(Corpus::builtin()?);
    info!("Corpus loaded ({} verses)", corpus.len());

    // Credentials seeded from the environment; the key routes can change them later.
    let credentials = Arc::new(CredentialStore::new());
    if let Some(key) = &config.openai_api_key {
        credentials.set(ProviderKind::AiPrimary, key.clone());
    }
    if let Some(key) = &config.huggingface_api_key {
        credentials.set(ProviderKind::AiSecondary, key.clone());
    }
    info!(
        "Providers configured: ai-primary={}, ai-secondary={}",
        credentials.is_configured(ProviderKind::AiPrimary),
        credentials.is_configured(ProviderKind::AiSecondary)
    );

    let context = Arc::new(ResolverContext::new(
        Arc::clone(&credentials),
        Duration::from_secs(config.background_cache_ttl_secs),
    ));
    spawn_cache_sweeper(Arc::clone(&context));
    let resolver = Arc::new(BackgroundResolver::from_config(&config, Arc::clone(&context))?);
    let generator = Arc::new(SheetGenerator::new(VerseSelector::new(corpus), resolver));

    let asset_client = assets::client(Duration::from_secs(config.provider_timeout_secs))?;
    let exporter = Arc::new(Exporter::new(
        Arc::new(RasterRenderer::new()),
        AssetLoader::new(asset_client, config.assets_dir.clone(), context),
    ));
    if config.admin_token.is_none() {
        info!("ADMIN_TOKEN unset; credential changes over HTTP are disabled");
    }

    let state = AppState {
        config: config.clone(),
        generator,
        exporter,
        credentials,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Drops expired backgrounds once per TTL so unrequested entries do not linger.
fn spawn_cache_sweeper(context: Arc<ResolverContext>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(context.cache.ttl().max(Duration::from_secs(1)));
        interval.tick().await;
        loop {
            interval.tick().await;
            let purged = context.cache.purge_expired();
            if purged > 0 {
                info!("Purged {purged} expired background(s)");
            }
        }
    });
}
