//! Background Resolver: one usable image reference per (verse, intent).
//!
//! Flow: cache lookup → theme inference → provider chain (AI-primary →
//! AI-secondary → stock) → curated fallback. Every provider fault is caught,
//! logged, and falls through immediately; `resolve` itself cannot fail.

pub mod cache;
pub mod credentials;
pub mod prompts;
pub mod providers;
pub mod theme;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::corpus::Verse;

pub use cache::{BackgroundCache, CacheKey};
pub use credentials::CredentialStore;
pub use providers::{BackgroundProvider, ProviderError, ProviderKind, ProviderRequest};

use providers::{CuratedFallback, ImageGenerationProvider, InferenceProvider, StockPhotoProvider};
use theme::{infer_theme, Theme};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// How the background will be used. Part of the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundStyle {
    Sticker,
    Card,
    Wallpaper,
}

/// Rendering intent: style plus desired pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderIntent {
    pub style: BackgroundStyle,
    pub width: u32,
    pub height: u32,
}

impl RenderIntent {
    /// Default pixel size for a style, matching the exported slot size.
    pub fn for_style(style: BackgroundStyle) -> Self {
        let (width, height) = match style {
            BackgroundStyle::Sticker => (1056, 352),
            BackgroundStyle::Card => (1240, 1754),
            BackgroundStyle::Wallpaper => (1080, 1920),
        };
        Self {
            style,
            width,
            height,
        }
    }
}

/// A resolved background. Held by the cache; callers receive clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBackground {
    /// `https://…`, `data:…;base64,…`, or `asset://…` for bundled images.
    pub source_uri: String,
    pub provider: ProviderKind,
    pub resolved_at: DateTime<Utc>,
    /// Theme the image was chosen for; renderers use it for placeholder fills.
    pub theme: Theme,
}

// ────────────────────────────────────────────────────────────────────────────
// Context
// ────────────────────────────────────────────────────────────────────────────

/// Shared mutable state for background resolution. Constructed once per
/// process and injected into the resolver and the credential routes.
#[derive(Debug, Default)]
pub struct ResolverContext {
    pub credentials: Arc<CredentialStore>,
    pub cache: BackgroundCache,
}

impl ResolverContext {
    pub fn new(credentials: Arc<CredentialStore>, cache_ttl: Duration) -> Self {
        Self {
            credentials,
            cache: BackgroundCache::new(cache_ttl),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resolver
// ────────────────────────────────────────────────────────────────────────────

pub struct BackgroundResolver {
    context: Arc<ResolverContext>,
    chain: Vec<Arc<dyn BackgroundProvider>>,
    curated: CuratedFallback,
}

impl BackgroundResolver {
    pub fn new(context: Arc<ResolverContext>, chain: Vec<Arc<dyn BackgroundProvider>>) -> Self {
        Self {
            context,
            chain,
            curated: CuratedFallback::new(),
        }
    }

    /// Builds the production chain: AI-primary → AI-secondary → stock.
    pub fn from_config(config: &Config, context: Arc<ResolverContext>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .build()?;

        let credentials = Arc::clone(&context.credentials);
        let chain: Vec<Arc<dyn BackgroundProvider>> = vec![
            Arc::new(ImageGenerationProvider::new(
                client.clone(),
                Arc::clone(&credentials),
                config.ai_primary_url.clone(),
                config.ai_primary_model.clone(),
            )),
            Arc::new(InferenceProvider::new(
                client.clone(),
                credentials,
                config.ai_secondary_url.clone(),
            )),
            Arc::new(StockPhotoProvider::new(client, config.stock_photo_url.clone())),
        ];
        Ok(Self::new(context, chain))
    }

    pub fn context(&self) -> &ResolverContext {
        &self.context
    }

    /// Resolves a background for `verse`. Never fails.
    pub async fn resolve(&self, verse: &Verse, intent: &RenderIntent) -> ResolvedBackground {
        self.resolve_at(verse, intent, Utc::now()).await
    }

    /// [`resolve`](Self::resolve) with an explicit clock, for seasonal themes.
    pub async fn resolve_at(
        &self,
        verse: &Verse,
        intent: &RenderIntent,
        now: DateTime<Utc>,
    ) -> ResolvedBackground {
        let key = CacheKey::new(&verse.reference, intent.style);
        if let Some(hit) = self.context.cache.get(&key) {
            debug!("Background cache hit for {} ({:?})", verse.reference, intent.style);
            return hit;
        }

        // The thread-local RNG must not live across an await point.
        let (theme, seed) = {
            let mut rng = rand::thread_rng();
            let theme = infer_theme(verse, intent.style, now.month(), &mut rng);
            (theme, rng.gen::<u32>())
        };
        let prompt = prompts::build_image_prompt(verse, &theme, intent.style);
        let request = ProviderRequest {
            verse,
            intent,
            theme: &theme,
            prompt: &prompt,
            seed,
        };

        for provider in &self.chain {
            let kind = provider.kind();
            match provider.attempt(&request).await {
                Ok(source_uri) => {
                    info!("Background for {} resolved via {}", verse.reference, kind.as_str());
                    let background = ResolvedBackground {
                        source_uri,
                        provider: kind,
                        resolved_at: now,
                        theme: theme.theme,
                    };
                    self.context.cache.insert(key, background.clone());
                    return background;
                }
                Err(ProviderError::NotConfigured) => {
                    debug!("Skipping {}: no credential configured", kind.as_str());
                }
                Err(e) => {
                    warn!(
                        "Provider {} failed for {}: {e}; falling through",
                        kind.as_str(),
                        verse.reference
                    );
                }
            }
        }

        let source_uri = self.curated.pick().to_string();
        info!(
            "Background for {} degraded to curated fallback {}",
            verse.reference, source_uri
        );
        let background = ResolvedBackground {
            source_uri,
            provider: ProviderKind::CuratedFallback,
            resolved_at: now,
            theme: theme.theme,
        };
        self.context.cache.insert(key, background.clone());
        background
    }
}
