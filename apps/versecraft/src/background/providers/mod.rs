//! Background providers: the competing image sources behind one trait.
//!
//! The resolver walks an ordered `Vec<Arc<dyn BackgroundProvider>>` and stops
//! at the first success. Adding or removing a source means changing the
//! chain built in [`super::BackgroundResolver::from_config`], nothing else.

pub mod curated;
pub mod image_generation;
pub mod inference;
pub mod stock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::theme::ThemeSelection;
use super::RenderIntent;
use crate::corpus::Verse;

pub use curated::CuratedFallback;
pub use image_generation::ImageGenerationProvider;
pub use inference::InferenceProvider;
pub use stock::StockPhotoProvider;

/// Where a resolved background came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    AiPrimary,
    AiSecondary,
    Stock,
    CuratedFallback,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::AiPrimary => "ai-primary",
            ProviderKind::AiSecondary => "ai-secondary",
            ProviderKind::Stock => "stock",
            ProviderKind::CuratedFallback => "curated-fallback",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "ai-primary" => Some(ProviderKind::AiPrimary),
            "ai-secondary" => Some(ProviderKind::AiSecondary),
            "stock" => Some(ProviderKind::Stock),
            "curated-fallback" => Some(ProviderKind::CuratedFallback),
            _ => None,
        }
    }
}

/// Provider faults. None of these ever reach the caller of `resolve`; they
/// are logged and the chain moves on.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("No credential configured")]
    NotConfigured,

    #[error("Authentication failed (status {status})")]
    Auth { status: u16 },

    #[error("Billing or quota exhausted")]
    Billing,

    #[error("Rate limited")]
    RateLimited,

    #[error("Server unavailable (status {status})")]
    Server { status: u16 },

    #[error("Unexpected status {status}: {message}")]
    Unexpected { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// Classifies a non-2xx response by status code.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => ProviderError::Auth { status },
            402 => ProviderError::Billing,
            429 => ProviderError::RateLimited,
            500..=599 => ProviderError::Server { status },
            _ => ProviderError::Unexpected {
                status,
                message: body,
            },
        }
    }
}

/// Everything a provider needs for one attempt.
#[derive(Debug, Clone, Copy)]
pub struct ProviderRequest<'a> {
    pub verse: &'a Verse,
    pub intent: &'a RenderIntent,
    pub theme: &'a ThemeSelection,
    pub prompt: &'a str,
    /// Random seed for providers that accept one (stock bucket sampling).
    pub seed: u32,
}

/// A single failable background source.
#[async_trait]
pub trait BackgroundProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Attempts to produce an image reference (URL or `data:` URI).
    async fn attempt(&self, request: &ProviderRequest<'_>) -> Result<String, ProviderError>;
}

/// Reads the body of a failed response and classifies it.
pub(crate) async fn classify_failure(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ProviderError::from_status(status, body)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::background::theme::Theme;
    use crate::background::BackgroundStyle;
    use crate::corpus::Corpus;

    /// Owns what a [`ProviderRequest`] borrows.
    pub(crate) struct Fixture {
        pub verse: Verse,
        pub intent: RenderIntent,
        pub theme: ThemeSelection,
    }

    impl Fixture {
        pub fn new(style: BackgroundStyle) -> Self {
            Self {
                verse: Corpus::builtin().unwrap().verses()[0].clone(),
                intent: RenderIntent::for_style(style),
                theme: ThemeSelection {
                    theme: Theme::Peaceful,
                    season: None,
                },
            }
        }

        pub fn request(&self) -> ProviderRequest<'_> {
            ProviderRequest {
                verse: &self.verse,
                intent: &self.intent,
                theme: &self.theme,
                prompt: "a quiet lake at dawn",
                seed: 42,
            }
        }
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            ProviderError::from_status(401, String::new()),
            ProviderError::Auth { status: 401 }
        ));
        assert!(matches!(ProviderError::from_status(402, String::new()), ProviderError::Billing));
        assert!(matches!(
            ProviderError::from_status(429, String::new()),
            ProviderError::RateLimited
        ));
        assert!(matches!(
            ProviderError::from_status(503, String::new()),
            ProviderError::Server { status: 503 }
        ));
        assert!(matches!(
            ProviderError::from_status(418, "teapot".into()),
            ProviderError::Unexpected { status: 418, .. }
        ));
    }

    #[test]
    fn test_provider_kind_wire_names() {
        for kind in [
            ProviderKind::AiPrimary,
            ProviderKind::AiSecondary,
            ProviderKind::Stock,
            ProviderKind::CuratedFallback,
        ] {
            assert_eq!(ProviderKind::parse(kind.as_str()), Some(kind));
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
        }
    }
}
