//! AI-primary provider: an OpenAI-compatible image-generation endpoint that
//! answers with a hosted image URL.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{classify_failure, BackgroundProvider, ProviderError, ProviderKind, ProviderRequest};
use crate::background::credentials::CredentialStore;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/images/generations";
pub const DEFAULT_MODEL: &str = "dall-e-3";

/// Output sizes the endpoint accepts, as (width, height).
const SUPPORTED_SIZES: &[(u32, u32)] = &[(1024, 1024), (1024, 1792), (1792, 1024)];

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: String,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    url: Option<String>,
    b64_json: Option<String>,
}

/// Picks the supported size whose aspect ratio is closest to the request.
pub fn nearest_size(width: u32, height: u32) -> (u32, u32) {
    let wanted = width.max(1) as f64 / height.max(1) as f64;
    SUPPORTED_SIZES
        .iter()
        .copied()
        .min_by(|a, b| {
            let da = (a.0 as f64 / a.1 as f64 - wanted).abs();
            let db = (b.0 as f64 / b.1 as f64 - wanted).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or((1024, 1024))
}

pub struct ImageGenerationProvider {
    client: Client,
    credentials: Arc<CredentialStore>,
    endpoint: String,
    model: String,
}

impl ImageGenerationProvider {
    pub fn new(
        client: Client,
        credentials: Arc<CredentialStore>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            credentials,
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl BackgroundProvider for ImageGenerationProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::AiPrimary
    }

    async fn attempt(&self, request: &ProviderRequest<'_>) -> Result<String, ProviderError> {
        let api_key = self
            .credentials
            .get(ProviderKind::AiPrimary)
            .ok_or(ProviderError::NotConfigured)?;

        let (width, height) = nearest_size(request.intent.width, request.intent.height);
        let body = GenerationRequest {
            model: &self.model,
            prompt: request.prompt,
            n: 1,
            size: format!("{width}x{height}"),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(classify_failure(response).await);
        }

        let parsed: GenerationResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        let image = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Malformed("empty data array".to_string()))?;

        debug!("AI-primary generated {}x{} for {}", width, height, request.verse.reference);

        match (image.url, image.b64_json) {
            (Some(url), _) if !url.is_empty() => Ok(url),
            (_, Some(b64)) => {
                // Validate before wrapping so a garbled payload falls through.
                base64::engine::general_purpose::STANDARD
                    .decode(b64.as_bytes())
                    .map_err(|e| ProviderError::Malformed(e.to_string()))?;
                Ok(format!("data:image/png;base64,{b64}"))
            }
            _ => Err(ProviderError::Malformed("image has neither url nor b64_json".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::providers::tests::Fixture;
    use crate::background::BackgroundStyle;
    use crate::testing::{self, RecordedRequest};
    use axum::response::Response;

    async fn provider_for<F>(respond: F) -> (ImageGenerationProvider, testing::Stub)
    where
        F: Fn(&RecordedRequest) -> Response + Clone + Send + Sync + 'static,
    {
        let stub = testing::serve(respond).await;
        let credentials = Arc::new(CredentialStore::new());
        credentials.set(ProviderKind::AiPrimary, "sk-test");
        let provider = ImageGenerationProvider::new(
            Client::new(),
            credentials,
            stub.url("/v1/images/generations"),
            DEFAULT_MODEL,
        );
        (provider, stub)
    }

    #[tokio::test]
    async fn test_hosted_url_is_returned_and_request_is_openai_shaped() {
        let (provider, stub) = provider_for(|_| {
            testing::reply(
                200,
                "application/json",
                r#"{"data":[{"url":"https://cdn.example/generated.png"}]}"#,
            )
        })
        .await;
        let fixture = Fixture::new(BackgroundStyle::Wallpaper);

        let uri = provider.attempt(&fixture.request()).await.unwrap();
        assert_eq!(uri, "https://cdn.example/generated.png");

        let requests = stub.requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/v1/images/generations");
        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer sk-test"));
        let body = requests[0].json();
        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["prompt"], "a quiet lake at dawn");
        assert_eq!(body["n"], 1);
        assert_eq!(body["size"], "1024x1792");
    }

    #[tokio::test]
    async fn test_b64_payload_becomes_data_uri() {
        let (provider, _stub) = provider_for(|_| {
            testing::reply(200, "application/json", r#"{"data":[{"b64_json":"aGVsbG8="}]}"#)
        })
        .await;
        let uri = provider
            .attempt(&Fixture::new(BackgroundStyle::Card).request())
            .await
            .unwrap();
        assert_eq!(uri, "data:image/png;base64,aGVsbG8=");
    }

    #[tokio::test]
    async fn test_empty_data_array_is_malformed() {
        let (provider, _stub) =
            provider_for(|_| testing::reply(200, "application/json", r#"{"data":[]}"#)).await;
        let result = provider.attempt(&Fixture::new(BackgroundStyle::Card).request()).await;
        assert!(matches!(result, Err(ProviderError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_failure_statuses_are_classified() {
        for status in [401u16, 402, 429, 503] {
            let (provider, _stub) =
                provider_for(move |_| testing::reply(status, "application/json", "{}")).await;
            let err = provider
                .attempt(&Fixture::new(BackgroundStyle::Card).request())
                .await
                .unwrap_err();
            let classified = match status {
                401 => matches!(err, ProviderError::Auth { status: 401 }),
                402 => matches!(err, ProviderError::Billing),
                429 => matches!(err, ProviderError::RateLimited),
                _ => matches!(err, ProviderError::Server { status: 503 }),
            };
            assert!(classified, "status {status} classified as {err:?}");
        }
    }

    #[test]
    fn test_nearest_size_by_aspect() {
        assert_eq!(nearest_size(1080, 1920), (1024, 1792));
        assert_eq!(nearest_size(800, 800), (1024, 1024));
        assert_eq!(nearest_size(1920, 1080), (1792, 1024));
        assert_eq!(nearest_size(0, 0), (1024, 1024));
    }

    #[tokio::test]
    async fn test_missing_credential_is_not_configured() {
        use crate::background::theme::{Theme, ThemeSelection};
        use crate::background::{BackgroundStyle, RenderIntent};
        use crate::corpus::Corpus;

        let provider = ImageGenerationProvider::new(
            Client::new(),
            Arc::new(CredentialStore::new()),
            "http://127.0.0.1:9/unused",
            DEFAULT_MODEL,
        );
        let corpus = Corpus::builtin().unwrap();
        let intent = RenderIntent::for_style(BackgroundStyle::Card);
        let theme = ThemeSelection {
            theme: Theme::Nature,
            season: None,
        };
        let request = ProviderRequest {
            verse: &corpus.verses()[0],
            intent: &intent,
            theme: &theme,
            prompt: "a meadow",
            seed: 1,
        };
        assert!(matches!(
            provider.attempt(&request).await,
            Err(ProviderError::NotConfigured)
        ));
    }
}
