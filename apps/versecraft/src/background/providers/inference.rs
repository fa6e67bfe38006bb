//! AI-secondary provider: a hosted diffusion inference endpoint (free tier)
//! that answers with raw image bytes.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::{classify_failure, BackgroundProvider, ProviderError, ProviderKind, ProviderRequest};
use crate::background::credentials::CredentialStore;

pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-xl-base-1.0";
pub const DEFAULT_STEPS: u32 = 30;
pub const DEFAULT_GUIDANCE_SCALE: f32 = 7.5;

const MAX_EDGE: u32 = 1024;
const MIN_EDGE: u32 = 256;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    width: u32,
    height: u32,
    num_inference_steps: u32,
    guidance_scale: f32,
}

/// Scales the requested size so the long edge fits the model, keeping the
/// aspect ratio and snapping both edges to multiples of 8.
pub fn inference_dimensions(width: u32, height: u32) -> (u32, u32) {
    let (w, h) = (width.max(1) as f64, height.max(1) as f64);
    let scale = (MAX_EDGE as f64 / w.max(h)).min(1.0);
    let snap = |v: f64| -> u32 {
        let v = ((v * scale) / 8.0).round() as u32 * 8;
        v.clamp(MIN_EDGE, MAX_EDGE)
    };
    (snap(w), snap(h))
}

pub struct InferenceProvider {
    client: Client,
    credentials: Arc<CredentialStore>,
    endpoint: String,
    steps: u32,
    guidance_scale: f32,
}

impl InferenceProvider {
    pub fn new(client: Client, credentials: Arc<CredentialStore>, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            credentials,
            endpoint: endpoint.into(),
            steps: DEFAULT_STEPS,
            guidance_scale: DEFAULT_GUIDANCE_SCALE,
        }
    }
}

#[async_trait]
impl BackgroundProvider for InferenceProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::AiSecondary
    }

    async fn attempt(&self, request: &ProviderRequest<'_>) -> Result<String, ProviderError> {
        let api_key = self
            .credentials
            .get(ProviderKind::AiSecondary)
            .ok_or(ProviderError::NotConfigured)?;

        let (width, height) = inference_dimensions(request.intent.width, request.intent.height);
        let body = InferenceRequest {
            inputs: request.prompt,
            parameters: InferenceParameters {
                width,
                height,
                num_inference_steps: self.steps,
                guidance_scale: self.guidance_scale,
            },
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

        let mime = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .unwrap_or_else(|| "image/jpeg".to_string());
        if !mime.starts_with("image/") {
            return Err(ProviderError::Malformed(format!("expected image bytes, got {mime}")));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(ProviderError::Malformed("empty image body".to_string()));
        }

        debug!(
            "AI-secondary returned {} bytes for {}",
            bytes.len(),
            request.verse.reference
        );
        Ok(data_uri(&mime, &bytes))
    }
}

/// Wraps raw bytes as a `data:` URI.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{mime};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::providers::tests::Fixture;
    use crate::background::BackgroundStyle;
    use crate::testing::{self, RecordedRequest};
    use axum::response::Response;

    async fn provider_for<F>(respond: F) -> (InferenceProvider, testing::Stub)
    where
        F: Fn(&RecordedRequest) -> Response + Clone + Send + Sync + 'static,
    {
        let stub = testing::serve(respond).await;
        let credentials = Arc::new(CredentialStore::new());
        credentials.set(ProviderKind::AiSecondary, "hf_test");
        let provider = InferenceProvider::new(Client::new(), credentials, stub.url("/models/sdxl"));
        (provider, stub)
    }

    #[tokio::test]
    async fn test_image_bytes_become_data_uri_and_parameters_are_sent() {
        let (provider, stub) =
            provider_for(|_| testing::reply(200, "image/png; charset=binary", &b"abc"[..])).await;
        let fixture = Fixture::new(BackgroundStyle::Wallpaper);

        let uri = provider.attempt(&fixture.request()).await.unwrap();
        assert_eq!(uri, "data:image/png;base64,YWJj");

        let requests = stub.requests();
        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer hf_test"));
        let body = requests[0].json();
        assert_eq!(body["inputs"], "a quiet lake at dawn");
        assert_eq!(body["parameters"]["width"], 576);
        assert_eq!(body["parameters"]["height"], 1024);
        assert_eq!(body["parameters"]["num_inference_steps"], DEFAULT_STEPS);
        assert_eq!(body["parameters"]["guidance_scale"], 7.5);
    }

    #[tokio::test]
    async fn test_non_image_body_is_malformed() {
        let (provider, _stub) = provider_for(|_| {
            testing::reply(200, "application/json", r#"{"estimated_time": 20}"#)
        })
        .await;
        let result = provider.attempt(&Fixture::new(BackgroundStyle::Card).request()).await;
        assert!(matches!(result, Err(ProviderError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_loading_model_is_a_server_fault() {
        let (provider, _stub) =
            provider_for(|_| testing::reply(503, "application/json", r#"{"error":"loading"}"#))
                .await;
        let result = provider.attempt(&Fixture::new(BackgroundStyle::Card).request()).await;
        assert!(matches!(result, Err(ProviderError::Server { status: 503 })));
    }

    #[tokio::test]
    async fn test_quota_exhaustion_is_billing() {
        let (provider, _stub) =
            provider_for(|_| testing::reply(402, "application/json", "{}")).await;
        let result = provider.attempt(&Fixture::new(BackgroundStyle::Card).request()).await;
        assert!(matches!(result, Err(ProviderError::Billing)));
    }

    #[test]
    fn test_dimensions_keep_aspect_and_snap_to_8() {
        let (w, h) = inference_dimensions(1080, 1920);
        assert_eq!(h, 1024);
        assert_eq!(w % 8, 0);
        assert_eq!(w, 576);
    }

    #[test]
    fn test_small_requests_are_not_upscaled_below_min() {
        assert_eq!(inference_dimensions(100, 100), (256, 256));
        assert_eq!(inference_dimensions(512, 512), (512, 512));
    }

    #[test]
    fn test_data_uri_encoding() {
        assert_eq!(data_uri("image/png", b"abc"), "data:image/png;base64,YWJj");
    }
}
