//! Stock-photo provider: an unauthenticated seeded lookup. The theme bucket
//! and a random seed form the seed path segment, so one bucket and seed always
//! map to the same photo; a HEAD probe confirms the service is reachable and
//! yields the concrete image URL after redirects.

use async_trait::async_trait;
use reqwest::Client;

use super::{classify_failure, BackgroundProvider, ProviderError, ProviderKind, ProviderRequest};
use crate::background::theme::ThemeSelection;

pub const DEFAULT_BASE_URL: &str = "https://picsum.photos";

/// Largest edge requested from the stock service.
const MAX_EDGE: u32 = 5000;

pub struct StockPhotoProvider {
    client: Client,
    base_url: String,
}

/// Bucket key for a theme, with the season appended for wallpapers.
pub fn bucket_key(theme: &ThemeSelection) -> String {
    match theme.season {
        Some(season) => format!("{},{}", theme.theme.stock_keywords(), season.keyword()),
        None => theme.theme.stock_keywords().to_string(),
    }
}

impl StockPhotoProvider {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds `{base}/seed/{bucket}-{seed}/{w}/{h}`, with the bucket's
    /// commas turned into dashes.
    pub fn lookup_url(&self, request: &ProviderRequest<'_>) -> String {
        let w = request.intent.width.clamp(1, MAX_EDGE);
        let h = request.intent.height.clamp(1, MAX_EDGE);
        format!(
            "{}/seed/{}-{}/{}/{}",
            self.base_url,
            bucket_key(request.theme).replace(',', "-"),
            request.seed,
            w,
            h
        )
    }
}

#[async_trait]
impl BackgroundProvider for StockPhotoProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Stock
    }

    async fn attempt(&self, request: &ProviderRequest<'_>) -> Result<String, ProviderError> {
        let url = self.lookup_url(request);
        let response = self.client.head(&url).send().await?;
        if !response.status().is_success() {
            return Err(classify_failure(response).await);
        }
        Ok(response.url().to_string())
    }
}
