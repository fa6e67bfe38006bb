//! Background byte loading for the renderer.
//!
//! Three URI shapes reach the exporter: remote `http(s)` URLs from the AI and
//! stock providers, inline `data:` URIs from the AI-secondary provider, and
//! `asset://` references to the bundled curated images.
//!
//! Sheets arrive from clients, so a remote URL is fetched only when this
//! process issued it, its host resolves to public addresses, and its body
//! fits in [`MAX_ASSET_BYTES`]. Host names are resolved by [`PublicResolver`]
//! inside the client, so the address that was checked is the one connected to.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use bytes::{Bytes, BytesMut};
use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use reqwest::{redirect, Client, Url};
use thiserror::Error;
use tracing::debug;

use crate::background::providers::curated;
use crate::background::ResolverContext;

pub const ASSET_SCHEME: &str = "asset://";

/// Largest background body the exporter will hold in memory.
pub const MAX_ASSET_BYTES: usize = 16 * 1024 * 1024;

const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Unsupported background URI: {0}")]
    UnsupportedScheme(String),

    #[error("Malformed data URI")]
    MalformedDataUri,

    #[error("Base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Unknown bundled asset: {0}")]
    UnknownAsset(String),

    #[error("Asset path escapes the assets directory: {0}")]
    PathEscape(String),

    #[error("Asset read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background URL was not issued by this service: {0}")]
    NotIssued(String),

    #[error("Background host is not publicly routable: {0}")]
    BlockedHost(String),

    #[error("Background exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Background fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Background fetch returned HTTP {0}")]
    Status(u16),
}

/// HTTP client for background fetches: public-only DNS, guarded redirects.
pub fn client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .redirect(redirect_policy())
        .dns_resolver(Arc::new(PublicResolver))
        .build()
}

/// DNS resolver that fails a lookup when any answer is not publicly
/// routable. The returned addresses are the ones the client connects to.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicResolver;

impl Resolve for PublicResolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(lookup_public(name.as_str().to_string()))
    }
}

async fn lookup_public(host: String) -> Result<Addrs, Box<dyn std::error::Error + Send + Sync>> {
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host.as_str(), 0)).await?.collect();
    if addrs.is_empty() || addrs.iter().any(|a| !is_public_ip(a.ip())) {
        return Err(Box::new(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("{host} does not resolve to public addresses only"),
        )));
    }
    Ok(Box::new(addrs.into_iter()))
}

/// Redirect policy for the asset client: redirects into loopback or private
/// address literals are refused.
fn redirect_policy() -> redirect::Policy {
    redirect::Policy::custom(|attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if literal_host_blocked(attempt.url()) {
            attempt.stop()
        } else {
            attempt.follow()
        }
    })
}

#[derive(Debug, Clone)]
pub struct AssetLoader {
    client: Client,
    assets_dir: Option<PathBuf>,
    context: Arc<ResolverContext>,
    max_bytes: usize,
}

impl AssetLoader {
    pub fn new(client: Client, assets_dir: Option<PathBuf>, context: Arc<ResolverContext>) -> Self {
        Self {
            client,
            assets_dir,
            context,
            max_bytes: MAX_ASSET_BYTES,
        }
    }

    #[cfg(test)]
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub async fn load(&self, uri: &str) -> Result<Bytes, AssetError> {
        if let Some(rest) = uri.strip_prefix("data:") {
            return self.decode_data_uri(rest);
        }
        if let Some(relative) = uri.strip_prefix(ASSET_SCHEME) {
            return self.load_bundled(relative).await;
        }
        if uri.starts_with("http://") || uri.starts_with("https://") {
            return self.fetch(uri).await;
        }
        Err(AssetError::UnsupportedScheme(uri.to_string()))
    }

    /// `ASSETS_DIR` overrides the embedded copy of a bundled image.
    async fn load_bundled(&self, relative: &str) -> Result<Bytes, AssetError> {
        let rel = Path::new(relative);
        if rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(AssetError::PathEscape(relative.to_string()));
        }
        if let Some(dir) = &self.assets_dir {
            let path = dir.join(rel);
            if tokio::fs::try_exists(&path).await? {
                debug!("Loading bundled background {}", path.display());
                return Ok(Bytes::from(tokio::fs::read(path).await?));
            }
        }
        curated::embedded(relative)
            .map(Bytes::from_static)
            .ok_or_else(|| AssetError::UnknownAsset(relative.to_string()))
    }

    async fn fetch(&self, uri: &str) -> Result<Bytes, AssetError> {
        if !self.context.cache.issued(uri) {
            return Err(AssetError::NotIssued(uri.to_string()));
        }
        let url = Url::parse(uri).map_err(|_| AssetError::UnsupportedScheme(uri.to_string()))?;
        // IP literals never reach the resolver.
        if literal_host_blocked(&url) {
            return Err(AssetError::BlockedHost(
                url.host_str().unwrap_or_default().to_string(),
            ));
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::Status(status.as_u16()));
        }
        read_capped(response, self.max_bytes).await
    }

    /// Decodes the part of a `data:` URI after the scheme. Only base64
    /// payloads are produced upstream, so percent-encoded payloads are rejected.
    fn decode_data_uri(&self, rest: &str) -> Result<Bytes, AssetError> {
        let (meta, payload) = rest.split_once(',').ok_or(AssetError::MalformedDataUri)?;
        if !meta.ends_with(";base64") {
            return Err(AssetError::MalformedDataUri);
        }
        let payload = payload.trim();
        if payload.len() / 4 * 3 > self.max_bytes {
            return Err(AssetError::TooLarge {
                limit: self.max_bytes,
            });
        }
        let bytes = base64::engine::general_purpose::STANDARD.decode(payload)?;
        Ok(Bytes::from(bytes))
    }
}

/// Reads a response body, giving up once it passes `limit` bytes.
async fn read_capped(mut response: reqwest::Response, limit: usize) -> Result<Bytes, AssetError> {
    if response.content_length().is_some_and(|len| len > limit as u64) {
        return Err(AssetError::TooLarge { limit });
    }
    let mut body = BytesMut::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > limit {
            return Err(AssetError::TooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}

/// Checks the host without DNS: `localhost` names and non-public IP literals.
fn literal_host_blocked(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return true;
    };
    let host = host.trim_start_matches('[').trim_end_matches(']');
    if let Ok(ip) = host.parse::<IpAddr>() {
        return !is_public_ip(ip);
    }
    let name = host.trim_end_matches('.').to_ascii_lowercase();
    name == "localhost" || name.ends_with(".localhost")
}

pub fn is_public_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, ..] = v4.octets();
            !(v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.is_documentation()
                || v4.is_multicast()
                // 100.64.0.0/10 carrier-grade NAT
                || (a == 100 && b & 0xc0 == 64)
                || a == 0)
        }
        IpAddr::V6(v6) => {
            if let Some(v4) = v6.to_ipv4_mapped() {
                return is_public_ip(IpAddr::V4(v4));
            }
            let first = v6.segments()[0];
            !(v6.is_loopback()
                || v6.is_unspecified()
                || v6.is_multicast()
                // fc00::/7 unique local
                || first & 0xfe00 == 0xfc00
                // fe80::/10 link local
                || first & 0xffc0 == 0xfe80)
        }
    }
}
