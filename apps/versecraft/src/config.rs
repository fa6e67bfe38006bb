use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::background::cache::DEFAULT_TTL;
use crate::background::providers::{image_generation, inference, stock};

/// Application configuration loaded from environment variables.
/// Every variable is optional; providers without a key are simply skipped.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub openai_api_key: Option<String>,
    pub huggingface_api_key: Option<String>,
    /// Bearer token for credential writes. Unset disables them.
    pub admin_token: Option<String>,
    pub ai_primary_url: String,
    pub ai_primary_model: String,
    pub ai_secondary_url: String,
    pub stock_photo_url: String,
    /// Directory holding the bundled curated backgrounds (`asset://` URIs).
    pub assets_dir: Option<PathBuf>,
    pub background_cache_ttl_secs: u64,
    pub provider_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            port: or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: or("RUST_LOG", "info"),
            openai_api_key: var("OPENAI_API_KEY"),
            huggingface_api_key: var("HUGGINGFACE_API_KEY"),
            admin_token: var("ADMIN_TOKEN"),
            ai_primary_url: or("AI_PRIMARY_URL", image_generation::DEFAULT_ENDPOINT),
            ai_primary_model: or("AI_PRIMARY_MODEL", image_generation::DEFAULT_MODEL),
            ai_secondary_url: or("AI_SECONDARY_URL", inference::DEFAULT_ENDPOINT),
            stock_photo_url: or("STOCK_PHOTO_URL", stock::DEFAULT_BASE_URL),
            assets_dir: var("ASSETS_DIR").map(PathBuf::from),
            background_cache_ttl_secs: or(
                "BACKGROUND_CACHE_TTL_SECS",
                &DEFAULT_TTL.as_secs().to_string(),
            )
            .parse::<u64>()
            .context("BACKGROUND_CACHE_TTL_SECS must be a whole number of seconds")?,
            provider_timeout_secs: or("PROVIDER_TIMEOUT_SECS", "60")
                .parse::<u64>()
                .context("PROVIDER_TIMEOUT_SECS must be a whole number of seconds")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let c = config(&[]).unwrap();
        assert_eq!(c.port, 8080);
        assert_eq!(c.background_cache_ttl_secs, 3600);
        assert_eq!(c.provider_timeout_secs, 60);
        assert_eq!(c.ai_primary_model, "dall-e-3");
        assert!(c.openai_api_key.is_none());
        assert!(c.assets_dir.is_none());
        assert!(c.admin_token.is_none());
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let c = config(&[("OPENAI_API_KEY", "  "), ("PORT", "")]).unwrap();
        assert!(c.openai_api_key.is_none());
        assert_eq!(c.port, 8080);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        assert!(config(&[("PORT", "eighty")]).is_err());
    }

    #[test]
    fn test_overrides_are_read() {
        let c = config(&[
            ("HUGGINGFACE_API_KEY", "hf_abc"),
            ("ADMIN_TOKEN", "s3cret"),
            ("ASSETS_DIR", "/srv/assets"),
            ("BACKGROUND_CACHE_TTL_SECS", "120"),
        ])
        .unwrap();
        assert_eq!(c.huggingface_api_key.as_deref(), Some("hf_abc"));
        assert_eq!(c.admin_token.as_deref(), Some("s3cret"));
        assert_eq!(c.assets_dir, Some(PathBuf::from("/srv/assets")));
        assert_eq!(c.background_cache_ttl_secs, 120);
    }
}
