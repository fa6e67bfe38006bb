//! Entitlement gate read from the identity layer's forwarded headers.
//!
//! The service only consumes the allow/deny decision. Usage counters are owned
//! and decremented upstream.

use axum::http::HeaderMap;
use tracing::warn;

pub const PLAN_TIER_HEADER: &str = "x-plan-tier";
pub const REMAINING_USES_HEADER: &str = "x-remaining-uses";
pub const DEFAULT_PLAN: &str = "free";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entitlement {
    pub plan: String,
    /// `None` means unlimited.
    pub remaining: Option<u32>,
}

impl Default for Entitlement {
    fn default() -> Self {
        Self {
            plan: DEFAULT_PLAN.to_string(),
            remaining: None,
        }
    }
}

impl Entitlement {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let plan = headers
            .get(PLAN_TIER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_PLAN.to_string());

        let remaining = headers
            .get(REMAINING_USES_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|raw| match raw.trim().parse::<u32>() {
                Ok(n) => Some(n),
                Err(_) => {
                    warn!("Ignoring malformed {REMAINING_USES_HEADER} header: {raw:?}");
                    None
                }
            });

        Self { plan, remaining }
    }

    pub fn allows_generation(&self) -> bool {
        self.remaining != Some(0)
    }
}
