//! Resolution cache: memoizes backgrounds by `(verse reference, style)`.
//!
//! Process-local and unbounded; the key space is bounded by corpus size times
//! the number of styles. Concurrent inserts for one key are last-write-wins,
//! which is harmless because every value for a key is equally valid within
//! the TTL window.
//!
//! The cache also remembers which remote image URLs the resolver handed out,
//! so the exporter only ever fetches URLs this process issued.

use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;

use super::{BackgroundStyle, ResolvedBackground};

/// Default time-to-live for a resolved background.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub reference: String,
    pub style: BackgroundStyle,
}

impl CacheKey {
    pub fn new(reference: &str, style: BackgroundStyle) -> Self {
        Self {
            reference: reference.to_string(),
            style,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    background: ResolvedBackground,
    inserted_at: Instant,
}

#[derive(Debug)]
pub struct BackgroundCache {
    entries: DashMap<CacheKey, CacheEntry>,
    issued: DashMap<String, Instant>,
    ttl: Duration,
}

impl Default for BackgroundCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl BackgroundCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            issued: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns a copy of a fresh entry. Expired entries are evicted on read.
    pub fn get(&self, key: &CacheKey) -> Option<ResolvedBackground> {
        match self.entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                return Some(entry.background.clone());
            }
            Some(_) => {}
            None => return None,
        }
        // Re-checked under the shard lock: a concurrent resolve may have
        // refreshed the key since the read above.
        self.entries
            .remove_if(key, |_, e| e.inserted_at.elapsed() >= self.ttl);
        None
    }

    pub fn insert(&self, key: CacheKey, background: ResolvedBackground) {
        let now = Instant::now();
        if is_remote(&background.source_uri) {
            self.issued.insert(background.source_uri.clone(), now);
        }
        self.entries.insert(
            key,
            CacheEntry {
                background,
                inserted_at: now,
            },
        );
    }

    /// Whether `uri` is a remote URL handed out within the TTL window.
    pub fn issued(&self, uri: &str) -> bool {
        self.issued
            .get(uri)
            .is_some_and(|at| at.elapsed() < self.ttl)
    }

    /// Drops every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let ttl = self.ttl;
        let mut removed = 0;
        self.entries.retain(|_, e| {
            let keep = e.inserted_at.elapsed() < ttl;
            if !keep {
                removed += 1;
            }
            keep
        });
        self.issued.retain(|_, at| at.elapsed() < ttl);
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_remote(uri: &str) -> bool {
    uri.starts_with("http://") || uri.starts_with("https://")
}
