//! Provider credential store. Keys are opaque strings; only presence matters.

use dashmap::DashMap;

use super::ProviderKind;

#[derive(Debug, Default)]
pub struct CredentialStore {
    keys: DashMap<ProviderKind, String>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a key. A blank key clears the slot instead.
    pub fn set(&self, provider: ProviderKind, key: impl Into<String>) {
        let key = key.into();
        if key.trim().is_empty() {
            self.keys.remove(&provider);
        } else {
            self.keys.insert(provider, key);
        }
    }

    pub fn clear(&self, provider: ProviderKind) {
        self.keys.remove(&provider);
    }

    pub fn get(&self, provider: ProviderKind) -> Option<String> {
        self.keys.get(&provider).map(|k| k.value().clone())
    }

    pub fn is_configured(&self, provider: ProviderKind) -> bool {
        self.keys.contains_key(&provider)
    }
}
