use super::{SecretSource, SourceError};
use async_trait::async_trait;
use std::collections::HashMap;

/// An in-memory secret source, useful for tests and local development.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    secrets: HashMap<String, String>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a secret.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.secrets.insert(key.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemorySource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            secrets: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl SecretSource for MemorySource {
    async fn fetch(&self, key: &str) -> Result<String, SourceError> {
        self.secrets
            .get(key)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                key: key.to_string(),
            })
    }
}
