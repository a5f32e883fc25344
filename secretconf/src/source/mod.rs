//! Secret source capability and bundled implementations
//!
//! A [`SecretSource`] answers one question: "what is the current value of
//! this named secret?". The [`Resolver`](crate::Resolver) consults it after
//! the environment and before the fallback. Every failure a source reports
//! is absorbed by the resolver, so implementations only need to describe
//! what went wrong.

use async_trait::async_trait;

mod file;
mod memory;

#[cfg(feature = "gcp")]
mod gcp;

pub use file::FileSource;
pub use memory::MemorySource;

#[cfg(feature = "gcp")]
pub use gcp::GcpSecretManager;

/// Fetches the latest value of a named secret.
///
/// Dropping the returned future cancels the fetch; the resolver treats a
/// cancelled or timed-out fetch like any other failure.
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Fetch the current value of `key`.
    async fn fetch(&self, key: &str) -> Result<String, SourceError>;
}

/// Errors reported by a [`SecretSource`].
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The secret does not exist or is not accessible.
    #[error("secret '{key}' not found")]
    NotFound {
        /// Requested key
        key: String,
    },

    /// The key cannot be used with this source.
    #[error("invalid secret key '{key}': {reason}")]
    InvalidKey {
        /// Requested key
        key: String,
        /// Why the key was rejected
        reason: &'static str,
    },

    /// The fetch did not finish within the configured timeout.
    #[error("fetching secret '{key}' timed out after {timeout:?}")]
    Timeout {
        /// Requested key
        key: String,
        /// Configured timeout
        timeout: std::time::Duration,
    },

    /// Reading a secret file failed.
    #[error("failed to read secret file '{path}': {source}")]
    Io {
        /// Path of the secret file
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The remote service rejected the request.
    #[error("secret service returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The payload could not be decoded into a UTF-8 string.
    #[error("failed to decode secret payload: {0}")]
    Decode(String),

    /// Transport-level HTTP failure.
    #[cfg(feature = "gcp")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl SourceError {
    /// Whether this error only means "the secret is absent".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[async_trait]
impl<S: SecretSource + ?Sized> SecretSource for std::sync::Arc<S> {
    async fn fetch(&self, key: &str) -> Result<String, SourceError> {
        (**self).fetch(key).await
    }
}

#[async_trait]
impl<S: SecretSource + ?Sized> SecretSource for Box<S> {
    async fn fetch(&self, key: &str) -> Result<String, SourceError> {
        (**self).fetch(key).await
    }
}
