//! Three-tier value resolution
//!
//! Priority for a managed reference `sm://KEY||fallback`:
//! 1. Environment variable `{env_prefix}KEY` (empty values count as absent)
//! 2. Secret source, if enabled and bound (failures fall through)
//! 3. The fallback, if one was declared
//!
//! Expressions without the `sm://` prefix are returned unchanged.

use std::sync::Arc;
use std::time::Duration;

use crate::array::parse_array;
use crate::config::ResolverConfig;
use crate::env::{Environment, ProcessEnv};
use crate::error::{Error, Result};
use crate::reference::{is_reference, Reference};
use crate::source::{SecretSource, SourceError};

/// Resolves reference expressions against the environment, a secret
/// source, and declared fallbacks.
///
/// A resolver holds no mutable state, so one instance can serve concurrent
/// callers as long as its secret source can.
///
/// # Example
///
/// ```
/// use secretconf::{MemorySource, Resolver};
/// use std::collections::HashMap;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> secretconf::Result<()> {
/// let resolver = Resolver::builder()
///     .environment(HashMap::<String, String>::new())
///     .source(MemorySource::from_iter([("API_KEY", "from-store")]))
///     .build();
///
/// assert_eq!(resolver.resolve("sm://API_KEY||dev-key").await?, "from-store");
/// assert_eq!(resolver.resolve("sm://MISSING||dev-key").await?, "dev-key");
/// assert_eq!(resolver.resolve("literal").await?, "literal");
/// # Ok(())
/// # }
/// ```
pub struct Resolver {
    config: ResolverConfig,
    source: Option<Arc<dyn SecretSource>>,
    env: Arc<dyn Environment>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .field("has_source", &self.source.is_some())
            .finish_non_exhaustive()
    }
}

impl Resolver {
    /// Environment-only resolver over the process environment.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a resolver.
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::default()
    }

    /// Settings this resolver was built with.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Whether the secret-source tier is consulted.
    pub fn secret_source_enabled(&self) -> bool {
        self.source.is_some() && self.config.secret_source_enabled.unwrap_or(true)
    }

    /// Resolve a single expression.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no tier produced a value and the
    /// reference declares no fallback.
    pub async fn resolve(&self, expression: &str) -> Result<String> {
        let reference = Reference::parse(expression);
        if !reference.is_managed {
            return Ok(reference.fallback);
        }
        self.lookup(&reference).await
    }

    /// Resolve a list of expressions.
    ///
    /// A single managed reference is treated as an array source: whichever
    /// tier answers, its value goes through [`parse_array`]. Anything else
    /// is resolved element by element.
    ///
    /// # Errors
    ///
    /// Returns the first element failure, or [`Error::Format`] when an
    /// array source holds malformed bracket syntax.
    pub async fn resolve_list<S>(&self, expressions: &[S]) -> Result<Vec<String>>
    where
        S: AsRef<str> + Sync,
    {
        match expressions {
            [] => Ok(Vec::new()),
            [single] if is_reference(single.as_ref()) => {
                let reference = Reference::parse(single.as_ref());
                let raw = self.lookup(&reference).await?;
                parse_array(&raw)
            }
            _ => {
                let mut resolved = Vec::with_capacity(expressions.len());
                for expression in expressions {
                    resolved.push(self.resolve(expression.as_ref()).await?);
                }
                Ok(resolved)
            }
        }
    }

    async fn lookup(&self, reference: &Reference) -> Result<String> {
        let key = reference.key.as_str();

        let env_key = format!("{}{}", self.config.env_prefix, key);
        if let Some(value) = self.env.lookup(&env_key).filter(|v| !v.is_empty()) {
            tracing::debug!(key, env_key = %env_key, tier = "environment", "resolved value");
            return Ok(value);
        }

        if let Some(value) = self.fetch(key).await {
            tracing::debug!(key, tier = "secret_source", "resolved value");
            return Ok(value);
        }

        if reference.has_fallback {
            tracing::debug!(key, tier = "fallback", "resolved value");
            return Ok(reference.fallback.clone());
        }

        tracing::debug!(key, "no tier produced a value");
        Err(Error::not_found(key))
    }

    async fn fetch(&self, key: &str) -> Option<String> {
        if !self.secret_source_enabled() {
            return None;
        }
        let source = self.source.as_ref()?;

        let result = match self.config.fetch_timeout {
            Some(timeout) => fetch_with_timeout(source.as_ref(), key, timeout).await,
            None => source.fetch(key).await,
        };

        match result {
            Ok(value) => Some(value),
            Err(e) if e.is_not_found() => {
                tracing::debug!(key, "secret source has no value");
                None
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "secret source lookup failed, falling through");
                None
            }
        }
    }
}

async fn fetch_with_timeout(
    source: &dyn SecretSource,
    key: &str,
    timeout: Duration,
) -> std::result::Result<String, SourceError> {
    tokio::time::timeout(timeout, source.fetch(key))
        .await
        .unwrap_or_else(|_| {
            Err(SourceError::Timeout {
                key: key.to_string(),
                timeout,
            })
        })
}

/// Builder for [`Resolver`].
#[derive(Default)]
pub struct ResolverBuilder {
    config: ResolverConfig,
    source: Option<Arc<dyn SecretSource>>,
    env: Option<Arc<dyn Environment>>,
}

impl ResolverBuilder {
    /// Bind a secret source. Enables the secret-source tier unless
    /// [`secret_source_enabled`](Self::secret_source_enabled) says otherwise.
    pub fn source(mut self, source: impl SecretSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Bind an already shared secret source.
    pub fn shared_source(mut self, source: Arc<dyn SecretSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the process environment with another lookup.
    pub fn environment(mut self, env: impl Environment + 'static) -> Self {
        self.env = Some(Arc::new(env));
        self
    }

    /// Force the secret-source tier on or off.
    pub fn secret_source_enabled(mut self, enabled: bool) -> Self {
        self.config.secret_source_enabled = Some(enabled);
        self
    }

    /// Prefix prepended to keys for environment lookups.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.env_prefix = prefix.into();
        self
    }

    /// Bound each secret-source call. Requires a tokio runtime with the
    /// time driver enabled.
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.config.fetch_timeout = Some(timeout);
        self
    }

    /// Replace all settings at once, e.g. with [`ResolverConfig::from_env`].
    pub fn config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Finish the resolver. Its settings cannot change afterwards.
    pub fn build(self) -> Resolver {
        Resolver {
            config: self.config,
            source: self.source,
            env: self.env.unwrap_or_else(|| Arc::new(ProcessEnv)),
        }
    }
}
