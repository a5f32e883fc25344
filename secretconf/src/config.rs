//! Resolver configuration

use std::time::Duration;

use crate::env::{Environment, ProcessEnv};
use crate::error::{Error, Result};
use crate::field::parse_bool;

/// Environment variable holding the environment-lookup prefix.
pub const ENV_PREFIX_VAR: &str = "SECRETCONF_ENV_PREFIX";

/// Environment variable enabling or disabling the secret-source tier.
pub const SECRET_SOURCE_ENABLED_VAR: &str = "SECRETCONF_SECRET_SOURCE_ENABLED";

/// Environment variable bounding each secret-source call, in seconds.
pub const FETCH_TIMEOUT_VAR: &str = "SECRETCONF_FETCH_TIMEOUT_SECS";

/// Settings fixed when a [`Resolver`](crate::Resolver) is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Whether the secret-source tier is consulted.
    ///
    /// `None` enables it exactly when a source is bound.
    pub secret_source_enabled: Option<bool>,

    /// Prepended to every key before the environment lookup.
    ///
    /// The secret source always receives the bare key.
    pub env_prefix: String,

    /// Upper bound for each secret-source call.
    ///
    /// An elapsed timeout counts as a source failure and falls through to
    /// the fallback tier.
    pub fetch_timeout: Option<Duration>,
}

impl ResolverConfig {
    /// Read settings from the process environment.
    ///
    /// - `SECRETCONF_ENV_PREFIX`
    /// - `SECRETCONF_SECRET_SOURCE_ENABLED` (`true`, `false`, `1`, `0`, ...)
    /// - `SECRETCONF_FETCH_TIMEOUT_SECS`
    ///
    /// Unset or empty variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a variable holds a malformed value.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(&ProcessEnv)
    }

    /// Like [`from_env`](Self::from_env) but reading from `env`.
    pub fn from_environment(env: &dyn Environment) -> Result<Self> {
        let read = |var: &str| env.lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(prefix) = read(ENV_PREFIX_VAR) {
            config.env_prefix = prefix;
        }

        if let Some(enabled) = read(SECRET_SOURCE_ENABLED_VAR) {
            let enabled = parse_bool(enabled.trim()).ok_or_else(|| Error::Config {
                var: SECRET_SOURCE_ENABLED_VAR.to_string(),
                message: "must be true or false".to_string(),
            })?;
            config.secret_source_enabled = Some(enabled);
        }

        if let Some(timeout) = read(FETCH_TIMEOUT_VAR) {
            let secs = timeout
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| Error::Config {
                    var: FETCH_TIMEOUT_VAR.to_string(),
                    message: "must be a positive number of seconds".to_string(),
                })?;
            config.fetch_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ResolverConfig::from_environment(&env(&[])).unwrap();
        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn test_reads_all_settings() {
        let config = ResolverConfig::from_environment(&env(&[
            (ENV_PREFIX_VAR, "APP_"),
            (SECRET_SOURCE_ENABLED_VAR, "false"),
            (FETCH_TIMEOUT_VAR, "5"),
        ]))
        .unwrap();

        assert_eq!(config.env_prefix, "APP_");
        assert_eq!(config.secret_source_enabled, Some(false));
        assert_eq!(config.fetch_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = ResolverConfig::from_environment(&env(&[
            (SECRET_SOURCE_ENABLED_VAR, ""),
            (FETCH_TIMEOUT_VAR, "  "),
        ]))
        .unwrap();
        assert_eq!(config.secret_source_enabled, None);
        assert_eq!(config.fetch_timeout, None);
    }

    #[test]
    fn test_invalid_values() {
        let err =
            ResolverConfig::from_environment(&env(&[(SECRET_SOURCE_ENABLED_VAR, "maybe")]))
                .unwrap_err();
        assert!(matches!(err, Error::Config { ref var, .. } if var == SECRET_SOURCE_ENABLED_VAR));

        let err = ResolverConfig::from_environment(&env(&[(FETCH_TIMEOUT_VAR, "-1")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config { ref var, .. } if var == FETCH_TIMEOUT_VAR));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = ResolverConfig::from_environment(&env(&[(FETCH_TIMEOUT_VAR, "0")])).unwrap_err();
        assert!(matches!(err, Error::Config { ref var, .. } if var == FETCH_TIMEOUT_VAR));
    }
}
