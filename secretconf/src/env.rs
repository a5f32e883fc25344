//! Environment lookup capability

use std::collections::HashMap;

/// Source of environment-style key/value pairs.
///
/// The resolver consults this first. Returning `Some("")` is allowed; the
/// resolver treats empty values as absent.
pub trait Environment: Send + Sync {
    /// Look up `key`, returning `None` if it is not set.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The real process environment.
///
/// Values that are not valid UTF-8 are reported as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var_os(key).and_then(|v| v.into_string().ok())
    }
}

impl Environment for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
