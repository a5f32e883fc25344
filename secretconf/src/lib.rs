//! Configuration values from environment variables, secret stores, or defaults
//!
//! `secretconf` resolves configuration values with a fixed priority so that
//! the same code runs locally with plain environment variables and in
//! production against a managed secret store.
//!
//! # Resolution Priority
//!
//! For a reference expression `sm://KEY||fallback`:
//! 1. Environment variable `KEY` (optionally prefixed); empty values are ignored
//! 2. A [`SecretSource`], if one is bound and enabled; failures fall through
//! 3. The fallback after `||`, if present
//!
//! Expressions without the `sm://` prefix are literal values.
//!
//! # Features
//!
//! - **Direct resolution**: [`Resolver::resolve`] and [`Resolver::resolve_list`]
//! - **Declarative structs**: `#[derive(SecretConf)]` with `#[secret("...")]` annotations
//! - **Array values**: JSON arrays (`["a","b"]`) or comma-separated lists (`a,b`)
//! - **Pluggable stores**: [`MemorySource`], [`FileSource`], and (feature `gcp`)
//!   `GcpSecretManager`
//!
//! # Example
//!
//! ```rust
//! use secretconf::{Loader, Resolver, SecretConf};
//!
//! #[derive(Debug, Default, SecretConf)]
//! struct Config {
//!     // Fails the load if no tier has a value
//!     #[secret("API_KEY,required")]
//!     pub api_key: String,
//!
//!     // Falls back to 8080
//!     #[secret("PORT,default=8080")]
//!     pub port: u16,
//!
//!     // Never touched by the loader
//!     #[secret("-")]
//!     pub internal: String,
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> secretconf::Result<()> {
//! #     std::env::set_var("API_KEY", "test-key");
//! let loader = Loader::new(Resolver::new());
//! let config: Config = loader.load_new().await?;
//! #     assert_eq!(config.api_key, "test-key");
//! #     assert_eq!(config.port, 8080);
//! #     Ok(())
//! # }
//! ```
//!
//! # Annotations
//!
//! `#[secret("KEY[,default=VALUE][,required]")]`
//!
//! - `KEY`: environment variable and secret name
//! - `default=VALUE`: fallback; cut at the first comma
//! - `required`: abort the load if the field cannot be resolved or parsed
//! - `-`: skip the field
//!
//! Supported field types: `String`, signed and unsigned integers, `f32`,
//! `f64`, `bool`, and `Vec<String>`. Fields of other types are reported as
//! [`Error::UnsupportedType`], which only aborts the load when the field is
//! `required`.

// Lets generated `::secretconf::` paths resolve inside this crate's own tests
extern crate self as secretconf;

mod array;
mod config;
mod directive;
mod env;
mod error;
mod field;
mod loader;
mod reference;
mod resolver;
mod source;

#[doc(hidden)]
pub mod de;

pub use array::parse_array;
pub use config::{
    ResolverConfig, ENV_PREFIX_VAR, FETCH_TIMEOUT_VAR, SECRET_SOURCE_ENABLED_VAR,
};
pub use directive::{FieldDirective, SKIP_SENTINEL};
pub use env::{Environment, ProcessEnv};
pub use error::{Error, Result};
pub use field::{parse_bool, FieldKind, FieldSpec, FieldValue};
pub use loader::{Loader, SecretConf};
pub use reference::{is_reference, Reference, FALLBACK_SEPARATOR, REFERENCE_PREFIX};
pub use resolver::{Resolver, ResolverBuilder};
pub use source::{FileSource, MemorySource, SecretSource, SourceError};

#[cfg(feature = "gcp")]
pub use source::GcpSecretManager;

pub use secretconf_derive::SecretConf;
