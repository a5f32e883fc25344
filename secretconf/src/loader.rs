//! Struct population from field annotations

use crate::directive::{FieldDirective, SKIP_SENTINEL};
use crate::error::{Error, Result};
use crate::field::{FieldKind, FieldSpec, FieldValue};
use crate::resolver::Resolver;

/// A struct whose fields can be populated by a [`Loader`].
///
/// Implemented by `#[derive(SecretConf)]`. Hand-written implementations
/// must accept every field name listed by [`fields`](Self::fields) whose
/// kind is supported.
pub trait SecretConf {
    /// Fields in declaration order.
    fn fields() -> &'static [FieldSpec];

    /// Store a coerced value into the named field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTarget`] for a field name the type does not
    /// declare, or [`Error::Coerce`] when the value does not fit.
    fn assign(&mut self, field: &str, value: FieldValue) -> Result<()>;
}

/// Populates [`SecretConf`] structs using a [`Resolver`].
///
/// Per field, in declaration order:
/// 1. Fields without an annotation, annotated `-`, or with an empty key are
///    left untouched.
/// 2. The annotation becomes `sm://KEY[||default]` and is resolved.
/// 3. The value is coerced to the field type and assigned.
///
/// Any failure on a `required` field aborts the load with
/// [`Error::RequiredField`], carrying the underlying error as its source.
/// Failures on other fields leave the field untouched, except malformed
/// array values ([`Error::Format`]), which abort the load unwrapped.
///
/// # Example
///
/// ```
/// use secretconf::{Loader, Resolver, SecretConf};
/// use std::collections::HashMap;
///
/// #[derive(Debug, Default, SecretConf)]
/// struct Config {
///     #[secret("DB_HOST,default=localhost")]
///     db_host: String,
///     #[secret("DB_PORT,default=5432")]
///     db_port: u16,
///     #[secret("ALLOWED_HOSTS")]
///     allowed_hosts: Vec<String>,
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> secretconf::Result<()> {
/// let env = HashMap::from([("ALLOWED_HOSTS".to_string(), "a.example, b.example".to_string())]);
/// let loader = Loader::new(Resolver::builder().environment(env).build());
///
/// let config: Config = loader.load_new().await?;
/// assert_eq!(config.db_host, "localhost");
/// assert_eq!(config.db_port, 5432);
/// assert_eq!(config.allowed_hosts, vec!["a.example", "b.example"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Loader {
    resolver: Resolver,
}

impl From<Resolver> for Loader {
    fn from(resolver: Resolver) -> Self {
        Self::new(resolver)
    }
}

impl Loader {
    /// Wrap a resolver.
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }

    /// The resolver used for every field.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Populate `target` in place.
    ///
    /// # Errors
    ///
    /// - [`Error::RequiredField`] when a required field cannot be loaded
    /// - [`Error::Format`] when an optional list field holds malformed array
    ///   syntax
    /// - [`Error::InvalidTarget`] when `target` rejects one of its own fields
    ///
    /// Fields processed before the failure keep their new values.
    pub async fn load<T: SecretConf>(&self, target: &mut T) -> Result<()> {
        for spec in T::fields() {
            let Some(annotation) = spec.annotation else {
                continue;
            };
            if annotation == SKIP_SENTINEL {
                continue;
            }

            let directive = FieldDirective::parse(annotation);
            if directive.is_skip() {
                continue;
            }

            let expression = directive.to_expression();
            let outcome = match self.resolve_field(spec, &expression).await {
                Ok(value) => target.assign(spec.name, value),
                Err(e) => Err(e),
            };

            match outcome {
                Ok(()) => {}
                Err(e @ Error::InvalidTarget { .. }) => return Err(e),
                Err(e) if directive.required => {
                    return Err(Error::RequiredField {
                        field: spec.name.to_string(),
                        key: directive.key,
                        source: Box::new(e),
                    });
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::debug!(
                        field = spec.name,
                        key = %directive.key,
                        error = %e,
                        "optional field left unchanged"
                    );
                }
            }
        }

        Ok(())
    }

    /// Build a default `T` and populate it.
    pub async fn load_new<T: SecretConf + Default>(&self) -> Result<T> {
        let mut target = T::default();
        self.load(&mut target).await?;
        Ok(target)
    }

    async fn resolve_field(&self, spec: &FieldSpec, expression: &str) -> Result<FieldValue> {
        match spec.kind {
            FieldKind::StringList => self
                .resolver
                .resolve_list(&[expression])
                .await
                .map(FieldValue::List),
            FieldKind::Unsupported { type_name } => Err(Error::UnsupportedType {
                field: spec.name.to_string(),
                type_name: type_name.to_string(),
            }),
            kind => {
                let raw = self.resolver.resolve(expression).await?;
                kind.coerce(spec.name, &raw)
            }
        }
    }
}
