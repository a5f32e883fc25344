//! Error types for value resolution and struct loading

/// Errors that can occur while resolving values or loading a struct.
///
/// Callers branch on the variant, never on the rendered message:
/// - Missing values (`NotFound`)
/// - Malformed array-shaped values (`Format`)
/// - Field-level failures raised by the [`Loader`](crate::Loader)
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No tier produced a value and no fallback was declared.
    #[error("Secret '{key}' not found and no default value was provided")]
    NotFound {
        /// Lookup key (without the environment prefix)
        key: String,
    },

    /// A value that looks like a bracketed array is not valid array syntax.
    #[error("Invalid format: {value} ({reason})")]
    Format {
        /// The offending raw value
        value: String,
        /// Message from the array parser
        reason: String,
    },

    /// A field marked `required` could not be resolved or coerced.
    ///
    /// Aborts the whole load; fields earlier in declaration order keep
    /// the values already assigned to them.
    #[error("Required field '{field}' (key: {key}) could not be loaded: {source}")]
    RequiredField {
        /// Name of the struct field
        field: String,
        /// Lookup key from the field annotation
        key: String,
        /// The failure that made the field unresolvable
        source: Box<Error>,
    },

    /// The field's declared type has no coercion rule.
    #[error("Unsupported type for field '{field}': {type_name}")]
    UnsupportedType {
        /// Name of the struct field
        field: String,
        /// Declared type of the field
        type_name: String,
    },

    /// A resolved string could not be converted into the field's type.
    #[error("Failed to parse field '{field}' as {type_name}: {message}")]
    Coerce {
        /// Name of the struct field
        field: String,
        /// Type the conversion was attempted for
        type_name: String,
        /// Error message from the parser
        message: String,
    },

    /// The load target does not accept the field table it advertised.
    #[error("Invalid load target {type_name}: {reason}")]
    InvalidTarget {
        /// Type name of the target
        type_name: String,
        /// What the target rejected
        reason: String,
    },

    /// A resolver setting read from the environment is malformed.
    #[error("Invalid value for '{var}': {message}")]
    Config {
        /// Environment variable holding the setting
        var: String,
        /// What is wrong with it
        message: String,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Create a not-found error
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create a coercion error for target type `T` (used by generated code)
    #[doc(hidden)]
    pub fn coerce<T: ?Sized>(field: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Coerce {
            field: field.into(),
            type_name: std::any::type_name::<T>().to_string(),
            message: message.to_string(),
        }
    }

    /// Create an invalid-target error for `T` (used by generated code)
    #[doc(hidden)]
    pub fn invalid_target<T: ?Sized>(reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            type_name: std::any::type_name::<T>().to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error must abort a load even for non-required fields.
    pub(crate) fn is_fatal(&self) -> bool {
        matches!(self, Self::Format { .. } | Self::InvalidTarget { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_key() {
        let err = Error::not_found("API_KEY");
        assert_eq!(
            err.to_string(),
            "Secret 'API_KEY' not found and no default value was provided"
        );
    }

    #[test]
    fn test_coerce_contains_type_info() {
        let err = Error::coerce::<u16>("port", "invalid digit found in string");
        match err {
            Error::Coerce { type_name, field, .. } => {
                assert_eq!(field, "port");
                assert!(type_name.contains("u16"));
            }
            _ => panic!("Expected Coerce error"),
        }
    }

    #[test]
    fn test_required_field_exposes_source() {
        use std::error::Error as _;

        let err = Error::RequiredField {
            field: "api_key".to_string(),
            key: "API_KEY".to_string(),
            source: Box::new(Error::not_found("API_KEY")),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn test_fatal_classification() {
        assert!(Error::Format {
            value: "[".to_string(),
            reason: "EOF".to_string()
        }
        .is_fatal());
        assert!(Error::invalid_target::<String>("no field").is_fatal());
        assert!(!Error::not_found("K").is_fatal());
    }
}
