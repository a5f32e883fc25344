//! Field kinds and string coercion
//!
//! The set of field types the loader can populate is closed. The derive
//! macro classifies each field into a [`FieldKind`]; the loader coerces
//! resolved scalar strings with a single match over that kind.

use crate::error::{Error, Result};

/// Supported field types, with integer and float widths in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `String`
    String,
    /// `i8`, `i16`, `i32`, `i64`, `isize`
    SignedInt(u32),
    /// `u8`, `u16`, `u32`, `u64`, `usize`
    UnsignedInt(u32),
    /// `f32`, `f64`
    Float(u32),
    /// `bool`
    Bool,
    /// `Vec<String>`
    StringList,
    /// Any other type; loading such a field always fails
    Unsupported {
        /// Declared type as written in the struct
        type_name: &'static str,
    },
}

/// A coerced value, ready to be assigned to a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// String value
    Str(String),
    /// Signed integer, already range-checked for the field width
    Signed(i64),
    /// Unsigned integer, already range-checked for the field width
    Unsigned(u64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// List of strings
    List(Vec<String>),
}

/// Static description of one struct field, produced by the derive macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name
    pub name: &'static str,
    /// Raw `#[secret("...")]` annotation, if any
    pub annotation: Option<&'static str>,
    /// Declared type classification
    pub kind: FieldKind,
}

impl FieldKind {
    /// Rust spelling of the kind, e.g. `i16` or `Vec<String>`.
    pub fn type_name(&self) -> String {
        match self {
            Self::String => "String".to_string(),
            Self::SignedInt(bits) => format!("i{bits}"),
            Self::UnsignedInt(bits) => format!("u{bits}"),
            Self::Float(bits) => format!("f{bits}"),
            Self::Bool => "bool".to_string(),
            Self::StringList => "Vec<String>".to_string(),
            Self::Unsupported { type_name } => (*type_name).to_string(),
        }
    }

    /// Whether values of this kind come from a single resolved string.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::StringList | Self::Unsupported { .. })
    }

    /// Convert a resolved scalar string into a value of this kind.
    ///
    /// List values are produced by [`Resolver::resolve_list`] and never pass
    /// through here.
    ///
    /// [`Resolver::resolve_list`]: crate::Resolver::resolve_list
    ///
    /// # Errors
    ///
    /// Returns [`Error::Coerce`] when the string does not parse, is out of
    /// range, or this kind is not scalar.
    pub fn coerce(&self, field: &str, raw: &str) -> Result<FieldValue> {
        let fail = |message: String| Error::Coerce {
            field: field.to_string(),
            type_name: self.type_name(),
            message,
        };

        match *self {
            Self::String => Ok(FieldValue::Str(raw.to_string())),
            Self::SignedInt(bits) => {
                let value: i64 = raw.parse().map_err(|e| fail(format!("{e}")))?;
                let (min, max) = signed_range(bits);
                if value < min || value > max {
                    return Err(fail(format!("{value} is out of range")));
                }
                Ok(FieldValue::Signed(value))
            }
            Self::UnsignedInt(bits) => {
                let value: u64 = raw.parse().map_err(|e| fail(format!("{e}")))?;
                if value > unsigned_max(bits) {
                    return Err(fail(format!("{value} is out of range")));
                }
                Ok(FieldValue::Unsigned(value))
            }
            Self::Float(32) => raw
                .parse::<f32>()
                .map(|v| FieldValue::Float(f64::from(v)))
                .map_err(|e| fail(format!("{e}"))),
            Self::Float(_) => raw
                .parse::<f64>()
                .map(FieldValue::Float)
                .map_err(|e| fail(format!("{e}"))),
            Self::Bool => parse_bool(raw)
                .map(FieldValue::Bool)
                .ok_or_else(|| fail(format!("'{raw}' is not a boolean"))),
            Self::StringList | Self::Unsupported { .. } => {
                Err(fail("not a scalar field kind".to_string()))
            }
        }
    }
}

impl FieldValue {
    /// Short name of the variant, used in mismatch messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Signed(_) => "signed integer",
            Self::Unsigned(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::List(_) => "string list",
        }
    }
}

fn signed_range(bits: u32) -> (i64, i64) {
    if bits >= 64 {
        (i64::MIN, i64::MAX)
    } else {
        let half = 1i64 << (bits - 1);
        (-half, half - 1)
    }
}

fn unsigned_max(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Parse a boolean literal.
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
