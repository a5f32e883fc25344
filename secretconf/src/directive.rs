//! Field annotation parsing
//!
//! Annotation syntax: `KEY[,default=VALUE][,required]`, or `-` to skip.
//! Segments after the key may come in any order; unknown segments are
//! ignored. Values are split on every comma, so a default containing a
//! comma is cut at the first one (`default=a,b` yields `a`).

use crate::reference::Reference;

/// Annotation value that leaves a field untouched.
pub const SKIP_SENTINEL: &str = "-";

const DEFAULT_PREFIX: &str = "default=";
const REQUIRED_FLAG: &str = "required";

/// Parsed form of a field's `#[secret("...")]` annotation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldDirective {
    /// Lookup key; empty means "skip this field"
    pub key: String,
    /// Fallback from `default=`
    pub fallback: String,
    /// Whether a `default=` segment was present
    pub has_fallback: bool,
    /// Whether failures abort the whole load
    pub required: bool,
}

impl FieldDirective {
    /// Parse an annotation. Never fails.
    pub fn parse(annotation: &str) -> Self {
        let mut segments = annotation.split(',');
        let mut directive = Self {
            key: segments.next().unwrap_or_default().trim().to_string(),
            ..Self::default()
        };

        for segment in segments.map(str::trim) {
            if segment == REQUIRED_FLAG {
                directive.required = true;
            } else if let Some(value) = segment.strip_prefix(DEFAULT_PREFIX) {
                directive.fallback = value.to_string();
                directive.has_fallback = true;
            }
        }

        directive
    }

    /// Whether the field should be left untouched.
    pub fn is_skip(&self) -> bool {
        self.key.is_empty()
    }

    /// The reference this directive resolves, e.g. `sm://KEY||fallback`.
    pub fn to_reference(&self) -> Reference {
        Reference {
            key: self.key.clone(),
            fallback: self.fallback.clone(),
            has_fallback: self.has_fallback,
            is_managed: true,
        }
    }

    /// Canonical expression handed to the resolver.
    pub fn to_expression(&self) -> String {
        self.to_reference().to_expression()
    }
}
