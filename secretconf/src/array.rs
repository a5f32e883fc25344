//! Parsing of array-shaped values
//!
//! A single environment variable or secret may hold a whole list:
//! - JSON: `["a", "b"]`
//! - Comma-separated: `a, b`
//! - Single value: `a`
//! - Empty string: no elements

use crate::error::{Error, Result};

/// Split a raw value into list elements.
///
/// Bracket detection runs before comma splitting so JSON string elements
/// containing commas stay intact.
///
/// # Errors
///
/// Returns [`Error::Format`] when the value starts with `[` but is not a
/// valid JSON array of strings.
pub fn parse_array(raw: &str) -> Result<Vec<String>> {
    let value = raw.trim();

    if value.starts_with('[') {
        return serde_json::from_str::<Vec<String>>(value).map_err(|e| Error::Format {
            value: value.to_string(),
            reason: format!("failed to parse JSON array: {e}"),
        });
    }

    if value.contains(',') {
        return Ok(value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect());
    }

    if value.is_empty() {
        Ok(Vec::new())
    } else {
        Ok(vec![value.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array() {
        assert_eq!(parse_array(r#"["a","b","c"]"#).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_json_array_keeps_inner_commas() {
        assert_eq!(
            parse_array(r#" ["a,b", "c"] "#).unwrap(),
            vec!["a,b", "c"]
        );
    }

    #[test]
    fn test_comma_separated() {
        assert_eq!(parse_array("a,b,c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(parse_array("a , b").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_comma_separated_drops_empty_parts() {
        assert_eq!(parse_array(",a,, b ,").unwrap(), vec!["a", "b"]);
        assert!(parse_array(" , ,").unwrap().is_empty());
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(parse_array("  only  ").unwrap(), vec!["only"]);
        assert!(parse_array("").unwrap().is_empty());
        assert!(parse_array("   ").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json_array() {
        let err = parse_array(r#"["a","b""#).unwrap_err();
        match err {
            Error::Format { value, reason } => {
                assert_eq!(value, r#"["a","b""#);
                assert!(reason.contains("JSON"));
            }
            other => panic!("Expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn test_json_array_of_non_strings_is_rejected() {
        assert!(matches!(parse_array("[1, 2]"), Err(Error::Format { .. })));
    }
}
