//! JSON formatting and validation.

use crate::error::Result;

/// Parse `input` and re-serialize it with two-space indentation.
///
/// The parse error, when any, carries serde_json's message including line
/// and column.
pub fn format(input: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Parse `input` and re-serialize it without whitespace.
pub fn minify(input: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    Ok(serde_json::to_string(&value)?)
}

/// Check that `input` is well-formed JSON.
pub fn validate(input: &str) -> Result<()> {
    serde_json::from_str::<serde_json::Value>(input)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_indents_objects() {
        let out = format(r#"{"b":1,"a":[1,2]}"#).unwrap();
        assert!(out.contains("\n  \"b\": 1"));
        assert!(out.contains("\n  \"a\": ["));
    }

    #[test]
    fn format_accepts_scalars() {
        assert_eq!(format("5").unwrap(), "5");
        assert_eq!(format("\"x\"").unwrap(), "\"x\"");
        assert_eq!(format("null").unwrap(), "null");
    }

    #[test]
    fn minify_strips_whitespace() {
        let out = minify("{\n  \"a\": [ 1, 2 ]\n}").unwrap();
        assert_eq!(out, r#"{"a":[1,2]}"#);
    }

    #[test]
    fn parse_error_names_the_position() {
        let err = format("{\"a\": }").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 1"), "unexpected message: {msg}");
    }

    #[test]
    fn validate_round_trip() {
        assert!(validate(r#"{"ok": true}"#).is_ok());
        assert!(validate("not json").is_err());
        assert!(validate("").is_err());
    }

    #[test]
    fn format_is_stable_once_formatted() {
        let once = format(r#"{"a":{"b":[1,2,3]}}"#).unwrap();
        let twice = format(&once).unwrap();
        assert_eq!(once, twice);
    }
}
