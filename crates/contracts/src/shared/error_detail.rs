//! Error bodies returned by the invoicing backend
//!
//! Failures are reported as `{"detail": ...}`. `detail` is usually a string,
//! but request validation failures carry a list of `{loc, msg, type}` entries.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// Extracts a human readable `detail` from an error response body.
/// Returns `None` when the body is not JSON or carries no usable detail.
pub fn parse_error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Array(entries) => {
            let messages: Vec<String> = entries
                .iter()
                .map(|entry| match entry.get("msg").and_then(Value::as_str) {
                    Some(msg) => msg.to_string(),
                    None => entry.to_string(),
                })
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail() {
        assert_eq!(
            parse_error_detail(r#"{"detail":"Invoice not found"}"#).as_deref(),
            Some("Invoice not found")
        );
    }

    #[test]
    fn test_validation_list_detail() {
        let body = r#"{"detail":[
            {"loc":["body","items",0,"quantity"],"msg":"Input should be a valid number","type":"float_type"},
            {"loc":["body","date"],"msg":"Input should be a valid date","type":"date_type"}
        ]}"#;
        assert_eq!(
            parse_error_detail(body).as_deref(),
            Some("Input should be a valid number; Input should be a valid date")
        );
    }

    #[test]
    fn test_missing_or_unparseable_detail() {
        assert_eq!(parse_error_detail(""), None);
        assert_eq!(parse_error_detail("<html>502 Bad Gateway</html>"), None);
        assert_eq!(parse_error_detail(r#"{"error":"x"}"#), None);
        assert_eq!(parse_error_detail(r#"{"detail":null}"#), None);
        assert_eq!(parse_error_detail(r#"{"detail":""}"#), None);
        assert_eq!(parse_error_detail(r#"{"detail":[]}"#), None);
    }

    #[test]
    fn test_object_detail_is_rendered_as_json() {
        assert_eq!(
            parse_error_detail(r#"{"detail":{"code":42}}"#).as_deref(),
            Some(r#"{"code":42}"#)
        );
    }
}
