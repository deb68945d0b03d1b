/// Shape validators and text-form predicates.
///
/// These are shallow checks: they look at container shape and key presence,
/// never at value types or deep structure. Every batch operation that takes
/// a JSON collection calls `require_array` as its precondition guard.
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::Value;

use crate::error::{ProofError, Result};

/// A proof handle is usable iff it is a non-empty object carrying both a
/// `uri` and a `hashIdNode` key. Value types are not inspected.
pub fn is_valid_proof_handle(handle: &Value) -> bool {
    match handle {
        Value::Object(map) => {
            !map.is_empty() && map.contains_key("uri") && map.contains_key("hashIdNode")
        }
        _ => false,
    }
}

/// Require that a JSON value is an array, returning its elements.
pub fn require_array(value: &Value) -> Result<&Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| ProofError::InvalidArgument("expected an array".into()))
}

/// Whether a string is well-formed JSON text.
pub fn is_json(text: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(text).is_ok()
}

/// Whether a string is non-empty, even-length hex.
pub fn is_hex(text: &str) -> bool {
    !text.is_empty() && text.len() % 2 == 0 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Whether a string decodes as standard base64.
pub fn is_base64(text: &str) -> bool {
    !text.is_empty() && BASE64.decode(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_proof_handle() {
        assert!(is_valid_proof_handle(&json!({"uri": "u", "hashIdNode": "h"})));
    }

    #[test]
    fn test_handle_missing_hash_id_node() {
        assert!(!is_valid_proof_handle(&json!({"uri": "u"})));
    }

    #[test]
    fn test_handle_empty_object() {
        assert!(!is_valid_proof_handle(&json!({})));
    }

    #[test]
    fn test_handle_non_object() {
        assert!(!is_valid_proof_handle(&json!("not an object")));
        assert!(!is_valid_proof_handle(&json!(42)));
        assert!(!is_valid_proof_handle(&json!(["uri", "hashIdNode"])));
    }

    #[test]
    fn test_require_array() {
        assert!(require_array(&json!([1, 2])).is_ok());
        assert!(matches!(
            require_array(&json!({"a": 1})),
            Err(ProofError::InvalidArgument(_))
        ));
        assert!(matches!(
            require_array(&json!("nope")),
            Err(ProofError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_is_json() {
        assert!(is_json(r#"{"hash": "ab"}"#));
        assert!(is_json("[1,2,3]"));
        assert!(!is_json("{not json"));
    }

    #[test]
    fn test_is_hex() {
        assert!(is_hex("deadBEEF"));
        assert!(!is_hex("abc")); // odd length
        assert!(!is_hex("zzzz"));
        assert!(!is_hex(""));
    }

    #[test]
    fn test_is_base64() {
        assert!(is_base64("eyJhIjoxfQ=="));
        assert!(!is_base64("!!!not base64!!!"));
        assert!(!is_base64(""));
    }
}
