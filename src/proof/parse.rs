/// Proof parsing: turn raw proof items into canonical `ParsedProof` trees.
///
/// Parsing is a collaborator seam, not part of the flattening core: the
/// `ProofParser` trait lets callers plug in whichever format detector they
/// need, and `JsonProofParser` covers the three canonical encodings
/// (structured object, JSON text, hex/base64-wrapped JSON bytes).
///
/// Unlike normalization, batch parsing is fail-fast: one item in a broken
/// format usually means the caller made a systematic mistake, so the first
/// format error aborts the whole call.
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::Value;

use super::ParsedProof;
use crate::error::{ProofError, Result};
use crate::validate;

/// Converts one raw proof item into a canonical parsed-proof tree.
pub trait ProofParser {
    /// Parse a single item: a structured object, a JSON-encoded string, or
    /// a binary string (hex or base64).
    ///
    /// Fails with `UnknownProofFormat` when the item matches none of the
    /// supported shapes. The returned proof always has `branches` populated,
    /// even if empty.
    fn parse(&self, item: &Value) -> Result<ParsedProof>;
}

/// Parser for the canonical JSON encodings of a proof.
///
/// Hex and base64 strings are decoded and their payload bytes parsed as
/// JSON. Hex is tried before base64 since every even-length hex string is
/// also valid base64.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonProofParser;

impl ProofParser for JsonProofParser {
    fn parse(&self, item: &Value) -> Result<ParsedProof> {
        match item {
            Value::Object(_) => serde_json::from_value(item.clone())
                .map_err(|e| ProofError::UnknownProofFormat(format!("object proof: {e}"))),
            Value::String(text) => parse_text(text),
            other => Err(ProofError::UnknownProofFormat(format!(
                "expected object or string, got {other}"
            ))),
        }
    }
}

fn parse_text(text: &str) -> Result<ParsedProof> {
    if validate::is_json(text) {
        return serde_json::from_str(text)
            .map_err(|e| ProofError::UnknownProofFormat(format!("JSON proof: {e}")));
    }

    let bytes = if validate::is_hex(text) {
        hex::decode(text).map_err(|e| ProofError::UnknownProofFormat(format!("hex proof: {e}")))?
    } else if validate::is_base64(text) {
        BASE64
            .decode(text)
            .map_err(|e| ProofError::UnknownProofFormat(format!("base64 proof: {e}")))?
    } else {
        return Err(ProofError::UnknownProofFormat(
            "string is neither JSON, hex, nor base64".into(),
        ));
    };

    serde_json::from_slice(&bytes)
        .map_err(|e| ProofError::UnknownProofFormat(format!("decoded proof payload: {e}")))
}

/// Parse a batch of raw proof items, 1:1 and in order.
///
/// Fail-fast: the first `UnknownProofFormat` aborts the batch.
pub fn parse_proofs(items: &Value, parser: &dyn ProofParser) -> Result<Vec<ParsedProof>> {
    validate::require_array(items)?
        .iter()
        .map(|item| parser.parse(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn proof_json() -> Value {
        json!({
            "hash": "aa11",
            "hash_id_node": "node-1",
            "hash_id_core": "core-1",
            "hash_submitted_node_at": "2024-03-01T12:00:00Z",
            "hash_submitted_core_at": "2024-03-01T12:00:05Z",
            "branches": [
                {
                    "label": "cal_anchor_branch",
                    "anchors": [
                        {"type": "cal", "anchor_id": "991", "expected_value": "ff00", "uris": ["http://a/cal/991"]}
                    ]
                }
            ]
        })
    }

    #[test]
    fn test_parse_object() {
        let proof = JsonProofParser.parse(&proof_json()).unwrap();
        assert_eq!(proof.hash, "aa11");
        assert_eq!(proof.branches.len(), 1);
        assert_eq!(proof.branches[0].label.as_deref(), Some("cal_anchor_branch"));
    }

    #[test]
    fn test_parse_json_string() {
        let text = proof_json().to_string();
        let proof = JsonProofParser.parse(&Value::String(text)).unwrap();
        assert_eq!(proof.hash_id_node, "node-1");
    }

    #[test]
    fn test_parse_base64_string() {
        let encoded = BASE64.encode(proof_json().to_string());
        let proof = JsonProofParser.parse(&Value::String(encoded)).unwrap();
        assert_eq!(proof.hash_id_core, "core-1");
    }

    #[test]
    fn test_parse_hex_string() {
        let encoded = hex::encode(proof_json().to_string());
        let proof = JsonProofParser.parse(&Value::String(encoded)).unwrap();
        assert_eq!(proof.hash, "aa11");
    }

    #[test]
    fn test_missing_branches_defaults_to_empty() {
        let input = json!({
            "hash": "aa",
            "hash_id_node": "n",
            "hash_id_core": "c",
            "hash_submitted_node_at": "2024-03-01T12:00:00Z",
            "hash_submitted_core_at": "2024-03-01T12:00:05Z",
        });
        let proof = JsonProofParser.parse(&input).unwrap();
        assert!(proof.branches.is_empty());
    }

    #[test]
    fn test_unknown_format() {
        let err = JsonProofParser.parse(&json!(42)).unwrap_err();
        assert!(matches!(err, ProofError::UnknownProofFormat(_)));

        let err = JsonProofParser
            .parse(&Value::String("!!definitely not a proof!!".into()))
            .unwrap_err();
        assert!(matches!(err, ProofError::UnknownProofFormat(_)));
    }

    #[test]
    fn test_parse_proofs_fail_fast() {
        let items = json!([proof_json(), 42, proof_json()]);
        let err = parse_proofs(&items, &JsonProofParser).unwrap_err();
        assert!(matches!(err, ProofError::UnknownProofFormat(_)));
    }

    #[test]
    fn test_parse_proofs_batch() {
        let items = json!([proof_json(), proof_json().to_string()]);
        let proofs = parse_proofs(&items, &JsonProofParser).unwrap();
        assert_eq!(proofs.len(), 2);
        assert_eq!(proofs[0].hash, proofs[1].hash);
    }

    #[test]
    fn test_parse_proofs_non_array() {
        let err = parse_proofs(&proof_json(), &JsonProofParser).unwrap_err();
        assert!(matches!(err, ProofError::InvalidArgument(_)));
    }
}
