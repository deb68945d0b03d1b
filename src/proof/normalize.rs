/// Proof normalization: classify a heterogeneous batch into parseable forms.
///
/// Retrieval responses routinely mix shapes: objects wrapping a proof string,
/// already-canonical proof objects, bare encoded strings, and placeholder
/// rows for hashes that have no proof yet. Normalization keeps what can be
/// parsed, drops what can't, and reports every drop as a diagnostic instead
/// of failing the batch.
use std::fmt;

use serde_json::Value;
use tracing::warn;

use crate::error::Result;
use crate::validate;

/// A proof item that survived normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedProof {
    /// An un-parsed string form (JSON text or base64 binary).
    Text(String),
    /// An already-canonical proof object, kept as-is.
    Object(Value),
}

impl NormalizedProof {
    /// The JSON value to hand to a `ProofParser`.
    pub fn into_value(self) -> Value {
        match self {
            NormalizedProof::Text(text) => Value::String(text),
            NormalizedProof::Object(value) => value,
        }
    }
}

/// Why an item was dropped during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// A retrieval row for a hash whose proof does not exist yet.
    MissingProof { hash_id_node: String },
    /// Nothing recognizable as a proof in any supported shape.
    UnrecognizedShape,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MissingProof { hash_id_node } => {
                write!(f, "no proof for hashIdNode {hash_id_node}")
            }
            DropReason::UnrecognizedShape => write!(f, "unrecognized proof shape"),
        }
    }
}

/// A non-fatal report about one dropped batch item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Position of the dropped item in the input batch.
    pub index: usize,
    pub reason: DropReason,
}

/// Normalize a batch of proof-like items.
///
/// Returns the kept items in input order alongside the diagnostics for the
/// dropped ones. Fails only when the input is not an array. Classification
/// precedence, first match wins per item:
///
/// 1. object with a string `proof` field: keep the string
/// 2. object with `type == "Chainpoint"`: keep the object as-is
/// 3. string that is valid JSON or valid base64: keep as-is
/// 4. object without `proof` but with `hashIdNode`: drop, proof missing
/// 5. anything else: drop, unrecognized
pub fn normalize_proofs(proofs: &Value) -> Result<(Vec<NormalizedProof>, Vec<Diagnostic>)> {
    let items = validate::require_array(proofs)?;

    let mut kept = Vec::with_capacity(items.len());
    let mut diagnostics = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match classify(item) {
            Ok(normalized) => kept.push(normalized),
            Err(reason) => {
                warn!(index, reason = %reason, "dropping proof item");
                diagnostics.push(Diagnostic { index, reason });
            }
        }
    }

    Ok((kept, diagnostics))
}

fn classify(item: &Value) -> std::result::Result<NormalizedProof, DropReason> {
    if let Some(proof) = item.get("proof").and_then(Value::as_str) {
        return Ok(NormalizedProof::Text(proof.to_string()));
    }

    if item.get("type").and_then(Value::as_str) == Some("Chainpoint") {
        return Ok(NormalizedProof::Object(item.clone()));
    }

    if let Value::String(text) = item {
        if validate::is_json(text) || validate::is_base64(text) {
            return Ok(NormalizedProof::Text(text.clone()));
        }
    }

    // A retrieval row whose proof slot is empty (absent or null) but which
    // still names the hash it was fetched for.
    if item.is_object() && item.get("proof").map_or(true, Value::is_null) {
        if let Some(hash_id_node) = item.get("hashIdNode").and_then(Value::as_str) {
            return Err(DropReason::MissingProof {
                hash_id_node: hash_id_node.to_string(),
            });
        }
    }

    Err(DropReason::UnrecognizedShape)
}
