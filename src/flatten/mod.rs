/// Proof flattening: turn branching proof trees into linear anchor records.
///
/// A proof's evidence lives at arbitrary depth — aggregation, calendar, and
/// ledger anchoring stages each add a level of branches. Display, storage,
/// and downstream verification all want flat rows instead, one per anchor.
/// The walk is a pre-order depth-first traversal: a branch's own anchors
/// always precede its descendants', and sibling branches keep input order.
pub mod ledger;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::proof::{Branch, ParsedProof};
use crate::validate;

/// One anchor lifted out of a branch tree, before the proof-level join.
///
/// `branch` is the *immediate* containing branch's label, not a path: a
/// record three levels deep still names only its own branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchAnchor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Canonical retrieval endpoint (first of the anchor's uris).
    pub uri: String,
    #[serde(rename = "type")]
    pub anchor_type: String,
    pub anchor_id: String,
    pub expected_value: String,
}

/// A fully denormalized anchor row: one per (proof, anchor) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatAnchorRecord {
    pub hash: String,
    pub hash_id_node: String,
    pub hash_id_core: String,
    pub hash_submitted_node_at: DateTime<Utc>,
    pub hash_submitted_core_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    pub uri: String,
    #[serde(rename = "type")]
    pub anchor_type: String,
    pub anchor_id: String,
    pub expected_value: String,
}

/// Flatten a branch tree into anchor records, depth-first pre-order.
///
/// A branch with no anchors and no children contributes nothing.
pub fn flatten_branches(branches: &[Branch]) -> Vec<BranchAnchor> {
    let mut records = Vec::new();
    collect_branches(branches, &mut records);
    records
}

fn collect_branches(branches: &[Branch], records: &mut Vec<BranchAnchor>) {
    for branch in branches {
        for anchor in branch.anchors.as_deref().unwrap_or_default() {
            records.push(BranchAnchor {
                branch: branch.label.clone(),
                uri: anchor.uris.first().cloned().unwrap_or_default(),
                anchor_type: anchor.anchor_type.clone(),
                anchor_id: anchor.anchor_id.clone(),
                expected_value: anchor.expected_value.clone(),
            });
        }
        if let Some(children) = &branch.branches {
            collect_branches(children, records);
        }
    }
}

/// Flatten parsed proofs into fully denormalized anchor rows.
///
/// All records for one proof precede all records for the next; within one
/// proof, order follows `flatten_branches`.
pub fn flatten_proofs(proofs: &[ParsedProof]) -> Vec<FlatAnchorRecord> {
    let mut records = Vec::new();
    for proof in proofs {
        for partial in flatten_branches(&proof.branches) {
            records.push(FlatAnchorRecord {
                hash: proof.hash.clone(),
                hash_id_node: proof.hash_id_node.clone(),
                hash_id_core: proof.hash_id_core.clone(),
                hash_submitted_node_at: proof.hash_submitted_node_at,
                hash_submitted_core_at: proof.hash_submitted_core_at,
                branch: partial.branch,
                uri: partial.uri,
                anchor_type: partial.anchor_type,
                anchor_id: partial.anchor_id,
                expected_value: partial.expected_value,
            });
        }
    }
    records
}

/// JSON-boundary variant of `flatten_proofs`.
///
/// Fails with `InvalidArgument` when the value is not an array; elements
/// must already be canonical parsed-proof objects.
pub fn flatten_proofs_json(proofs: &Value) -> Result<Vec<FlatAnchorRecord>> {
    let parsed: Vec<ParsedProof> = validate::require_array(proofs)?
        .iter()
        .map(|item| serde_json::from_value(item.clone()))
        .collect::<std::result::Result<_, _>>()?;
    Ok(flatten_proofs(&parsed))
}
