/// Canonical parsed-proof data model.
///
/// A proof is a finite, acyclic tree: proof-level metadata over a list of
/// branches, where each branch carries anchors (leaf evidence pointing at a
/// ledger commitment) and optionally further sub-branches. The parser owns
/// producing this shape; the flattening algorithms in `crate::flatten` only
/// ever read it.
pub mod normalize;
pub mod parse;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fully parsed proof, as produced by a `parse::ProofParser`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedProof {
    /// The hash the proof commits to.
    pub hash: String,
    /// Node-assigned id for the hash.
    pub hash_id_node: String,
    /// Core-assigned id for the hash.
    pub hash_id_core: String,
    /// When the node accepted the hash.
    pub hash_submitted_node_at: DateTime<Utc>,
    /// When the core accepted the hash.
    pub hash_submitted_core_at: DateTime<Utc>,
    /// Top-level evidence branches. Always present, possibly empty.
    #[serde(default)]
    pub branches: Vec<Branch>,
}

/// One node in the proof's evidence tree.
///
/// `anchors` is optional so that a structurally broken branch (no anchor
/// array at all) stays representable and distinguishable from a branch whose
/// anchors simply haven't been attached yet (`Some(vec![])`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Branch {
    /// Stage label, e.g. "cal_anchor_branch" or "btc_anchor_branch".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Leaf evidence collected at this branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchors: Option<Vec<Anchor>>,
    /// Further anchoring stages below this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<Branch>>,
    /// Raw ledger transaction payload, present on ledger anchor branches.
    #[serde(rename = "rawTx", default, skip_serializing_if = "Option::is_none")]
    pub raw_tx: Option<String>,
}

/// Leaf evidence pointing at one ledger commitment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anchor {
    /// Ledger or service identifier, e.g. "cal" or "btc".
    #[serde(rename = "type")]
    pub anchor_type: String,
    /// Ledger-specific locator, e.g. a block height.
    pub anchor_id: String,
    /// Value the ledger must be checked against, e.g. a root hash.
    pub expected_value: String,
    /// Retrieval endpoints; the first is canonical.
    pub uris: Vec<String>,
}

/// A top-level branch record as handed to the ledger extractor.
///
/// Unlike a generic `Branch`, these carry proof linkage (`hash_id_node`)
/// alongside the branch fields, because callers assemble them by joining
/// branch rows back to their proofs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofBranch {
    /// Node-assigned id of the proof this branch belongs to.
    pub hash_id_node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchors: Option<Vec<Anchor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<Branch>>,
}
