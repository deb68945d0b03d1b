/// Ledger branch extraction.
///
/// Ledger anchoring (e.g. to Bitcoin) always sits exactly one level below a
/// calendar/aggregation sub-branch, so this walk is shallow and label-keyed
/// rather than fully recursive: for each top-level branch, scan its direct
/// children's children for the `{ledger}_anchor_branch` label and pull out
/// the raw transaction payload plus the ledger anchor's commitment.
///
/// Extraction is best-effort: a proof that never reached the ledger
/// anchoring stage yields a record with only `hash_id_node` set. The one
/// hard failure is a matched ledger branch with no anchor array at all,
/// which the parser should never produce.
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ProofError, Result};
use crate::proof::ProofBranch;

/// Ledger data pulled from one top-level branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerExtractionRecord {
    pub hash_id_node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_ledger_tx: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_id: Option<String>,
}

/// Extract ledger anchoring data from top-level branch records, 1:1 and in
/// order. `ledger` is the anchor type identifier (e.g. "btc"); the matching
/// sub-branch label follows the `{ledger}_anchor_branch` convention.
///
/// The first matching sub-branch wins; any further matches are ignored.
pub fn flatten_ledger_branches(
    branches: &[ProofBranch],
    ledger: &str,
) -> Result<Vec<LedgerExtractionRecord>> {
    let branch_label = format!("{ledger}_anchor_branch");

    branches
        .iter()
        .map(|top| extract_one(top, ledger, &branch_label))
        .collect()
}

fn extract_one(
    top: &ProofBranch,
    ledger: &str,
    branch_label: &str,
) -> Result<LedgerExtractionRecord> {
    let mut record = LedgerExtractionRecord {
        hash_id_node: top.hash_id_node.clone(),
        ..Default::default()
    };

    let Some(children) = &top.branches else {
        return Ok(record);
    };

    for child in children {
        let Some(grandchildren) = &child.branches else {
            continue;
        };
        let Some(ledger_branch) = grandchildren
            .iter()
            .find(|b| b.label.as_deref() == Some(branch_label))
        else {
            continue;
        };

        record.raw_ledger_tx = ledger_branch.raw_tx.clone();

        let anchors = ledger_branch.anchors.as_ref().ok_or_else(|| {
            ProofError::MalformedLedgerBranch(format!(
                "{branch_label} for hashIdNode {} has no anchor array",
                top.hash_id_node
            ))
        })?;

        match anchors.iter().find(|a| a.anchor_type == ledger) {
            Some(anchor) => {
                record.expected_value = Some(anchor.expected_value.clone());
                record.anchor_id = Some(anchor.anchor_id.clone());
            }
            None => {
                warn!(
                    hash_id_node = %top.hash_id_node,
                    ledger,
                    "ledger branch found but no matching anchor attached yet"
                );
            }
        }
        break;
    }

    Ok(record)
}
