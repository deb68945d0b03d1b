/// Proof handles: lightweight references to submitted hashes.
///
/// Submitting a batch of hashes to several targets yields one response per
/// target, each covering the same hashes in the same order. The handles built
/// here are what callers keep to retrieve proofs later. Handles for the same
/// batch index share a `group_id` across targets, so the multi-target copies
/// of one hash can be correlated even though every target assigns its own
/// `hash_id_node`.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reference to one submitted hash on one submission target.
///
/// `uri` and `hash_id_node` are always present once constructed; a handle
/// missing either is invalid (see `validate::is_valid_proof_handle`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofHandle {
    /// Submission target the hash was sent to.
    pub uri: String,
    /// Target-assigned id for this hash.
    pub hash_id_node: String,
    /// The submitted hash itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Correlates handles for the same batch index across targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
}

/// One target's response to a hash submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// The target's base URI.
    pub uri: String,
    /// Accepted hashes, in submission order.
    pub hashes: Vec<SubmittedHash>,
}

/// A single accepted hash within a submission response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedHash {
    pub hash_id_node: String,
    pub hash: String,
}

/// Map submission responses to proof handles.
///
/// Group ids are assigned positionally: one fresh id per hash index, taken
/// from the first response's hash count, then looked up by index for every
/// response. A response with more hashes than the first gets `None` for the
/// surplus positions rather than a fabricated correlation.
pub fn map_submit_hashes_resp_to_proof_handles(responses: &[SubmitResponse]) -> Vec<ProofHandle> {
    map_submit_hashes_resp_to_proof_handles_with(responses, Uuid::new_v4)
}

/// Same as `map_submit_hashes_resp_to_proof_handles`, with an injected id
/// generator. Useful for deterministic tests.
pub fn map_submit_hashes_resp_to_proof_handles_with(
    responses: &[SubmitResponse],
    mut next_id: impl FnMut() -> Uuid,
) -> Vec<ProofHandle> {
    let group_ids: Vec<Uuid> = responses
        .first()
        .map(|first| first.hashes.iter().map(|_| next_id()).collect())
        .unwrap_or_default();

    let mut handles = Vec::new();
    for response in responses {
        for (index, submitted) in response.hashes.iter().enumerate() {
            handles.push(ProofHandle {
                uri: response.uri.clone(),
                hash_id_node: submitted.hash_id_node.clone(),
                hash: Some(submitted.hash.clone()),
                group_id: group_ids.get(index).copied(),
            });
        }
    }
    handles
}
