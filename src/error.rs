use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProofError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown proof format: {0}")]
    UnknownProofFormat(String),

    #[error("Malformed ledger branch: {0}")]
    MalformedLedgerBranch(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProofError>;
