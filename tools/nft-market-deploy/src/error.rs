use concordium_rust_sdk::types::smart_contracts::ModuleReference;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("node request failed: {0}")]
    Node(String),

    #[error("could not read the contract module: {0}")]
    InvalidModule(String),

    #[error("{stage} was rejected: {reason}")]
    Rejected { stage: &'static str, reason: String },

    #[error("{0} finalized without the expected outcome")]
    UnexpectedOutcome(&'static str),

    #[error("instance runs module {found}, expected {expected}")]
    ModuleMismatch {
        expected: ModuleReference,
        found: ModuleReference,
    },

    #[error("instance was created by {found}, expected {expected}")]
    NameMismatch { expected: String, found: String },
}

pub(crate) fn node_error(err: impl std::fmt::Display) -> ChainError {
    ChainError::Node(err.to_string())
}
