//! Error types for TIDEMARK

use crate::types::Timestamp;
use thiserror::Error;

/// Main error type for TIDEMARK
///
/// Every variant is fatal to the operation that raised it: the engine never
/// retries, the ledger view is assumed locally consistent, and the host
/// chain decides what a failed epoch transition means for block acceptance.
#[derive(Error, Debug)]
pub enum TidemarkError {
    // ============ Election Errors ============
    #[error("no candidates")]
    NoCandidates,

    #[error("too few candidates: need at least {required}, tallied {got}")]
    TooFewCandidates { required: usize, got: usize },

    // ============ Eviction Errors ============
    #[error("no validator could be kicked out")]
    NoValidatorsToEvict,

    // ============ Turn Lookup Errors ============
    #[error("invalid mint time: {0} does not land on a producer slot")]
    InvalidMintTime(Timestamp),

    #[error("failed to lookup validator")]
    ValidatorLookupFailed,

    // ============ State Errors ============
    #[error("storage error: {0}")]
    StorageError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),

    // ============ Configuration Errors ============
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    // ============ General Errors ============
    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for TidemarkError {
    fn from(err: std::io::Error) -> Self {
        TidemarkError::StorageError(err.to_string())
    }
}

impl From<bincode::Error> for TidemarkError {
    fn from(err: bincode::Error) -> Self {
        TidemarkError::SerializationError(err.to_string())
    }
}

impl From<serde_json::Error> for TidemarkError {
    fn from(err: serde_json::Error) -> Self {
        TidemarkError::SerializationError(err.to_string())
    }
}

impl From<hex::FromHexError> for TidemarkError {
    fn from(err: hex::FromHexError) -> Self {
        TidemarkError::InvalidAddress(err.to_string())
    }
}
