//! Error types for merkle_primer
//!
//! Building, proving and verifying never fail. These errors come from the
//! edges: files, config, proof decoding and digest parsing.

use thiserror::Error;

/// Result type alias for merkle_primer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in merkle_primer operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    #[error("Invalid proof step: {0}")]
    InvalidProofStep(String),

    #[error("Unknown hasher: {0}")]
    UnknownHasher(String),

    #[error("Config error: {0}")]
    Config(String),
}
