//! Error types

use thiserror::Error;

/// Common error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid cell address: {0:?}")]
    InvalidCellRef(String),

    #[error("Unsupported stage: {0} (expected 1, 2 or 3)")]
    InvalidStage(u8),
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;
