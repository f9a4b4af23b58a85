//! Emission error types.

use thiserror::Error;

/// Errors that can occur while emitting generated source text.
#[derive(Debug, Error)]
pub enum EmitError {
    /// Writing into the output buffer failed.
    #[error("formatting generated source failed: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Emission result type alias.
pub type EmitResult<T> = Result<T, EmitError>;
