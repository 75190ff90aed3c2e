//! Structured error types for the cutoff workspace.

use thiserror::Error;

/// Unified error type for all cut-off computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CutoffError {
    /// Invalid input (mismatched vectors, non-binary labels, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A result was requested before the computation producing it has run
    #[error("not ready: {0}")]
    NotReady(String),
}

impl CutoffError {
    /// Whether this is an [`CutoffError::InvalidInput`] error.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Whether this is a [`CutoffError::NotReady`] error.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady(_))
    }
}

/// Convenience alias used throughout the cutoff workspace.
pub type Result<T> = std::result::Result<T, CutoffError>;
