//! Type-safe wrappers and error types for embedding vectors.

use thiserror::Error;

/// Type-safe wrapper for vector dimensions.
///
/// Every embedding in a vocabulary must have the same dimension; this
/// newtype carries that dimension around and validates vectors against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorDimension(usize);

impl VectorDimension {
    /// Creates a new `VectorDimension` with validation.
    ///
    /// Returns an error if the dimension is zero.
    pub fn new(dim: usize) -> Result<Self, VectorError> {
        if dim == 0 {
            return Err(VectorError::InvalidDimension {
                dimension: 0,
                reason: "Vector dimension cannot be zero",
            });
        }
        Ok(Self(dim))
    }

    /// Returns the underlying dimension value.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }

    /// Validates that a vector has the expected dimension and only
    /// finite components.
    pub fn validate_vector(&self, vector: &[f32]) -> Result<(), VectorError> {
        if vector.len() != self.0 {
            return Err(VectorError::DimensionMismatch {
                expected: self.0,
                actual: vector.len(),
            });
        }
        if let Some(index) = vector.iter().position(|v| !v.is_finite()) {
            return Err(VectorError::NonFinite { index });
        }
        Ok(())
    }
}

impl std::fmt::Display for VectorDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised by the vector query collaborator.
#[derive(Error, Debug)]
pub enum VectorError {
    #[error(
        "Vector store unavailable: {reason}\n\
         Suggestion: Check that the vector store is reachable and retry"
    )]
    Unavailable { reason: String },

    #[error(
        "Dimension mismatch: expected {expected}, got {actual}\n\
         Suggestion: Ensure all embeddings come from the same model"
    )]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding component {index} is NaN or infinite")]
    NonFinite { index: usize },

    #[error("Invalid vector dimension {dimension}: {reason}")]
    InvalidDimension {
        dimension: usize,
        reason: &'static str,
    },

    #[error("Malformed vector file at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error(
        "Vector file error: {0}\n\
         Suggestion: Check that the vector file exists and is readable"
    )]
    Io(#[from] std::io::Error),
}

impl VectorError {
    /// True for failures that may succeed when retried later.
    ///
    /// Only an unreachable collaborator qualifies; bad vector data fails
    /// the same way on every retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
