use super::{VectorError, cosine_similarity};

/// Black-box access to word embeddings.
///
/// Implementations may sit in front of a remote vector index; any
/// transport failure must surface as [`VectorError::Unavailable`] so the
/// caller can treat it as retryable.
pub trait VectorQuery: Send + Sync {
    /// Embedding for `word`, or `Ok(None)` when the word is unknown.
    fn embed(&self, word: &str) -> Result<Option<Vec<f32>>, VectorError>;

    /// Similarity of two embeddings; higher means more similar.
    ///
    /// Defaults to cosine similarity.
    fn similarity(&self, a: &[f32], b: &[f32]) -> Result<f32, VectorError> {
        cosine_similarity(a, b)
    }

    /// Whether the collaborator is currently reachable.
    fn is_ready(&self) -> bool {
        true
    }
}
