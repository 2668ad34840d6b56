//! Error types for the daily ranking engine
//!
//! Validation and collaborator failures are errors. Absent words, answers
//! or days are not: point lookups return `Option` and deletions return a
//! count, so callers can tell "not found" apart from a real zero.

use crate::answers::AnswerError;
use crate::store::StoreError;
use crate::vector::VectorError;
use thiserror::Error;

/// Errors raised while building a daily ranking
#[derive(Error, Debug)]
pub enum RankingError {
    #[error("Answer word '{word}' is not in the vocabulary")]
    UnknownAnswerWord { word: String },

    #[error("Vocabulary has {size} word(s); at least 2 are needed to rank against an answer")]
    EmptyVocabulary { size: usize },

    #[error("Vector query collaborator unavailable: {reason}")]
    CollaboratorUnavailable { reason: String },

    #[error("Vector query collaborator returned unusable data: {0}")]
    InvalidVectors(#[source] VectorError),
}

impl From<VectorError> for RankingError {
    fn from(err: VectorError) -> Self {
        if err.is_transient() {
            Self::CollaboratorUnavailable {
                reason: err.to_string(),
            }
        } else {
            Self::InvalidVectors(err)
        }
    }
}

/// Errors raised by day session transitions and lookups
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Ranking(#[from] RankingError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Answer(#[from] AnswerError),
}

impl From<VectorError> for SessionError {
    fn from(err: VectorError) -> Self {
        Self::Ranking(err.into())
    }
}

impl SessionError {
    /// Get a stable status code for this error type.
    ///
    /// Returns a string identifier that can be used in JSON responses
    /// for programmatic error handling.
    pub fn status_code(&self) -> String {
        match self {
            Self::Ranking(RankingError::UnknownAnswerWord { .. }) => "UNKNOWN_ANSWER_WORD",
            Self::Ranking(RankingError::EmptyVocabulary { .. }) => "EMPTY_VOCABULARY",
            Self::Ranking(RankingError::CollaboratorUnavailable { .. }) => {
                "COLLABORATOR_UNAVAILABLE"
            }
            Self::Ranking(RankingError::InvalidVectors(_)) => "INVALID_VECTORS",
            Self::Store(StoreError::InvalidScore { .. }) => "INVALID_SCORE",
            Self::Store(_) => "STORE_ERROR",
            Self::Answer(_) => "ANSWER_SOURCE_ERROR",
        }
        .to_string()
    }

    /// Whether retrying the same operation later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Ranking(RankingError::CollaboratorUnavailable { .. })
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::Ranking(RankingError::UnknownAnswerWord { .. }) => vec![
                "Pick an answer that exists in the loaded vector vocabulary",
                "Check the answers file against the vector file for typos or casing",
            ],
            Self::Ranking(RankingError::EmptyVocabulary { .. }) => vec![
                "Check that 'vectors_path' points to a non-empty .vec file",
                "Verify 'vector_dimension' matches the file's vectors",
            ],
            Self::Ranking(RankingError::CollaboratorUnavailable { .. }) => vec![
                "The previous day is still active; nothing was published",
                "Retry once the vector store is reachable again",
            ],
            Self::Ranking(RankingError::InvalidVectors(_)) => vec![
                "Check 'vector_dimension' against the vectors file",
                "Reload the vectors file; retrying with the same data fails again",
            ],
            Self::Store(StoreError::Snapshot { .. }) | Self::Store(StoreError::Io(_)) => vec![
                "Check disk space and permissions for the snapshot directory",
                "The in-memory state was left unchanged",
            ],
            Self::Answer(_) => vec![
                "Check that 'answers_path' exists and lists at least one word",
            ],
            _ => vec![],
        }
    }
}

/// Result type alias for ranking construction
pub type RankingResult<T> = Result<T, RankingError>;

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
