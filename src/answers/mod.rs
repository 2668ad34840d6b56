//! Daily answer selection.
//!
//! An [`AnswerSource`] lists the candidate answers and an [`AnswerPicker`]
//! turns a date and those candidates into the day's answer.

mod picker;
mod source;

pub use picker::HashAnswerPicker;
pub use source::FileAnswerSource;

use crate::types::GameDate;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or choosing an answer
#[derive(Error, Debug)]
pub enum AnswerError {
    #[error("Answers file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Answers file {} lists no candidates", path.display())]
    NoCandidates { path: PathBuf },

    #[error("No non-empty candidates to pick from")]
    EmptyCandidates,

    #[error("Failed to read answers file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type AnswerResult<T> = Result<T, AnswerError>;

/// One answer candidate with its optional hint text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerEntry {
    pub word: String,
    pub description: Option<String>,
}

impl AnswerEntry {
    pub fn new(word: impl Into<String>, description: Option<String>) -> Self {
        Self {
            word: word.into(),
            description,
        }
    }
}

/// Where answer candidates come from.
pub trait AnswerSource: Send + Sync {
    fn list_answers(&self) -> AnswerResult<Vec<AnswerEntry>>;
}

/// Policy that chooses one candidate for a date.
pub trait AnswerPicker: Send + Sync {
    fn pick<'a>(&self, date: GameDate, candidates: &'a [AnswerEntry])
    -> AnswerResult<&'a AnswerEntry>;
}
