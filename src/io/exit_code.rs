//! Exit codes for CLI operations following Unix conventions.
//!
//! # Exit Code Semantics
//!
//! - `0`: Success - operation completed
//! - `1`: General error - unspecified failure
//! - `3`: Not found - the date, word or answer does not exist
//! - `5`: I/O error - snapshot or input files could not be read or written
//! - `6`: Configuration error - settings or input data are unusable
//! - `9`: Retryable - the vector collaborator was unavailable; nothing changed

use crate::answers::AnswerError;
use crate::error::{RankingError, SessionError};
use crate::store::StoreError;

/// Standard exit codes for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Operation succeeded (code 0)
    Success = 0,

    /// Unspecified error occurred (code 1)
    GeneralError = 1,

    /// Lookup came back empty but the command ran (code 3)
    NotFound = 3,

    /// File I/O error (code 5)
    IoError = 5,

    /// Configuration error (code 6)
    ConfigError = 6,

    /// Transient collaborator failure, safe to retry (code 9)
    Retryable = 9,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

impl ExitCode {
    /// `Success` if data is present, `NotFound` otherwise.
    pub fn from_lookup<T>(result: &Option<T>) -> Self {
        match result {
            Some(_) => ExitCode::Success,
            None => ExitCode::NotFound,
        }
    }

    /// Convert a `SessionError` to the appropriate exit code.
    pub fn from_error(error: &SessionError) -> Self {
        match error {
            SessionError::Ranking(RankingError::CollaboratorUnavailable { .. }) => {
                ExitCode::Retryable
            }
            SessionError::Ranking(RankingError::UnknownAnswerWord { .. }) => ExitCode::NotFound,
            SessionError::Ranking(
                RankingError::EmptyVocabulary { .. } | RankingError::InvalidVectors(_),
            ) => ExitCode::ConfigError,

            SessionError::Store(StoreError::Io(_) | StoreError::Snapshot { .. }) => {
                ExitCode::IoError
            }

            SessionError::Answer(AnswerError::NotFound { .. } | AnswerError::Io { .. }) => {
                ExitCode::IoError
            }
            SessionError::Answer(
                AnswerError::NoCandidates { .. } | AnswerError::EmptyCandidates,
            ) => ExitCode::ConfigError,

            _ => ExitCode::GeneralError,
        }
    }

    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, ExitCode::Retryable)
    }
}
