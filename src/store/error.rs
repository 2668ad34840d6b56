use std::path::PathBuf;

use thiserror::Error;

use crate::types::InvalidDateError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid score {score} for '{word}': scores must be real numbers")]
    InvalidScore { word: String, score: f32 },

    #[error("Snapshot error at '{}': {reason}", path.display())]
    Snapshot { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupted stored date: {0}")]
    InvalidDate(#[from] InvalidDateError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
