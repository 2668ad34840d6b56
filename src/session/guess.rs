use serde::Serialize;

use crate::types::GameDate;

/// Where a guess score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// Read from the day's stored ranking; a rank is available.
    Cached,
    /// Computed on demand because the word fell outside the stored ranking.
    Computed,
}

/// A scored guess against the active day's answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuessResult {
    pub date: GameDate,
    pub word: String,
    pub score: f32,
    pub rank: Option<usize>,
    pub source: ScoreSource,
    pub is_answer: bool,
}

/// Result of looking up one guess.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GuessOutcome {
    /// The guess was blank after trimming.
    EmptyWord,
    /// No day has been published yet.
    NoActiveDay,
    /// The collaborator has no embedding for the guess.
    UnknownWord { date: GameDate, word: String },
    Found(GuessResult),
}

impl GuessOutcome {
    pub fn result(&self) -> Option<&GuessResult> {
        match self {
            Self::Found(result) => Some(result),
            _ => None,
        }
    }
}
