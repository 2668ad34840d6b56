//! Key layout of the ordered ranking store

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::GameDate;

/// Namespace prepended to every store key, `ssamantle` by default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPrefix(String);

impl KeyPrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for KeyPrefix {
    fn default() -> Self {
        Self::new("ssamantle")
    }
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strongly-typed store keys to avoid string literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// `P:active_date`, scalar `YYYY-MM-DD`
    ActiveDate,
    /// `P:{date}:answer`, scalar answer word
    Answer(GameDate),
    /// `P:{date}:answer_desc`, scalar free text
    AnswerDescription(GameDate),
    /// `P:{date}:topk`, ordered set of (word, score)
    TopK(GameDate),
}

impl StoreKey {
    const ACTIVE_DATE: &'static str = "active_date";
    const ANSWER: &'static str = "answer";
    const ANSWER_DESC: &'static str = "answer_desc";
    const TOPK: &'static str = "topk";

    /// Every key that belongs to `date`.
    pub fn day_keys(date: GameDate) -> [StoreKey; 3] {
        [
            Self::Answer(date),
            Self::AnswerDescription(date),
            Self::TopK(date),
        ]
    }

    /// Full key string under `prefix`.
    pub fn render(&self, prefix: &KeyPrefix) -> String {
        match self {
            Self::ActiveDate => format!("{prefix}:{}", Self::ACTIVE_DATE),
            Self::Answer(date) => format!("{prefix}:{date}:{}", Self::ANSWER),
            Self::AnswerDescription(date) => format!("{prefix}:{date}:{}", Self::ANSWER_DESC),
            Self::TopK(date) => format!("{prefix}:{date}:{}", Self::TOPK),
        }
    }

    /// Inverse of [`render`](Self::render); `None` for foreign keys.
    pub fn parse(prefix: &KeyPrefix, raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix(prefix.as_str())?.strip_prefix(':')?;
        if rest == Self::ACTIVE_DATE {
            return Some(Self::ActiveDate);
        }

        let (date, suffix) = rest.split_once(':')?;
        let date = GameDate::parse(date).ok()?;
        match suffix {
            Self::ANSWER => Some(Self::Answer(date)),
            Self::ANSWER_DESC => Some(Self::AnswerDescription(date)),
            Self::TOPK => Some(Self::TopK(date)),
            _ => None,
        }
    }

    /// The day this key belongs to, if any.
    pub fn date(&self) -> Option<GameDate> {
        match self {
            Self::ActiveDate => None,
            Self::Answer(d) | Self::AnswerDescription(d) | Self::TopK(d) => Some(*d),
        }
    }
}
