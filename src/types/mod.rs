//! Core value types shared by the ranking engine.
//!
//! Newtypes here keep dates, words and ranked entries from being passed
//! around as bare strings and floats.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vector::{VectorDimension, VectorError};

/// Error returned when a calendar date cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid date '{input}': expected YYYY-MM-DD")]
pub struct InvalidDateError {
    pub input: String,
}

/// A calendar day of play, rendered as `YYYY-MM-DD`.
///
/// This is the natural key of a daily ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameDate(NaiveDate);

impl GameDate {
    /// Wire format used in store keys and snapshots.
    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns `None` for impossible dates such as February 30th.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn parse(input: &str) -> Result<Self, InvalidDateError> {
        NaiveDate::parse_from_str(input.trim(), Self::FORMAT)
            .map(Self)
            .map_err(|_| InvalidDateError {
                input: input.to_string(),
            })
    }

    /// The date `days` calendar days earlier, saturating at the minimum date.
    #[must_use]
    pub fn days_before(&self, days: u32) -> Self {
        Self(
            self.0
                .checked_sub_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MIN),
        )
    }

    /// The next calendar day, saturating at the maximum date.
    #[must_use]
    pub fn next_day(&self) -> Self {
        Self(self.0.succ_opt().unwrap_or(NaiveDate::MAX))
    }

    #[must_use]
    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for GameDate {
    type Err = InvalidDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for GameDate {
    type Error = InvalidDateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<GameDate> for String {
    fn from(date: GameDate) -> Self {
        date.to_string()
    }
}

/// A vocabulary entry: case-sensitive text plus its embedding.
///
/// Words are immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    text: String,
    embedding: Vec<f32>,
}

impl Word {
    pub fn new(text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            text: text.into(),
            embedding,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn embedding(&self) -> &[f32] {
        &self.embedding
    }
}

/// A set of unique words sharing one embedding dimension.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<Word>,
    index: HashMap<String, usize>,
    dimension: Option<VectorDimension>,
}

impl Vocabulary {
    /// Builds a vocabulary, keeping the first occurrence of a repeated word.
    ///
    /// Fails if the embeddings disagree on dimension, any embedding is
    /// empty, or any component is NaN or infinite.
    pub fn new(words: impl IntoIterator<Item = Word>) -> Result<Self, VectorError> {
        let mut vocabulary = Self::default();
        for word in words {
            if vocabulary.index.contains_key(word.text()) {
                tracing::debug!("Skipping duplicate vocabulary word '{}'", word.text());
                continue;
            }
            let dimension = match vocabulary.dimension {
                Some(dimension) => dimension,
                None => VectorDimension::new(word.embedding().len())?,
            };
            dimension.validate_vector(word.embedding())?;
            vocabulary.dimension = Some(dimension);
            vocabulary
                .index
                .insert(word.text().to_string(), vocabulary.words.len());
            vocabulary.words.push(word);
        }
        Ok(vocabulary)
    }

    pub fn get(&self, text: &str) -> Option<&Word> {
        self.index.get(text).map(|&i| &self.words[i])
    }

    pub fn contains(&self, text: &str) -> bool {
        self.index.contains_key(text)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }

    pub fn as_slice(&self) -> &[Word] {
        &self.words
    }

    /// `None` for an empty vocabulary.
    pub fn dimension(&self) -> Option<VectorDimension> {
        self.dimension
    }
}

/// One `(word, score)` member of a daily ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub word: String,
    pub score: f32,
}

impl RankedEntry {
    pub fn new(word: impl Into<String>, score: f32) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }

    /// Canonical ranking order: score descending, then word ascending.
    ///
    /// Scores that compare equal (including `0.0` and `-0.0`) fall through
    /// to the word comparison, so the result never depends on input order.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or_else(|| other.score.total_cmp(&self.score))
            .then_with(|| self.word.cmp(&other.word))
    }
}

/// Sorts entries into canonical ranking order in place.
pub fn sort_canonical(entries: &mut [RankedEntry]) {
    entries.sort_by(RankedEntry::canonical_cmp);
}
