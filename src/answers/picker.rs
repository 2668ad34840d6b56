use sha2::{Digest, Sha256};

use super::{AnswerEntry, AnswerError, AnswerPicker, AnswerResult};
use crate::types::GameDate;

/// Deterministic picker keyed on `sha256("{date}|{word}")`.
///
/// The candidate with the smallest `(digest, word)` wins, so the result
/// depends only on the date and the set of candidates, never on their order.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashAnswerPicker;

impl HashAnswerPicker {
    pub fn new() -> Self {
        Self
    }

    fn digest(date: GameDate, word: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(format!("{date}|{word}").as_bytes());
        hasher.finalize().into()
    }
}

impl AnswerPicker for HashAnswerPicker {
    fn pick<'a>(
        &self,
        date: GameDate,
        candidates: &'a [AnswerEntry],
    ) -> AnswerResult<&'a AnswerEntry> {
        candidates
            .iter()
            .filter(|entry| !entry.word.trim().is_empty())
            .map(|entry| ((Self::digest(date, entry.word.trim()), entry.word.trim()), entry))
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, entry)| entry)
            .ok_or(AnswerError::EmptyCandidates)
    }
}
