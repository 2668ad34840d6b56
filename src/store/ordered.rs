use std::collections::HashMap;

use super::{StoreError, StoreResult};
use crate::types::{RankedEntry, sort_canonical};

/// Immutable score-ordered set of `(word, score)` members.
///
/// Built once and swapped in whole; rank and score lookups are O(1).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingSet {
    entries: Vec<RankedEntry>,
    positions: HashMap<String, usize>,
}

impl RankingSet {
    /// Builds the set from entries in any order.
    ///
    /// A word given more than once keeps its last score. NaN scores are
    /// rejected because they have no place in a score ordering.
    pub fn from_entries(entries: impl IntoIterator<Item = RankedEntry>) -> StoreResult<Self> {
        let mut by_word: HashMap<String, f32> = HashMap::new();
        for entry in entries {
            if entry.score.is_nan() {
                return Err(StoreError::InvalidScore {
                    word: entry.word,
                    score: entry.score,
                });
            }
            by_word.insert(entry.word, entry.score);
        }

        let mut entries: Vec<RankedEntry> = by_word
            .into_iter()
            .map(|(word, score)| RankedEntry { word, score })
            .collect();
        sort_canonical(&mut entries);

        let positions = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.word.clone(), i))
            .collect();

        Ok(Self { entries, positions })
    }

    /// The `k` best entries; fewer if the set is smaller.
    pub fn top(&self, k: usize) -> &[RankedEntry] {
        &self.entries[..k.min(self.entries.len())]
    }

    pub fn score(&self, word: &str) -> Option<f32> {
        self.positions.get(word).map(|&i| self.entries[i].score)
    }

    /// 0-based rank by descending score.
    pub fn rank(&self, word: &str) -> Option<usize> {
        self.positions.get(word).copied()
    }

    /// Rank and score of `word`, read together.
    pub fn lookup(&self, word: &str) -> Option<(usize, f32)> {
        self.positions
            .get(word)
            .map(|&i| (i, self.entries[i].score))
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
