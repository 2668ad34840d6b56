//! Daily ranking store.
//!
//! Persists, per calendar date, the answer word and its ranking as an
//! ordered set, plus the process-wide active date scalar. See [`StoreKey`]
//! for the key layout.
//!
//! # Consistency
//! Replacing a ranking is atomic for readers: a concurrent `top_k`,
//! `score` or `rank` sees either the complete old ranking or the complete
//! new one. [`RankingStore::lookup`] extends that to the answer and a
//! word's rank and score read together. The store never expires days on
//! its own; retention is driven by the day session manager through
//! [`RankingStore::delete_day`].

mod error;
mod keys;
mod memory;
mod ordered;
mod snapshot;

pub use error::{StoreError, StoreResult};
pub use keys::{KeyPrefix, StoreKey};
pub use memory::MemoryRankingStore;
pub use ordered::RankingSet;

use crate::ranking::DailyRanking;
use crate::types::{GameDate, RankedEntry};

/// A day's answer and one word's place in its ranking, taken from a
/// single read of the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayLookup {
    pub answer: Option<String>,
    /// `(rank, score)` when the word is in the stored ranking.
    pub ranked: Option<(usize, f32)>,
}

/// Ordered key-value store backing the daily game.
///
/// Absent keys read as empty collections for range queries and as `None`
/// for point queries.
pub trait RankingStore: Send + Sync {
    /// Replaces the whole ranking for `date`; input order does not matter.
    fn save_daily_topk(&self, date: GameDate, entries: Vec<RankedEntry>) -> StoreResult<()>;

    /// The `k` best entries in canonical order.
    fn top_k(&self, date: GameDate, k: usize) -> StoreResult<Vec<RankedEntry>>;

    fn score(&self, date: GameDate, word: &str) -> StoreResult<Option<f32>>;

    /// 0-based rank of `word`, rank 0 being the most similar.
    fn rank(&self, date: GameDate, word: &str) -> StoreResult<Option<usize>>;

    /// Answer, rank and score of `word` as one consistent view; a
    /// concurrent republish of `date` is seen entirely or not at all.
    fn lookup(&self, date: GameDate, word: &str) -> StoreResult<DayLookup>;

    fn set_answer(&self, date: GameDate, answer: &str) -> StoreResult<()>;

    fn answer(&self, date: GameDate) -> StoreResult<Option<String>>;

    /// `None` removes any stored description.
    fn set_answer_description(&self, date: GameDate, description: Option<&str>)
    -> StoreResult<()>;

    fn answer_description(&self, date: GameDate) -> StoreResult<Option<String>>;

    /// Removes every key of `date` and returns how many existed.
    ///
    /// Deleting a day that was never stored returns `Ok(0)`.
    fn delete_day(&self, date: GameDate) -> StoreResult<usize>;

    fn active_date(&self) -> StoreResult<Option<GameDate>>;

    fn set_active_date(&self, date: GameDate) -> StoreResult<()>;

    /// Whether `date` has a persisted ranking key.
    fn has_ranking(&self, date: GameDate) -> StoreResult<bool>;

    /// Every date that still has at least one key, ascending.
    fn stored_dates(&self) -> StoreResult<Vec<GameDate>>;

    /// Writes a day's answer, description and ranking, optionally moving
    /// the active date to it.
    ///
    /// The default runs the individual operations in order; stores that
    /// can batch should override it so the publication lands at once.
    fn publish_day(
        &self,
        ranking: &DailyRanking,
        description: Option<&str>,
        activate: bool,
    ) -> StoreResult<()> {
        self.save_daily_topk(ranking.date, ranking.entries.clone())?;
        self.set_answer(ranking.date, &ranking.answer)?;
        self.set_answer_description(ranking.date, description)?;
        if activate {
            self.set_active_date(ranking.date)?;
        }
        Ok(())
    }

    /// Whether the store is reachable.
    fn is_ready(&self) -> bool {
        true
    }
}
