use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;

use super::guess::{GuessOutcome, GuessResult, ScoreSource};
use super::retention::{RetentionPolicy, RetentionReport};
use crate::answers::{AnswerPicker, AnswerSource};
use crate::error::{RankingError, SessionResult};
use crate::ranking::RankingBuilder;
use crate::store::RankingStore;
use crate::types::{GameDate, Vocabulary};

/// Where the active date pointer currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "date", rename_all = "snake_case")]
pub enum SessionState {
    NoActiveDay,
    DayActive(GameDate),
}

/// Summary of a successful day advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvanceReport {
    pub date: GameDate,
    pub answer: String,
    pub description: Option<String>,
    pub entries: usize,
    /// The date already had a ranking that was overwritten.
    pub republished: bool,
    pub retention: RetentionReport,
}

/// Readiness signals for an outer health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub vector_store_ready: bool,
    pub ranking_cache_ready: bool,
    pub active_date: Option<GameDate>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.vector_store_ready && self.ranking_cache_ready
    }
}

/// Owns the active date and drives day transitions.
///
/// Advances are serialized in-process; reads of the pointer never block
/// on an advance that is still building its ranking.
pub struct DaySessionManager {
    store: Arc<dyn RankingStore>,
    builder: RankingBuilder,
    retention: RetentionPolicy,
    active: RwLock<Option<GameDate>>,
    advance_lock: Mutex<()>,
}

impl std::fmt::Debug for DaySessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DaySessionManager")
            .field("builder", &self.builder)
            .field("retention", &self.retention)
            .field("active", &*self.active.read())
            .finish_non_exhaustive()
    }
}

impl DaySessionManager {
    /// Starts in [`SessionState::NoActiveDay`]; call [`restore`](Self::restore)
    /// to resume from the store.
    pub fn new(
        store: Arc<dyn RankingStore>,
        builder: RankingBuilder,
        retention: RetentionPolicy,
    ) -> Self {
        Self {
            store,
            builder,
            retention,
            active: RwLock::new(None),
            advance_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<dyn RankingStore> {
        &self.store
    }

    pub fn builder(&self) -> &RankingBuilder {
        &self.builder
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    pub fn active_date(&self) -> Option<GameDate> {
        *self.active.read()
    }

    pub fn state(&self) -> SessionState {
        match self.active_date() {
            Some(date) => SessionState::DayActive(date),
            None => SessionState::NoActiveDay,
        }
    }

    /// Loads the persisted active date into the in-process pointer.
    pub fn restore(&self) -> SessionResult<Option<GameDate>> {
        let stored = self.store.active_date()?;
        *self.active.write() = stored;
        match stored {
            Some(date) => tracing::info!("Restored active day {date}"),
            None => tracing::debug!("No active day in store"),
        }
        Ok(stored)
    }

    /// Publishes `answer` as the game for `date` and makes it active.
    ///
    /// Re-advancing to a date that already has a ranking overwrites it.
    /// On any build or store failure the pointer and every stored key are
    /// left as they were. Retention runs afterwards and never fails the
    /// advance.
    pub fn advance_day(
        &self,
        date: GameDate,
        answer: &str,
        vocabulary: &Vocabulary,
    ) -> SessionResult<AdvanceReport> {
        self.advance_with_description(date, answer, None, vocabulary)
    }

    /// Like [`advance_day`](Self::advance_day), also storing a hint for
    /// the answer.
    pub fn advance_with_description(
        &self,
        date: GameDate,
        answer: &str,
        description: Option<&str>,
        vocabulary: &Vocabulary,
    ) -> SessionResult<AdvanceReport> {
        let _guard = self.advance_lock.lock();
        tracing::info!("Advancing to {date} with answer '{answer}'");

        let ranking = self.builder.build(date, answer, vocabulary)?;
        let republished = self.store.has_ranking(date)?;
        self.store.publish_day(&ranking, description, true)?;
        *self.active.write() = Some(date);

        if republished {
            tracing::info!("Republished {date} ({} entries)", ranking.len());
        } else {
            tracing::info!("Published {date} ({} entries)", ranking.len());
        }

        let retention = self.retain_window(date);

        Ok(AdvanceReport {
            date,
            entries: ranking.len(),
            answer: ranking.answer,
            description: description.map(str::to_string),
            republished,
            retention,
        })
    }

    /// Picks the answer for `date` from `source` and advances to it.
    pub fn refresh(
        &self,
        date: GameDate,
        source: &dyn AnswerSource,
        picker: &dyn AnswerPicker,
        vocabulary: &Vocabulary,
    ) -> SessionResult<AdvanceReport> {
        let candidates = source.list_answers()?;
        let entry = picker.pick(date, &candidates)?;
        tracing::debug!(
            "Picked '{}' for {date} out of {} candidate(s)",
            entry.word,
            candidates.len()
        );
        self.advance_with_description(
            date,
            entry.word.trim(),
            entry.description.as_deref(),
            vocabulary,
        )
    }

    /// Deletes days that fell out of the retention window around `current`.
    pub fn retain_window(&self, current: GameDate) -> RetentionReport {
        self.retention.apply(self.store.as_ref(), current)
    }

    /// Scores `word` against the active day's answer.
    ///
    /// Words in the stored ranking come back with their rank. Anything else
    /// is scored through the vector collaborator and carries no rank.
    pub fn guess(&self, word: &str) -> SessionResult<GuessOutcome> {
        let word = word.trim();
        if word.is_empty() {
            return Ok(GuessOutcome::EmptyWord);
        }
        let Some(date) = self.active_date() else {
            return Ok(GuessOutcome::NoActiveDay);
        };
        let lookup = self.store.lookup(date, word)?;
        let Some(answer) = lookup.answer else {
            return Ok(GuessOutcome::NoActiveDay);
        };
        let is_answer = word == answer;

        if let Some((rank, score)) = lookup.ranked {
            return Ok(GuessOutcome::Found(GuessResult {
                date,
                word: word.to_string(),
                score,
                rank: Some(rank),
                source: ScoreSource::Cached,
                is_answer,
            }));
        }

        let vectors = self.builder.vectors();
        let Some(guess_vec) = vectors.embed(word)? else {
            return Ok(GuessOutcome::UnknownWord {
                date,
                word: word.to_string(),
            });
        };
        let answer_vec = vectors
            .embed(&answer)?
            .ok_or(RankingError::UnknownAnswerWord { word: answer })?;
        let score = vectors.similarity(&answer_vec, &guess_vec)?;

        Ok(GuessOutcome::Found(GuessResult {
            date,
            word: word.to_string(),
            score,
            rank: None,
            source: ScoreSource::Computed,
            is_answer,
        }))
    }

    pub fn health(&self) -> HealthReport {
        let active_date = self.active_date();
        let ranking_cache_ready = self.store.is_ready()
            && active_date
                .map(|date| self.store.has_ranking(date).unwrap_or(false))
                .unwrap_or(false);

        HealthReport {
            vector_store_ready: self.builder.vectors().is_ready(),
            ranking_cache_ready,
            active_date,
        }
    }
}
