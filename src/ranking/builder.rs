use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{RankingError, RankingResult};
use crate::types::{GameDate, RankedEntry, Vocabulary, sort_canonical};
use crate::vector::VectorQuery;

/// Knobs for ranking construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Keep only the K best entries; `None` keeps the full vocabulary.
    pub top_k: Option<usize>,

    /// Rank the answer against itself instead of leaving it out.
    pub include_answer: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_k: Some(1000),
            include_answer: false,
        }
    }
}

/// One day's computed game state.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRanking {
    pub date: GameDate,
    pub answer: String,
    /// Canonically ordered, unique by word.
    pub entries: Vec<RankedEntry>,
}

impl DailyRanking {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 0-based rank of `word`, if it made it into the ranking.
    pub fn rank_of(&self, word: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.word == word)
    }
}

/// Computes daily rankings through the vector query collaborator.
///
/// Building is pure: it reads the vocabulary and the collaborator and
/// never touches the ranking store.
pub struct RankingBuilder {
    vectors: Arc<dyn VectorQuery>,
    config: RankingConfig,
}

impl std::fmt::Debug for RankingBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingBuilder")
            .field("vectors", &"<VectorQuery>")
            .field("config", &self.config)
            .finish()
    }
}

impl RankingBuilder {
    pub fn new(vectors: Arc<dyn VectorQuery>, config: RankingConfig) -> Self {
        Self { vectors, config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn vectors(&self) -> &Arc<dyn VectorQuery> {
        &self.vectors
    }

    /// Ranks every vocabulary word by similarity to `answer`.
    ///
    /// # Errors
    /// - `EmptyVocabulary` when fewer than two words are available
    /// - `UnknownAnswerWord` when `answer` is not in the vocabulary
    /// - `CollaboratorUnavailable` when the collaborator cannot be reached,
    ///   `InvalidVectors` when it rejects the embeddings; no partial ranking
    ///   is returned in either case
    pub fn build(
        &self,
        date: GameDate,
        answer: &str,
        vocabulary: &Vocabulary,
    ) -> RankingResult<DailyRanking> {
        if vocabulary.len() < 2 {
            return Err(RankingError::EmptyVocabulary {
                size: vocabulary.len(),
            });
        }

        let answer_word = vocabulary
            .get(answer)
            .ok_or_else(|| RankingError::UnknownAnswerWord {
                word: answer.to_string(),
            })?;
        let answer_embedding = answer_word.embedding();
        let include_answer = self.config.include_answer;

        let mut entries = vocabulary
            .as_slice()
            .par_iter()
            .filter(|word| include_answer || word.text() != answer)
            .map(|word| -> RankingResult<RankedEntry> {
                let score = self
                    .vectors
                    .similarity(answer_embedding, word.embedding())?;
                Ok(RankedEntry::new(word.text(), score))
            })
            .collect::<RankingResult<Vec<_>>>()?;

        sort_canonical(&mut entries);
        if let Some(k) = self.config.top_k {
            entries.truncate(k);
        }

        tracing::debug!(
            "Built ranking for {date}: answer='{answer}', {} of {} words kept",
            entries.len(),
            vocabulary.len()
        );

        Ok(DailyRanking {
            date,
            answer: answer.to_string(),
            entries,
        })
    }
}
