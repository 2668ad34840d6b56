//! Ranking construction for a day's answer.
//!
//! A [`DailyRanking`] is the whole vocabulary (or its top-K) ordered by
//! similarity to the answer, score descending with ties broken by word.

mod builder;

pub use builder::{DailyRanking, RankingBuilder, RankingConfig};
