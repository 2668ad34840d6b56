/// The main library module for ssamantle
pub mod answers;
pub mod config;
pub mod display;
pub mod error;
pub mod io;
pub mod ranking;
pub mod session;
pub mod store;
pub mod types;
pub mod vector;

// Explicit exports for better API clarity
pub use answers::{AnswerEntry, AnswerPicker, AnswerSource, FileAnswerSource, HashAnswerPicker};
pub use config::Settings;
pub use error::{RankingError, RankingResult, SessionError, SessionResult};
pub use ranking::{DailyRanking, RankingBuilder, RankingConfig};
pub use session::{Clock, DaySessionManager, GuessOutcome, RetentionPolicy, SessionState};
pub use store::{DayLookup, KeyPrefix, MemoryRankingStore, RankingStore, StoreError, StoreResult};
pub use types::{GameDate, RankedEntry, Vocabulary, Word};
pub use vector::{MemoryVectorStore, VectorDimension, VectorError, VectorQuery};
