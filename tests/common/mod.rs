#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ssamantle::store::StoreKey;
use ssamantle::{
    DailyRanking, DayLookup, DaySessionManager, GameDate, KeyPrefix, MemoryRankingStore,
    MemoryVectorStore, RankedEntry, RankingBuilder, RankingConfig, RankingStore,
    RetentionPolicy, StoreError, StoreResult, VectorError, VectorQuery, Vocabulary, Word,
};
use tempfile::TempDir;

pub fn date(year: i32, month: u32, day: u32) -> GameDate {
    GameDate::from_ymd(year, month, day).expect("valid test date")
}

pub fn entries(pairs: &[(&str, f32)]) -> Vec<RankedEntry> {
    pairs
        .iter()
        .map(|(word, score)| RankedEntry::new(*word, *score))
        .collect()
}

/// `{cat:[1,0], dog:[0.9,0.1], car:[0,1]}`
pub fn pet_vocabulary() -> Vocabulary {
    Vocabulary::new(vec![
        Word::new("cat", vec![1.0, 0.0]),
        Word::new("dog", vec![0.9, 0.1]),
        Word::new("car", vec![0.0, 1.0]),
    ])
    .expect("valid vocabulary")
}

/// Collaborator that can be switched into failing mode mid-test.
pub struct FlakyVectors {
    inner: MemoryVectorStore,
    failing: AtomicBool,
}

impl FlakyVectors {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        Self {
            inner: MemoryVectorStore::from_vocabulary(vocabulary).expect("vectors"),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), VectorError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(VectorError::Unavailable {
                reason: "connection refused".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl VectorQuery for FlakyVectors {
    fn embed(&self, word: &str) -> Result<Option<Vec<f32>>, VectorError> {
        self.check()?;
        self.inner.embed(word)
    }

    fn similarity(&self, a: &[f32], b: &[f32]) -> Result<f32, VectorError> {
        self.check()?;
        self.inner.similarity(a, b)
    }

    fn is_ready(&self) -> bool {
        !self.failing.load(Ordering::SeqCst)
    }
}

/// Store whose `delete_day` fails for one poisoned date.
pub struct PoisonedDeleteStore {
    pub inner: MemoryRankingStore,
    pub poisoned: GameDate,
}

impl RankingStore for PoisonedDeleteStore {
    fn save_daily_topk(&self, date: GameDate, entries: Vec<RankedEntry>) -> StoreResult<()> {
        self.inner.save_daily_topk(date, entries)
    }
    fn top_k(&self, date: GameDate, k: usize) -> StoreResult<Vec<RankedEntry>> {
        self.inner.top_k(date, k)
    }
    fn score(&self, date: GameDate, word: &str) -> StoreResult<Option<f32>> {
        self.inner.score(date, word)
    }
    fn rank(&self, date: GameDate, word: &str) -> StoreResult<Option<usize>> {
        self.inner.rank(date, word)
    }
    fn lookup(&self, date: GameDate, word: &str) -> StoreResult<DayLookup> {
        self.inner.lookup(date, word)
    }
    fn set_answer(&self, date: GameDate, answer: &str) -> StoreResult<()> {
        self.inner.set_answer(date, answer)
    }
    fn answer(&self, date: GameDate) -> StoreResult<Option<String>> {
        self.inner.answer(date)
    }
    fn set_answer_description(
        &self,
        date: GameDate,
        description: Option<&str>,
    ) -> StoreResult<()> {
        self.inner.set_answer_description(date, description)
    }
    fn answer_description(&self, date: GameDate) -> StoreResult<Option<String>> {
        self.inner.answer_description(date)
    }
    fn delete_day(&self, date: GameDate) -> StoreResult<usize> {
        if date == self.poisoned {
            return Err(StoreError::Unavailable(format!(
                "cannot delete {}",
                StoreKey::TopK(date).render(self.inner.prefix())
            )));
        }
        self.inner.delete_day(date)
    }
    fn active_date(&self) -> StoreResult<Option<GameDate>> {
        self.inner.active_date()
    }
    fn set_active_date(&self, date: GameDate) -> StoreResult<()> {
        self.inner.set_active_date(date)
    }
    fn has_ranking(&self, date: GameDate) -> StoreResult<bool> {
        self.inner.has_ranking(date)
    }
    fn stored_dates(&self) -> StoreResult<Vec<GameDate>> {
        self.inner.stored_dates()
    }
    fn publish_day(
        &self,
        ranking: &DailyRanking,
        description: Option<&str>,
        activate: bool,
    ) -> StoreResult<()> {
        self.inner.publish_day(ranking, description, activate)
    }
}

pub fn manager_with(
    store: Arc<dyn RankingStore>,
    vectors: Arc<dyn VectorQuery>,
    config: RankingConfig,
) -> DaySessionManager {
    DaySessionManager::new(
        store,
        RankingBuilder::new(vectors, config),
        RetentionPolicy::default(),
    )
}

/// Manager over an in-memory store and the pet vocabulary.
pub fn pet_manager() -> DaySessionManager {
    let vectors: Arc<dyn VectorQuery> = Arc::new(FlakyVectors::new(&pet_vocabulary()));
    manager_with(
        Arc::new(MemoryRankingStore::new(KeyPrefix::default())),
        vectors,
        RankingConfig::default(),
    )
}

pub struct TestFiles {
    pub dir: TempDir,
}

impl TestFiles {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    pub fn path(&self, path: &str) -> PathBuf {
        self.dir.path().join(path)
    }
}

pub mod sample_data {
    pub const PET_VEC: &str = "\
3 2
cat 1.0 0.0
dog 0.9 0.1
car 0.0 1.0
";

    pub const ANSWERS: &str = "\
# daily answers
cat a small feline
dog

dog duplicate is ignored
";
}
