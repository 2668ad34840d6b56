use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::snapshot::{self, SnapshotValue};
use super::{DayLookup, KeyPrefix, RankingSet, RankingStore, StoreKey, StoreResult};
use crate::ranking::DailyRanking;
use crate::types::{GameDate, RankedEntry};

#[derive(Debug, Clone)]
enum Slot {
    Scalar(String),
    Ranking(Arc<RankingSet>),
}

#[derive(Debug)]
enum WriteOp {
    Put(StoreKey, Slot),
    Delete(StoreKey),
}

/// In-process ranking store with optional JSON snapshot persistence.
///
/// Every write builds the next key map off to the side, persists it when a
/// snapshot path is configured, and only then swaps it in under the write
/// lock, so readers never wait on disk I/O. Writers are serialized by a
/// separate mutex. Rankings are shared as `Arc<RankingSet>`, so readers
/// holding an old ranking keep a complete copy while a replacement lands.
#[derive(Debug)]
pub struct MemoryRankingStore {
    prefix: KeyPrefix,
    state: RwLock<HashMap<String, Slot>>,
    writer: Mutex<()>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryRankingStore {
    /// A purely in-memory store.
    pub fn new(prefix: KeyPrefix) -> Self {
        Self {
            prefix,
            state: RwLock::new(HashMap::new()),
            writer: Mutex::new(()),
            snapshot_path: None,
        }
    }

    /// A store backed by the snapshot at `path`, loading it if present.
    pub fn open(prefix: KeyPrefix, path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let mut state = HashMap::new();
        for (key, value) in snapshot::load(&path)? {
            let slot = match value {
                SnapshotValue::Scalar(s) => Slot::Scalar(s),
                SnapshotValue::Ranking(entries) => {
                    Slot::Ranking(Arc::new(RankingSet::from_entries(entries)?))
                }
            };
            state.insert(key, slot);
        }

        tracing::debug!(
            "Opened ranking store at {} ({} keys)",
            path.display(),
            state.len()
        );

        Ok(Self {
            prefix,
            state: RwLock::new(state),
            writer: Mutex::new(()),
            snapshot_path: Some(path),
        })
    }

    pub fn prefix(&self) -> &KeyPrefix {
        &self.prefix
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    fn key(&self, key: StoreKey) -> String {
        key.render(&self.prefix)
    }

    fn ranking(&self, date: GameDate) -> Option<Arc<RankingSet>> {
        match self.state.read().get(&self.key(StoreKey::TopK(date))) {
            Some(Slot::Ranking(set)) => Some(Arc::clone(set)),
            _ => None,
        }
    }

    fn scalar(&self, key: StoreKey) -> Option<String> {
        match self.state.read().get(&self.key(key)) {
            Some(Slot::Scalar(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Applies `ops` all-or-nothing and returns how many keys were deleted.
    fn commit(&self, ops: Vec<WriteOp>) -> StoreResult<usize> {
        let _writer = self.writer.lock();
        let mut next = self.state.read().clone();
        let mut removed = 0;
        let mut changed = false;

        for op in ops {
            match op {
                WriteOp::Put(key, slot) => {
                    next.insert(self.key(key), slot);
                    changed = true;
                }
                WriteOp::Delete(key) => {
                    if next.remove(&self.key(key)).is_some() {
                        removed += 1;
                        changed = true;
                    }
                }
            }
        }

        if !changed {
            return Ok(0);
        }

        if let Some(path) = &self.snapshot_path {
            snapshot::write(path, to_snapshot(&next))?;
        }
        *self.state.write() = next;
        Ok(removed)
    }

    fn ranking_op(date: GameDate, entries: Vec<RankedEntry>) -> StoreResult<WriteOp> {
        let set = RankingSet::from_entries(entries)?;
        Ok(WriteOp::Put(StoreKey::TopK(date), Slot::Ranking(Arc::new(set))))
    }

    fn description_op(date: GameDate, description: Option<&str>) -> WriteOp {
        match description {
            Some(text) => WriteOp::Put(
                StoreKey::AnswerDescription(date),
                Slot::Scalar(text.to_string()),
            ),
            None => WriteOp::Delete(StoreKey::AnswerDescription(date)),
        }
    }
}

fn to_snapshot(state: &HashMap<String, Slot>) -> BTreeMap<String, SnapshotValue> {
    state
        .iter()
        .map(|(key, slot)| {
            let value = match slot {
                Slot::Scalar(s) => SnapshotValue::Scalar(s.clone()),
                Slot::Ranking(set) => SnapshotValue::Ranking(set.entries().to_vec()),
            };
            (key.clone(), value)
        })
        .collect()
}

impl RankingStore for MemoryRankingStore {
    fn save_daily_topk(&self, date: GameDate, entries: Vec<RankedEntry>) -> StoreResult<()> {
        let op = Self::ranking_op(date, entries)?;
        self.commit(vec![op]).map(|_| ())
    }

    fn top_k(&self, date: GameDate, k: usize) -> StoreResult<Vec<RankedEntry>> {
        Ok(self
            .ranking(date)
            .map(|set| set.top(k).to_vec())
            .unwrap_or_default())
    }

    fn score(&self, date: GameDate, word: &str) -> StoreResult<Option<f32>> {
        Ok(self.ranking(date).and_then(|set| set.score(word)))
    }

    fn rank(&self, date: GameDate, word: &str) -> StoreResult<Option<usize>> {
        Ok(self.ranking(date).and_then(|set| set.rank(word)))
    }

    fn lookup(&self, date: GameDate, word: &str) -> StoreResult<DayLookup> {
        let state = self.state.read();
        let answer = match state.get(&self.key(StoreKey::Answer(date))) {
            Some(Slot::Scalar(answer)) => Some(answer.clone()),
            _ => None,
        };
        let ranked = match state.get(&self.key(StoreKey::TopK(date))) {
            Some(Slot::Ranking(set)) => set.lookup(word),
            _ => None,
        };
        Ok(DayLookup { answer, ranked })
    }

    fn set_answer(&self, date: GameDate, answer: &str) -> StoreResult<()> {
        self.commit(vec![WriteOp::Put(
            StoreKey::Answer(date),
            Slot::Scalar(answer.to_string()),
        )])
        .map(|_| ())
    }

    fn answer(&self, date: GameDate) -> StoreResult<Option<String>> {
        Ok(self.scalar(StoreKey::Answer(date)))
    }

    fn set_answer_description(
        &self,
        date: GameDate,
        description: Option<&str>,
    ) -> StoreResult<()> {
        self.commit(vec![Self::description_op(date, description)])
            .map(|_| ())
    }

    fn answer_description(&self, date: GameDate) -> StoreResult<Option<String>> {
        Ok(self.scalar(StoreKey::AnswerDescription(date)))
    }

    fn delete_day(&self, date: GameDate) -> StoreResult<usize> {
        let ops = StoreKey::day_keys(date)
            .into_iter()
            .map(WriteOp::Delete)
            .collect();
        let removed = self.commit(ops)?;
        if removed > 0 {
            tracing::debug!("Deleted {removed} key(s) for {date}");
        }
        Ok(removed)
    }

    fn active_date(&self) -> StoreResult<Option<GameDate>> {
        self.scalar(StoreKey::ActiveDate)
            .map(|raw| GameDate::parse(&raw))
            .transpose()
            .map_err(Into::into)
    }

    fn set_active_date(&self, date: GameDate) -> StoreResult<()> {
        self.commit(vec![WriteOp::Put(
            StoreKey::ActiveDate,
            Slot::Scalar(date.to_string()),
        )])
        .map(|_| ())
    }

    fn has_ranking(&self, date: GameDate) -> StoreResult<bool> {
        Ok(self.ranking(date).is_some())
    }

    fn stored_dates(&self) -> StoreResult<Vec<GameDate>> {
        let state = self.state.read();
        let dates: BTreeSet<GameDate> = state
            .keys()
            .filter_map(|raw| StoreKey::parse(&self.prefix, raw))
            .filter_map(|key| key.date())
            .collect();
        Ok(dates.into_iter().collect())
    }

    fn publish_day(
        &self,
        ranking: &DailyRanking,
        description: Option<&str>,
        activate: bool,
    ) -> StoreResult<()> {
        let date = ranking.date;
        let mut ops = vec![
            Self::ranking_op(date, ranking.entries.clone())?,
            WriteOp::Put(StoreKey::Answer(date), Slot::Scalar(ranking.answer.clone())),
            Self::description_op(date, description),
        ];
        if activate {
            ops.push(WriteOp::Put(
                StoreKey::ActiveDate,
                Slot::Scalar(date.to_string()),
            ));
        }
        self.commit(ops).map(|_| ())
    }
}
