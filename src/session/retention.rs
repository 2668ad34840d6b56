use serde::{Deserialize, Serialize};

use crate::store::RankingStore;
use crate::types::GameDate;

/// How many previous days survive a day advance.
///
/// With `keep_previous_days = 1`, advancing to D keeps D and D-1 and
/// deletes D-2 and anything older.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionPolicy {
    pub keep_previous_days: u32,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            keep_previous_days: 1,
        }
    }
}

impl RetentionPolicy {
    pub fn new(keep_previous_days: u32) -> Self {
        Self { keep_previous_days }
    }

    /// Oldest date that is kept when `current` is active.
    pub fn cutoff(&self, current: GameDate) -> GameDate {
        current.days_before(self.keep_previous_days)
    }

    pub fn is_expired(&self, date: GameDate, current: GameDate) -> bool {
        date < self.cutoff(current)
    }

    /// Deletes every expired day still present in `store`.
    ///
    /// Best-effort: individual failures are logged and collected into the
    /// report, never returned as an error.
    pub fn apply(&self, store: &dyn RankingStore, current: GameDate) -> RetentionReport {
        let cutoff = self.cutoff(current);
        let mut report = RetentionReport::new(cutoff);

        let dates = match store.stored_dates() {
            Ok(dates) => dates,
            Err(e) => {
                tracing::warn!("Retention could not list stored days: {e}");
                report.failed.push(RetentionFailure {
                    date: None,
                    reason: e.to_string(),
                });
                return report;
            }
        };

        for date in dates.into_iter().filter(|d| *d < cutoff) {
            match store.delete_day(date) {
                Ok(removed) => {
                    tracing::info!("Retention removed {date} ({removed} key(s))");
                    report.deleted.push((date, removed));
                }
                Err(e) => {
                    tracing::warn!("Retention failed to delete {date}: {e}");
                    report.failed.push(RetentionFailure {
                        date: Some(date),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }
}

/// A day (or the listing itself, when `date` is `None`) that could not be
/// cleaned up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetentionFailure {
    pub date: Option<GameDate>,
    pub reason: String,
}

/// Outcome of one retention pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetentionReport {
    pub cutoff: GameDate,
    pub deleted: Vec<(GameDate, usize)>,
    pub failed: Vec<RetentionFailure>,
}

impl RetentionReport {
    fn new(cutoff: GameDate) -> Self {
        Self {
            cutoff,
            deleted: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn deleted_dates(&self) -> Vec<GameDate> {
        self.deleted.iter().map(|(date, _)| *date).collect()
    }
}
