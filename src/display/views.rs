//! Text renderings for CLI results.
//!
//! Every type here is also `Serialize`, so the same value feeds both the
//! text and the JSON output paths.

use std::fmt;

use serde::Serialize;

use super::tables::{create_health_table, create_ranking_table};
use super::theme::{Mark, THEME};
use crate::session::{AdvanceReport, GuessOutcome, HealthReport, RetentionReport, ScoreSource};
use crate::types::{GameDate, RankedEntry};

/// A slice of a day's stored ranking.
#[derive(Debug, Clone, Serialize)]
pub struct TopKView {
    pub date: GameDate,
    pub entries: Vec<RankedEntry>,
}

impl fmt::Display for TopKView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Top {} for {}",
            self.entries.len(),
            THEME.date(self.date)
        )?;
        write!(f, "{}", create_ranking_table(&self.entries, 0))
    }
}

/// The active day as shown by `today`.
#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub date: GameDate,
    pub answer: Option<String>,
    pub description: Option<String>,
    pub entries: usize,
}

impl fmt::Display for DayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Date:    {}", THEME.date(self.date))?;
        match &self.answer {
            Some(answer) => writeln!(f, "Answer:  {}", THEME.word(answer))?,
            None => writeln!(f, "Answer:  {}", THEME.muted("(missing)"))?,
        }
        if let Some(description) = &self.description {
            writeln!(f, "Hint:    {description}")?;
        }
        write!(f, "Ranked:  {}", self.entries)
    }
}

impl fmt::Display for AdvanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.republished {
            "Republished"
        } else {
            "Published"
        };
        writeln!(
            f,
            "{}",
            THEME.mark(
                Mark::Done,
                &format!(
                    "{verb} {} with answer '{}' ({} ranked words)",
                    self.date, self.answer, self.entries
                )
            )
        )?;

        write!(f, "{}", self.retention)
    }
}

impl fmt::Display for RetentionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let deleted = self.deleted_dates();
        if deleted.is_empty() {
            write!(
                f,
                "{}",
                THEME.muted(format!("Retention: nothing older than {}", self.cutoff))
            )?;
        } else {
            let dates: Vec<String> = deleted.iter().map(ToString::to_string).collect();
            write!(f, "Retention: deleted {}", dates.join(", "))?;
        }

        for failure in &self.failed {
            let target = failure
                .date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "stored days".to_string());
            write!(
                f,
                "\n{}",
                THEME.mark(
                    Mark::Warn,
                    &format!("Retention could not clean {target}: {}", failure.reason)
                )
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for GuessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWord => write!(f, "Enter a word to guess"),
            Self::NoActiveDay => write!(f, "No day is active yet; run `ssamantle advance`"),
            Self::UnknownWord { word, .. } => {
                write!(f, "'{word}' is not in the vocabulary")
            }
            Self::Found(result) => {
                if result.is_answer {
                    return write!(
                        f,
                        "{}",
                        THEME.mark(Mark::Done, &format!("'{}' is the answer!", result.word))
                    );
                }
                let rank = match (result.rank, result.source) {
                    (Some(rank), _) => format!("rank {}", rank + 1),
                    (None, ScoreSource::Computed) => "outside the ranking".to_string(),
                    (None, ScoreSource::Cached) => "unranked".to_string(),
                };
                write!(
                    f,
                    "{}  similarity {}  ({rank})",
                    THEME.word(&result.word),
                    THEME.score(result.score),
                )
            }
        }
    }
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", create_health_table(self))
    }
}
