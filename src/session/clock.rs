use chrono::{FixedOffset, Utc};
use thiserror::Error;

use crate::types::GameDate;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("UTC offset of {minutes} minute(s) is out of range (must be within +/-24h)")]
pub struct InvalidOffsetError {
    pub minutes: i32,
}

/// Source of "today" for the game.
///
/// The game day rolls over at midnight in a fixed UTC offset rather than
/// in the host's local zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    System(FixedOffset),
    Fixed(GameDate),
}

impl Clock {
    /// Wall clock in the given offset east of UTC.
    pub fn with_offset_minutes(minutes: i32) -> Result<Self, InvalidOffsetError> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::System)
            .ok_or(InvalidOffsetError { minutes })
    }

    /// A clock that is always on `date`.
    pub fn fixed(date: GameDate) -> Self {
        Self::Fixed(date)
    }

    pub fn today(&self) -> GameDate {
        match self {
            Self::System(offset) => {
                GameDate::new(Utc::now().with_timezone(offset).date_naive())
            }
            Self::Fixed(date) => *date,
        }
    }
}
