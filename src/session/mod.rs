//! Day session management.
//!
//! The [`DaySessionManager`] owns the active date pointer and is the only
//! component that moves it. Everything that needs "today" asks the
//! manager (or a [`Clock`]) instead of reading ambient global state.

mod clock;
mod guess;
mod manager;
mod retention;

pub use clock::{Clock, InvalidOffsetError};
pub use guess::{GuessOutcome, GuessResult, ScoreSource};
pub use manager::{AdvanceReport, DaySessionManager, HealthReport, SessionState};
pub use retention::{RetentionFailure, RetentionPolicy, RetentionReport};
