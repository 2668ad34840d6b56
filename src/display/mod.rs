//! Terminal display for CLI output.
//!
//! Styled tables and text renderings of rankings, guesses and reports.

pub mod tables;
pub mod theme;
pub mod views;

pub use tables::{create_health_table, create_ranking_table};
pub use theme::{Heat, Mark, THEME, Theme};
pub use views::{DayView, TopKView};
