//! Terminal styling for rankings, guesses and reports.
//!
//! Colours are decided once per process: on when stdout is a terminal and
//! `NO_COLOR` is unset. [`Theme::plain`] gives an uncoloured theme.

use std::fmt::Display;
use std::sync::LazyLock;

use console::Style;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

/// Process-wide theme used by the CLI views.
pub static THEME: LazyLock<Theme> = LazyLock::new(Theme::detect);

/// Similarity at or above which a guess is shown as hot.
const HOT_SCORE: f32 = 0.5;
/// Similarity at or above which a guess is shown as warm.
const WARM_SCORE: f32 = 0.2;

/// Leading icon of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Done,
    Warn,
    Fail,
}

impl Mark {
    fn icon(self) -> &'static str {
        match self {
            Self::Done => "✓",
            Self::Warn => "⚠",
            Self::Fail => "✗",
        }
    }
}

/// How close a similarity score is to the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heat {
    Hot,
    Warm,
    Cold,
}

impl Heat {
    pub fn of(score: f32) -> Self {
        if score >= HOT_SCORE {
            Self::Hot
        } else if score >= WARM_SCORE {
            Self::Warm
        } else {
            Self::Cold
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    colors: bool,
    date: Style,
    word: Style,
    muted: Style,
}

impl Theme {
    pub fn detect() -> Self {
        let colors = std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal();
        Self::with_colors(colors)
    }

    pub fn plain() -> Self {
        Self::with_colors(false)
    }

    pub fn with_colors(colors: bool) -> Self {
        Self {
            colors,
            date: Style::new().magenta().force_styling(true),
            word: Style::new().yellow().bold().force_styling(true),
            muted: Style::new().dim().force_styling(true),
        }
    }

    pub fn colors_enabled(&self) -> bool {
        self.colors
    }

    pub fn date(&self, date: impl Display) -> String {
        self.paint(&self.date, date)
    }

    pub fn word(&self, word: impl Display) -> String {
        self.paint(&self.word, word)
    }

    pub fn muted(&self, text: impl Display) -> String {
        self.paint(&self.muted, text)
    }

    /// Similarity to four decimals, coloured by its [`Heat`].
    pub fn score(&self, score: f32) -> String {
        let text = format!("{score:.4}");
        if !self.colors {
            return text;
        }
        match Heat::of(score) {
            Heat::Hot => text.red().bold().to_string(),
            Heat::Warm => text.yellow().to_string(),
            Heat::Cold => text.blue().to_string(),
        }
    }

    /// One status line prefixed with its icon.
    pub fn mark(&self, mark: Mark, text: &str) -> String {
        let icon = mark.icon();
        if !self.colors {
            return format!("{icon} {text}");
        }
        match mark {
            Mark::Done => format!("{} {}", icon.green(), text.green()),
            Mark::Warn => format!("{} {}", icon.yellow(), text.yellow()),
            Mark::Fail => format!("{} {}", icon.red(), text.red().bold()),
        }
    }

    fn paint(&self, style: &Style, text: impl Display) -> String {
        if self.colors {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}
