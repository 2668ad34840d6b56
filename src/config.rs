//! Configuration module for the daily ranking engine.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `SSAMANTLE_` and use double
//! underscores to separate nested levels:
//! - `SSAMANTLE_RANKING__TOP_K=500` sets `ranking.top_k`
//! - `SSAMANTLE_STORE__KEY_PREFIX=staging` sets `store.key_prefix`
//! - `SSAMANTLE_TIMEZONE_OFFSET_MINUTES=0` sets `timezone_offset_minutes`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ranking::RankingConfig;
use crate::session::{Clock, InvalidOffsetError, RetentionPolicy};
use crate::store::KeyPrefix;
use crate::vector::{VectorDimension, VectorError};

/// Directory holding the settings file and the default snapshot.
pub const CONFIG_DIR: &str = ".ssamantle";

const ENV_PREFIX: &str = "SSAMANTLE_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Global debug mode
    #[serde(default)]
    pub debug: bool,

    /// Offset east of UTC, in minutes, at which the game day rolls over
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset_minutes: i32,

    /// Answer candidates, one `word [description]` per line
    #[serde(default = "default_answers_path")]
    pub answers_path: PathBuf,

    /// Vocabulary in fastText `.vec` text format
    #[serde(default = "default_vectors_path")]
    pub vectors_path: PathBuf,

    #[serde(default = "default_vector_dimension")]
    pub vector_dimension: usize,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub ranking: RankingSettings,

    #[serde(default)]
    pub retention: RetentionPolicy,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Prefix for every persisted key
    #[serde(default)]
    pub key_prefix: KeyPrefix,

    /// JSON snapshot the store is persisted to
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct RankingSettings {
    /// Entries kept per day; 0 keeps the whole vocabulary
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Rank the answer against itself
    #[serde(default)]
    pub include_answer: bool,
}

fn default_version() -> u32 {
    1
}
fn default_timezone_offset() -> i32 {
    9 * 60
}
fn default_answers_path() -> PathBuf {
    PathBuf::from("data/answers.txt")
}
fn default_vectors_path() -> PathBuf {
    PathBuf::from("data/words.vec")
}
fn default_vector_dimension() -> usize {
    300
}
fn default_snapshot_path() -> PathBuf {
    PathBuf::from(CONFIG_DIR).join("rankings.json")
}
fn default_top_k() -> usize {
    1000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            debug: false,
            timezone_offset_minutes: default_timezone_offset(),
            answers_path: default_answers_path(),
            vectors_path: default_vectors_path(),
            vector_dimension: default_vector_dimension(),
            store: StoreConfig::default(),
            ranking: RankingSettings::default(),
            retention: RetentionPolicy::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key_prefix: KeyPrefix::default(),
            snapshot_path: default_snapshot_path(),
        }
    }
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            include_answer: false,
        }
    }
}

impl RankingSettings {
    pub fn to_ranking_config(self) -> RankingConfig {
        RankingConfig {
            top_k: (self.top_k > 0).then_some(self.top_k),
            include_answer: self.include_answer,
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join("settings.toml"));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref()).extract().map_err(Box::new)
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(path))
            // Double underscore (__) separates nested levels,
            // single underscore (_) stays within field names
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
    }

    /// Find the settings file by looking for a `.ssamantle` directory
    /// from the current directory up to the root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_DIR))
            .find(|dir| dir.is_dir())
            .map(|dir| dir.join("settings.toml"))
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file with helpful comments in the
    /// current directory
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        Self::init_config_file_at(PathBuf::from(CONFIG_DIR).join("settings.toml"), force)
    }

    pub fn init_config_file_at(
        config_path: PathBuf,
        force: bool,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, DEFAULT_TEMPLATE)?;
        tracing::debug!("Wrote settings template to {}", config_path.display());

        Ok(config_path)
    }

    /// Clock that rolls the game day over in the configured offset.
    pub fn clock(&self) -> Result<Clock, InvalidOffsetError> {
        Clock::with_offset_minutes(self.timezone_offset_minutes)
    }

    pub fn dimension(&self) -> Result<VectorDimension, VectorError> {
        VectorDimension::new(self.vector_dimension)
    }

    pub fn ranking_config(&self) -> RankingConfig {
        self.ranking.to_ranking_config()
    }
}

const DEFAULT_TEMPLATE: &str = r#"# ssamantle configuration file

# Version of the configuration schema
version = 1

# Global debug mode
debug = false

# Offset east of UTC, in minutes, at which the game day rolls over
# (540 = UTC+9, Asia/Seoul)
timezone_offset_minutes = 540

# Answer candidates: one `word [description]` per line, `#` for comments
answers_path = "data/answers.txt"

# Vocabulary embeddings in fastText .vec text format
vectors_path = "data/words.vec"
vector_dimension = 300

[store]
# Prefix for every persisted key (`{prefix}:{date}:topk`, ...)
key_prefix = "ssamantle"

# JSON snapshot the ranking store is persisted to
snapshot_path = ".ssamantle/rankings.json"

[ranking]
# Entries kept per day; 0 keeps the whole vocabulary.
# Words outside the ranking are still scored on demand, without a rank.
top_k = 1000

# Rank the answer against itself instead of leaving it out
include_answer = false

[retention]
# Previous days kept after advancing; older days are deleted
keep_previous_days = 1
"#;
