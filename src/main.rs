//! CLI entry point for the daily ranking engine.
//!
//! Provides commands for publishing a day, inspecting the stored ranking
//! and scoring guesses. Main components: Cli parser, Commands enum and the
//! per-command handlers.

use anyhow::Context;
use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use serde::Serialize;
use ssamantle::display::{DayView, Mark, THEME, TopKView};
use ssamantle::io::{ExitCode, OutputFormat, OutputManager};
use ssamantle::{
    DaySessionManager, FileAnswerSource, GameDate, HashAnswerPicker, MemoryRankingStore,
    MemoryVectorStore, RankingBuilder, RankingStore, SessionError, Settings, VectorError,
    VectorQuery,
};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Daily word-similarity ranking engine
#[derive(Parser)]
#[command(
    name = "ssamantle",
    version = env!("CARGO_PKG_VERSION"),
    about = "Daily word-similarity ranking engine",
    long_about = "Publish a daily answer, rank the vocabulary against it and score guesses.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    #[command(about = "Set up .ssamantle directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    #[command(about = "Display active settings")]
    Config,

    #[command(
        about = "Publish a day's answer and ranking, then apply retention",
        after_help = concat!(
            "Examples:\n",
            "  ssamantle advance\n",
            "  ssamantle advance --date 2025-01-15\n",
            "  ssamantle advance --date 2025-01-15 --answer cat",
        )
    )]
    Advance {
        /// Day to publish (defaults to today in the configured offset)
        #[arg(long)]
        date: Option<GameDate>,

        /// Answer word; picked from the answers file when omitted
        #[arg(long)]
        answer: Option<String>,
    },

    #[command(about = "Show the active day")]
    Today,

    #[command(about = "Score a guess against the active day's answer")]
    Guess { word: String },

    #[command(about = "List the best-ranked words of a day")]
    Top {
        /// Number of entries
        #[arg(short, long, default_value_t = 10)]
        k: usize,

        /// Day to list (defaults to the active day)
        #[arg(long)]
        date: Option<GameDate>,
    },

    #[command(about = "Delete every stored key of a day")]
    Delete { date: GameDate },

    #[command(about = "Delete days outside the retention window")]
    Retain {
        /// Reference day (defaults to the active day, then today)
        #[arg(long)]
        date: Option<GameDate>,
    },

    #[command(about = "Report vector store and ranking cache readiness")]
    Health,
}

#[derive(Debug, Serialize)]
struct DeleteSummary {
    date: GameDate,
    removed: usize,
}

impl fmt::Display for DeleteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deleted {} key(s) for {}", self.removed, self.date)
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mut output = OutputManager::new(OutputFormat::from_json_flag(cli.json));

    if let Commands::Init { force } = cli.command {
        return match Settings::init_config_file(force) {
            Ok(path) => {
                println!("Created configuration file at: {}", path.display());
                println!("Edit this file to customize your settings.");
                ExitCode::Success.into()
            }
            Err(e) => {
                eprintln!("{}", THEME.mark(Mark::Fail, &e.to_string()));
                ExitCode::ConfigError.into()
            }
        };
    }

    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::ConfigError.into();
        }
    };

    init_tracing(cli.debug || settings.debug);

    match run(&cli, &settings, &mut output) {
        Ok(code) => code.into(),
        Err(e) => report_error(&e, &mut output).into(),
    }
}

fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report_error(error: &anyhow::Error, output: &mut OutputManager) -> ExitCode {
    if let Some(session) = error.downcast_ref::<SessionError>() {
        return output
            .error(session)
            .unwrap_or_else(|_| ExitCode::from_error(session));
    }

    eprintln!("{}", THEME.mark(Mark::Fail, &format!("{error:#}")));
    match error.downcast_ref::<VectorError>() {
        Some(VectorError::Io(_)) => ExitCode::IoError,
        Some(_) => ExitCode::ConfigError,
        None => ExitCode::GeneralError,
    }
}

fn run(cli: &Cli, settings: &Settings, output: &mut OutputManager) -> anyhow::Result<ExitCode> {
    let code = match &cli.command {
        Commands::Init { .. } => ExitCode::Success,

        Commands::Config => {
            output.info("Current Configuration:")?;
            output.info(&"=".repeat(50))?;
            output.success(ConfigView(settings))?
        }

        Commands::Advance { date, answer } => {
            let date = match date {
                Some(date) => *date,
                None => settings.clock()?.today(),
            };
            let vectors = load_vectors(settings)?;
            let vocabulary = vectors.vocabulary()?;
            let manager = session(settings, open_store(settings)?, vectors);

            let report = match answer {
                Some(answer) => manager.advance_day(date, answer, &vocabulary),
                None => manager.refresh(
                    date,
                    &FileAnswerSource::new(&settings.answers_path),
                    &HashAnswerPicker::new(),
                    &vocabulary,
                ),
            }?;
            output.success(&report)?
        }

        Commands::Today => {
            let store = open_store(settings)?;
            let view = match store.active_date().map_err(SessionError::from)? {
                Some(date) => Some(DayView {
                    date,
                    answer: store.answer(date).map_err(SessionError::from)?,
                    description: store
                        .answer_description(date)
                        .map_err(SessionError::from)?,
                    entries: store
                        .top_k(date, usize::MAX)
                        .map_err(SessionError::from)?
                        .len(),
                }),
                None => None,
            };
            output.item(view, "Active day", "today")?
        }

        Commands::Guess { word } => {
            let manager = session(settings, open_store(settings)?, load_vectors(settings)?);
            manager.restore()?;
            let outcome = manager.guess(word)?;
            output.success(&outcome)?;
            ExitCode::from_lookup(&outcome.result())
        }

        Commands::Top { k, date } => {
            let store = open_store(settings)?;
            let date = match date {
                Some(date) => Some(*date),
                None => store.active_date().map_err(SessionError::from)?,
            };
            let Some(date) = date else {
                return Ok(output.not_found("Active day", "today")?);
            };
            let entries = store.top_k(date, *k).map_err(SessionError::from)?;
            if entries.is_empty() {
                output.not_found("Ranking", &date.to_string())?
            } else {
                output.success(TopKView { date, entries })?
            }
        }

        Commands::Delete { date } => {
            let store = open_store(settings)?;
            let removed = store.delete_day(*date).map_err(SessionError::from)?;
            output.success(DeleteSummary {
                date: *date,
                removed,
            })?
        }

        Commands::Retain { date } => {
            let store = open_store(settings)?;
            let current = match date {
                Some(date) => *date,
                None => match store.active_date().map_err(SessionError::from)? {
                    Some(active) => active,
                    None => settings.clock()?.today(),
                },
            };
            let report = settings.retention.apply(store.as_ref(), current);
            output.success(&report)?
        }

        Commands::Health => {
            let dimension = settings.dimension()?;
            let vectors = load_vectors(settings).unwrap_or_else(|e| {
                tracing::warn!("Vector store not loaded: {e:#}");
                Arc::new(MemoryVectorStore::new(dimension))
            });
            let manager = session(settings, open_store(settings)?, vectors);
            manager.restore()?;
            let health = manager.health();
            output.success(health)?;
            if health.is_healthy() {
                ExitCode::Success
            } else {
                ExitCode::GeneralError
            }
        }
    };

    Ok(code)
}

#[derive(Serialize)]
struct ConfigView<'a>(&'a Settings);

impl fmt::Display for ConfigView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = toml::to_string_pretty(self.0).map_err(|_| fmt::Error)?;
        write!(f, "{}", rendered.trim_end())
    }
}

fn open_store(settings: &Settings) -> anyhow::Result<Arc<dyn RankingStore>> {
    let store = MemoryRankingStore::open(
        settings.store.key_prefix.clone(),
        &settings.store.snapshot_path,
    )
    .map_err(SessionError::from)
    .with_context(|| {
        format!(
            "Failed to open ranking store at {}",
            settings.store.snapshot_path.display()
        )
    })?;
    Ok(Arc::new(store))
}

fn load_vectors(settings: &Settings) -> anyhow::Result<Arc<MemoryVectorStore>> {
    let dimension = settings.dimension()?;
    let vectors = MemoryVectorStore::load_vec_file(&settings.vectors_path, dimension)
        .with_context(|| {
            format!(
                "Failed to load vectors from {}",
                settings.vectors_path.display()
            )
        })?;
    tracing::debug!("Loaded {} word vectors", vectors.len());
    Ok(Arc::new(vectors))
}

fn session(
    settings: &Settings,
    store: Arc<dyn RankingStore>,
    vectors: Arc<MemoryVectorStore>,
) -> DaySessionManager {
    let vectors: Arc<dyn VectorQuery> = vectors;
    DaySessionManager::new(
        store,
        RankingBuilder::new(vectors, settings.ranking_config()),
        settings.retention,
    )
}
