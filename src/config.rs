use crate::db::DEFAULT_DB_FILE;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "smvtodo")]
#[command(about = "Terminal todo-list manager backed by SQLite")]
#[command(version)]
pub struct Cli {
    /// Path to the database file (created if missing)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DB_FILE)]
    pub db: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Settings for a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    /// Used when `RUST_LOG` is not set
    pub log_level: LevelFilter,
}

impl Config {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Config {
            db_path: db_path.into(),
            log_level: LevelFilter::WARN,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_DB_FILE)
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let log_level = match cli.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Config {
            db_path: cli.db,
            log_level,
        }
    }
}
