//! Runtime configuration for the CLI host.
//!
//! Each setting resolves from its command-line flag, then its `TASKNEST_*`
//! environment variable, then a built-in default. The default data directory
//! is the platform's per-user data dir for TaskNest.

use clap::Parser;
use directories::ProjectDirs;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DB_FILE_NAME: &str = "tasknest.sqlite3";

/// Command-line surface of the `tasknest` binary.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "tasknest", version, about = "Projects and todos in your terminal")]
pub struct CliConfig {
    /// Directory holding the database and the `logs/` folder
    #[arg(long, env = "TASKNEST_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, env = "TASKNEST_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Keep state in an in-memory database for this session only
    #[arg(long)]
    pub memory: bool,
}

/// Fully resolved settings used by `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub in_memory: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NoDataDirectory,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDataDirectory => write!(
                f,
                "cannot locate a per-user data directory; pass --data-dir or set TASKNEST_DATA_DIR"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl CliConfig {
    /// Applies defaults against the current directory and platform dirs.
    pub fn resolve(self) -> Result<RuntimeConfig, ConfigError> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        let platform_dir = ProjectDirs::from("dev", "tasknest", "tasknest")
            .map(|dirs| dirs.data_dir().to_path_buf());
        self.resolve_with(&cwd, platform_dir)
    }

    fn resolve_with(
        self,
        cwd: &Path,
        platform_dir: Option<PathBuf>,
    ) -> Result<RuntimeConfig, ConfigError> {
        let data_dir = match self.data_dir {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => cwd.join(dir),
            None => platform_dir.ok_or(ConfigError::NoDataDirectory)?,
        };
        let log_level = self
            .log_level
            .unwrap_or_else(|| tasknest_core::default_log_level().to_string());

        Ok(RuntimeConfig {
            data_dir,
            log_level,
            in_memory: self.memory,
        })
    }
}

impl RuntimeConfig {
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}
