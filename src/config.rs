//! Runtime configuration.
//!
//! Values are layered, highest priority first:
//!
//! 1. Command-line arguments
//! 2. Environment variables (through clap's `env` attribute)
//! 3. The TOML file named by `--config`
//! 4. Compiled defaults

use crate::dashboard::services::{BatchMode, SyncConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/corkboard";
const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_LOG_FILTER: &str = "info";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// The pool must hold at least one connection.
    #[error("database pool size must be positive")]
    EmptyPool,
}

/// TOML file layout. Every field is optional so files may override a subset.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    database: DatabaseSection,
    sync: SyncSection,
    logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DatabaseSection {
    url: Option<String>,
    pool_size: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SyncSection {
    batch_mode: Option<BatchMode>,
    refetch_after_partial_failure: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LoggingSection {
    filter: Option<String>,
}

/// Command-line and environment overrides.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "CORKBOARD_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// `PostgreSQL` connection URL.
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections.
    #[arg(long, global = true)]
    pub pool_size: Option<u32>,

    /// How multi-task reorders are persisted.
    #[arg(long, value_parser = parse_batch_mode, global = true)]
    pub batch_mode: Option<BatchMode>,

    /// Log filter directive, for example `corkboard=debug`.
    #[arg(long, env = "CORKBOARD_LOG", global = true)]
    pub log_filter: Option<String>,
}

fn parse_batch_mode(value: &str) -> Result<BatchMode, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "concurrent" => Ok(BatchMode::Concurrent),
        "atomic" => Ok(BatchMode::Atomic),
        other => Err(format!("unknown batch mode `{other}`, expected concurrent or atomic")),
    }
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Connection URL.
    pub url: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_owned(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorkboardConfig {
    /// Database settings.
    pub database: DatabaseConfig,
    /// Move persistence settings.
    pub sync: SyncConfig,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for CorkboardConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            sync: SyncConfig::default(),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl CorkboardConfig {
    /// Loads the file named in `args`, if any, and applies overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, or the
    /// resolved pool size is zero.
    pub fn load(args: &ConfigArgs) -> Result<Self, ConfigError> {
        let file = match args.config.as_deref() {
            Some(path) => read_config_file(path)?,
            None => ConfigFile::default(),
        };
        Self::resolve(args, file)
    }

    /// Parses TOML text and applies overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the text is invalid or the pool size is
    /// zero.
    pub fn from_toml(text: &str, args: &ConfigArgs) -> Result<Self, ConfigError> {
        Self::resolve(args, toml::from_str(text)?)
    }

    fn resolve(args: &ConfigArgs, file: ConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let pool_size = args
            .pool_size
            .or(file.database.pool_size)
            .unwrap_or(defaults.database.pool_size);
        if pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }
        Ok(Self {
            database: DatabaseConfig {
                url: args
                    .database_url
                    .clone()
                    .or(file.database.url)
                    .unwrap_or(defaults.database.url),
                pool_size,
            },
            sync: SyncConfig {
                batch_mode: args
                    .batch_mode
                    .or(file.sync.batch_mode)
                    .unwrap_or(defaults.sync.batch_mode),
                refetch_after_partial_failure: file
                    .sync
                    .refetch_after_partial_failure
                    .unwrap_or(defaults.sync.refetch_after_partial_failure),
            },
            log_filter: args
                .log_filter
                .clone()
                .or(file.logging.filter)
                .unwrap_or(defaults.log_filter),
        })
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_apply_without_a_file() {
        let config =
            CorkboardConfig::from_toml("", &ConfigArgs::default()).expect("empty file is valid");
        assert_eq!(config, CorkboardConfig::default());
        assert_eq!(config.sync.batch_mode, BatchMode::Concurrent);
        assert!(!config.sync.refetch_after_partial_failure);
    }

    #[rstest]
    fn file_values_fill_in_and_arguments_win() {
        let text = r#"
[database]
url = "postgres://db.internal/kanban"
pool_size = 4

[sync]
batch_mode = "atomic"
refetch_after_partial_failure = true

[logging]
filter = "corkboard=debug"
"#;
        let args = ConfigArgs {
            pool_size: Some(16),
            ..ConfigArgs::default()
        };
        let config = CorkboardConfig::from_toml(text, &args).expect("valid file");

        assert_eq!(config.database.url, "postgres://db.internal/kanban");
        assert_eq!(config.database.pool_size, 16);
        assert_eq!(config.sync.batch_mode, BatchMode::Atomic);
        assert!(config.sync.refetch_after_partial_failure);
        assert_eq!(config.log_filter, "corkboard=debug");
    }

    #[rstest]
    fn unknown_keys_and_empty_pools_are_rejected() {
        let typo = CorkboardConfig::from_toml("[database]\npoolsize = 3\n", &ConfigArgs::default());
        assert!(matches!(typo, Err(ConfigError::ParseToml(_))));

        let empty = CorkboardConfig::from_toml("[database]\npool_size = 0\n", &ConfigArgs::default());
        assert!(matches!(empty, Err(ConfigError::EmptyPool)));
    }

    #[rstest]
    fn missing_explicit_file_is_an_error() {
        let args = ConfigArgs {
            config: Some(PathBuf::from("/nonexistent/corkboard.toml")),
            ..ConfigArgs::default()
        };
        assert!(matches!(
            CorkboardConfig::load(&args),
            Err(ConfigError::ReadFile { .. })
        ));
    }

    #[rstest]
    #[case("atomic", Some(BatchMode::Atomic))]
    #[case(" Concurrent ", Some(BatchMode::Concurrent))]
    #[case("eventually", None)]
    fn batch_mode_flag_parses(#[case] raw: &str, #[case] expected: Option<BatchMode>) {
        assert_eq!(parse_batch_mode(raw).ok(), expected);
    }
}
