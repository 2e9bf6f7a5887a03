//! Application configuration.
//!
//! Settings come from built-in defaults, then `config/default.toml`, then
//! `config/local.toml`, then `PAYMENT_TRACKER_*` environment variables,
//! later sources winning. A handful of single-value overrides
//! (`TRACKER_STORE_PATH`, `TRACKER_SEED_DIR`, `RUST_LOG`) sit on top for
//! quick experiments without editing files.

use anyhow::{anyhow, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];
const REPORT_FORMATS: [&str; 3] = ["txt", "csv", "json"];

/// Application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Embedded store settings
    pub store: StoreConfig,
    /// Seed dataset settings
    pub data: DataConfig,
    /// Logging settings
    pub logging: LoggingConfig,
    /// Backup and report output settings
    pub export: ExportConfig,
}

/// Where the embedded key-value store lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory of the embedded key-value store
    pub path: String,
}

/// Where the bundled seed dataset lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the bundled seed dataset files
    pub seed_directory: String,
}

/// Logging output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level: trace, debug, info, warn, or error
    pub level: String,
    /// Log file path; `None` logs to stderr only
    pub file_path: Option<String>,
    /// Console format, "text" or "json"
    pub format: String,
}

/// Backup and report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory backups and reports are written into
    pub output_directory: String,
    /// Report format used when none is given
    pub default_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                path: "data/tracker_db".to_string(),
            },
            data: DataConfig {
                seed_directory: "data".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                format: "text".to_string(),
            },
            export: ExportConfig {
                output_directory: "./output".to_string(),
                default_format: "txt".to_string(),
            },
        }
    }
}

fn require_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(anyhow!(
            "Invalid {field}: {value}. Must be one of: {allowed:?}"
        ))
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(anyhow!("{field} must not be empty"))
    } else {
        Ok(())
    }
}

impl AppConfig {
    /// Load and validate the configuration from all sources.
    pub fn load() -> Result<Self> {
        let defaults = Config::try_from(&AppConfig::default())
            .map_err(|e| anyhow!("Failed to build default configuration: {}", e))?;

        let merged = Config::builder()
            .add_source(defaults)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("PAYMENT_TRACKER").separator("_"))
            .build()
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

        let loaded: AppConfig = merged
            .try_deserialize()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        require_non_empty("store.path", &self.store.path)?;
        require_non_empty("data.seed_directory", &self.data.seed_directory)?;
        require_non_empty("export.output_directory", &self.export.output_directory)?;

        require_one_of("log level", &self.logging.level, &LOG_LEVELS)?;
        require_one_of("log format", &self.logging.format, &LOG_FORMATS)?;
        require_one_of(
            "export format",
            &self.export.default_format,
            &REPORT_FORMATS,
        )?;

        Ok(())
    }

    /// Store directory, `TRACKER_STORE_PATH` taking precedence.
    pub fn get_store_path(&self) -> String {
        std::env::var("TRACKER_STORE_PATH").unwrap_or_else(|_| self.store.path.clone())
    }

    /// Seed data directory, `TRACKER_SEED_DIR` taking precedence.
    pub fn get_seed_directory(&self) -> String {
        std::env::var("TRACKER_SEED_DIR").unwrap_or_else(|_| self.data.seed_directory.clone())
    }

    /// Log level, `RUST_LOG` taking precedence.
    pub fn get_log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }
}
