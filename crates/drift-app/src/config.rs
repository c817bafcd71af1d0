//! # Drift Configuration
//!
//! Frontend-facing settings loaded from TOML. Every key is optional; a
//! missing file yields the defaults.
//!
//! ```toml
//! [table]
//! loading_rows = 8
//! per_page = 50
//!
//! [messages]
//! empty_baseline_title = "No facts"
//!
//! [export]
//! default_format = "json"
//! ```

use crate::drift::DEFAULT_PER_PAGE;
use crate::errors::ErrorCategory;
use crate::export::ExportFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding `table.per_page`.
pub const ENV_PER_PAGE: &str = "DRIFT_PER_PAGE";
/// Environment variable overriding `table.loading_rows`.
pub const ENV_LOADING_ROWS: &str = "DRIFT_LOADING_ROWS";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// TOML decode error
        #[source]
        source: toml::de::Error,
    },

    /// An environment override is not a number
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidEnv {
        /// Variable name
        var: &'static str,
        /// Rejected value
        value: String,
    },

    /// A value is out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Category used for frontend routing.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Config
    }
}

/// Fact table settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Skeleton rows shown while loading
    pub loading_rows: usize,
    /// Rows per comparison page
    pub per_page: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            loading_rows: 8,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// User-facing copy for empty and error states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Title of the empty-baseline placeholder
    pub empty_baseline_title: String,
    /// Body of the empty-baseline placeholder
    pub empty_baseline_message: String,
    /// Body of the fetch-error placeholder
    pub fetch_error: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            empty_baseline_title: "No facts".to_string(),
            empty_baseline_message: "This baseline has no facts. Add a fact to get started."
                .to_string(),
            fetch_error: "The baseline cannot be displayed at this time. Please retry and if \
                          the problem persists contact your system administrator."
                .to_string(),
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Format used when none is requested
    pub default_format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: ExportFormat::Json,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Fact table settings
    pub table: TableConfig,
    /// Placeholder copy
    pub messages: MessagesConfig,
    /// Export settings
    pub export: ExportConfig,
}

impl DriftConfig {
    /// Load configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply `DRIFT_*` overrides from the process environment.
    pub fn merge_with_env(&mut self) -> Result<(), ConfigError> {
        self.merge_with_vars(|var| std::env::var(var).ok())
    }

    /// Apply `DRIFT_*` overrides read through `lookup`.
    pub fn merge_with_vars(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup(ENV_PER_PAGE) {
            self.table.per_page = parse_positive(ENV_PER_PAGE, value)?;
        }
        if let Some(value) = lookup(ENV_LOADING_ROWS) {
            self.table.loading_rows = parse_positive(ENV_LOADING_ROWS, value)?;
        }
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table.per_page == 0 {
            return Err(ConfigError::Invalid("table.per_page must be at least 1".into()));
        }
        if self.table.loading_rows == 0 {
            return Err(ConfigError::Invalid(
                "table.loading_rows must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn parse_positive(var: &'static str, value: String) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidEnv { var, value }),
    }
}
