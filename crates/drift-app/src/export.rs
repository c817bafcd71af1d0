//! # Export Seam
//!
//! Exports receive the full fact list. The output format belongs to the
//! implementor; the core only tracks whether an export is in flight.

use crate::errors::ErrorCategory;
use crate::facts::Fact;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values
    Csv,
    /// JSON document
    Json,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Export progress as shown by the toolbar's export dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportStatus {
    /// No export requested
    #[default]
    Idle,
    /// Export in progress
    Pending(ExportFormat),
    /// Last export finished
    Fulfilled(ExportFormat),
    /// Last export failed
    Rejected(ExportFormat),
}

/// Export failures.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ExportError {
    /// Format name not recognized
    #[error("unknown export format '{0}'")]
    UnknownFormat(String),

    /// The exporter does not produce this format
    #[error("{0} export is not supported by this exporter")]
    Unsupported(ExportFormat),

    /// The exporter failed while writing output
    #[error("export failed: {0}")]
    Failed(String),
}

impl ExportError {
    /// Category used for frontend routing.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownFormat(_) | Self::Unsupported(_) => ErrorCategory::Input,
            Self::Failed(_) => ErrorCategory::Network,
        }
    }
}

/// Turns the full fact list into an export document.
pub trait FactExporter {
    /// Render `facts` as `format`.
    fn export(&self, format: ExportFormat, facts: &[Fact]) -> Result<String, ExportError>;
}
