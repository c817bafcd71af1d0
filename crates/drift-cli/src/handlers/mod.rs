//! Command handlers
//!
//! Each handler opens a [`BaselineStore`] seeded from a baseline document and
//! drives it through the same actions the edit-baseline screen dispatches.

pub mod export;
pub mod show;

use anyhow::{Context, Result};
use drift_app::config::ConfigError;
use drift_app::drift::FilterError;
use drift_app::{
    Baseline, BaselineAction, BaselineStore, DriftConfig, ErrorCategory, ExportError,
    Permissions, ProjectorError, RequestPhase, UpstreamFetchError,
};
use std::path::Path;

/// Category of the first drift error in `error`'s cause chain.
pub fn error_category(error: &anyhow::Error) -> Option<ErrorCategory> {
    error.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<ProjectorError>() {
            Some(e.category())
        } else if let Some(e) = cause.downcast_ref::<ExportError>() {
            Some(e.category())
        } else if let Some(e) = cause.downcast_ref::<FilterError>() {
            Some(e.category())
        } else if let Some(e) = cause.downcast_ref::<ConfigError>() {
            Some(e.category())
        } else {
            cause.downcast_ref::<UpstreamFetchError>().map(UpstreamFetchError::category)
        }
    })
}

/// Text printed to stderr when a command fails.
pub fn describe_error(error: &anyhow::Error) -> String {
    match error_category(error) {
        Some(category) => format!(
            "{category} error: {error:#}\nhint: {}",
            category.resolution_hint()
        ),
        None => format!("error: {error:#}"),
    }
}

/// Load the config file, apply `DRIFT_*` overrides and validate.
pub fn load_config(path: &Path) -> Result<DriftConfig> {
    let mut config = DriftConfig::load_from_file(path)?;
    config.merge_with_env()?;
    config.validate()?;
    Ok(config)
}

/// Read a baseline JSON document.
pub fn load_baseline(path: &Path) -> Result<Baseline> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read baseline {}", path.display()))?;
    let baseline: Baseline = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse baseline {}", path.display()))?;
    Ok(baseline)
}

/// Open a store with `baseline` loaded, as a completed fetch would.
pub fn open_store(baseline: Baseline, permissions: Permissions) -> Result<BaselineStore> {
    tracing::debug!(baseline = %baseline.id, name = %baseline.display_name, "opening baseline");

    let store = BaselineStore::new(permissions);
    store.dispatch(BaselineAction::FetchBaselineData(RequestPhase::Pending))?;
    store.dispatch(BaselineAction::FetchBaselineData(RequestPhase::Fulfilled(
        baseline,
    )))?;
    Ok(store)
}
