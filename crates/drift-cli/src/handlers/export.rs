//! Export Command Handler

use super::{load_baseline, open_store};
use anyhow::{Context, Result};
use drift_app::{DriftConfig, ExportError, ExportFormat, Fact, FactExporter, Permissions};
use std::path::Path;

/// Renders facts as pretty-printed JSON. CSV is left to richer frontends.
pub struct JsonExporter;

impl FactExporter for JsonExporter {
    fn export(&self, format: ExportFormat, facts: &[Fact]) -> Result<String, ExportError> {
        match format {
            ExportFormat::Json => {
                serde_json::to_string_pretty(facts).map_err(|e| ExportError::Failed(e.to_string()))
            }
            ExportFormat::Csv => Err(ExportError::Unsupported(format)),
        }
    }
}

/// Export the baseline at `baseline` to `output`, or stdout when absent.
pub fn run(
    config: &DriftConfig,
    baseline: &Path,
    format: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let format = match format {
        Some(name) => name.parse::<ExportFormat>()?,
        None => config.export.default_format,
    };

    let store = open_store(load_baseline(baseline)?, Permissions::READ_ONLY)?;
    let document = store.export(format, &JsonExporter)?;

    match output {
        Some(path) => {
            std::fs::write(path, &document)
                .with_context(|| format!("Failed to write export to {}", path.display()))?;
            tracing::info!(%format, path = %path.display(), "baseline exported");
        }
        None => println!("{document}"),
    }

    Ok(())
}
