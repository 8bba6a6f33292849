//! Exports for downstream tools.
//!
//! - fit summary as JSON (coefficients, intercept, R²)
//! - selected time series as CSV, easy to consume in spreadsheets or plotting scripts

use std::fs::File;
use std::path::Path;

use crate::domain::Column;
use crate::error::{Result, StatsError};
use crate::fit::FitSummary;

/// Write a fit summary JSON file.
pub fn write_summary_json(path: &Path, summary: &FitSummary) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| StatsError::Export(format!("Failed to create '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| StatsError::Export(format!("Failed to write summary JSON: {e}")))
}

/// Write two aligned columns as CSV; missing values are written as empty fields.
pub fn write_series_csv(path: &Path, x: &Column, y: &Column) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| StatsError::Export(format!("Failed to create '{}': {e}", path.display())))?;

    writer
        .write_record([x.name.as_str(), y.name.as_str()])
        .map_err(|e| StatsError::Export(format!("Failed to write CSV header: {e}")))?;
    for (label, value) in x.values.iter().zip(&y.values) {
        writer
            .write_record([label.to_string(), value.to_string()])
            .map_err(|e| StatsError::Export(format!("Failed to write CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| StatsError::Export(format!("Failed to flush CSV: {e}")))
}
