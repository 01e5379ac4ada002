//! Writing the result tables to a directory.

use crate::export::{ExportError, ExportFormat, Exporter};
use precinct_analysis::{
    Aggregate, AggregateReport, DeathRateByBorough, HourlyCounts, SeasonalCounts, YearlyByBorough,
};
use precinct_model::Prediction;
use std::path::{Path, PathBuf};
use tracing::info;

/// File stem of the prediction table.
pub const PREDICTIONS: &str = "predictions";

fn write_one<T: serde::Serialize>(
    dir: &Path,
    stem: &str,
    rows: &[T],
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(format!("{stem}.{}", format.extension()));
    rows.export_to_file(&path, format)?;
    info!(path = %path.display(), rows = rows.len(), "table written");
    Ok(path)
}

/// Write the four aggregate tables and the prediction table into `dir`.
///
/// Each file is named after its table (`yearly_by_borough.csv`, ...).
/// `dir` is created if it does not exist. Returns the written paths in
/// table order.
pub fn write_tables(
    dir: &Path,
    report: &AggregateReport,
    predictions: &[Prediction],
    format: ExportFormat,
) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir)?;

    Ok(vec![
        write_one(dir, YearlyByBorough.name(), &report.yearly, format)?,
        write_one(dir, DeathRateByBorough.name(), &report.death_rates, format)?,
        write_one(dir, HourlyCounts.name(), &report.hourly, format)?,
        write_one(dir, SeasonalCounts.name(), &report.seasonal, format)?,
        write_one(dir, PREDICTIONS, predictions, format)?,
    ])
}
