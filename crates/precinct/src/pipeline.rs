//! End-to-end pipeline.
//!
//! Loader, aggregates, features, fit, forecast, export. The only step that
//! waits on anything external is the initial load.

use precinct_analysis::{AggregateReport, AnalysisError, FeatureTable, build_features, summarize};
use precinct_data::nypd::{DEFAULT_SOURCE_URL, FetchConfig, NypdClient};
use precinct_data::{Borough, DataError, IncidentTable};
use precinct_model::{FittedModel, ModelError, OlsRegression, Prediction, PredictionRequest};
use precinct_output::{ExportError, ExportFormat, write_tables};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors from any pipeline stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Loading failed
    #[error(transparent)]
    Data(#[from] DataError),

    /// Aggregation or feature building failed
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Fitting or prediction failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Writing tables failed
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Where incidents are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Download the CSV export from a URL.
    Url(String),
    /// Read a local CSV export.
    File(PathBuf),
}

impl Default for Source {
    fn default() -> Self {
        Self::Url(DEFAULT_SOURCE_URL.to_string())
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Incident source
    pub source: Source,
    /// Directory for exported tables
    pub out_dir: PathBuf,
    /// Export format
    pub format: ExportFormat,
    /// Number of calendar years to forecast after the last observed year
    pub forecast_years: u32,
    /// Prediction interval level, `None` for point predictions only
    pub interval: Option<f64>,
    /// Download timeout in seconds
    pub timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: Source::default(),
            out_dir: PathBuf::from("output"),
            format: ExportFormat::Csv,
            forecast_years: 1,
            interval: Some(0.95),
            timeout_secs: FetchConfig::default().timeout_secs,
        }
    }
}

/// Everything computed from one incident table.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The four aggregate tables
    pub report: AggregateReport,
    /// Regression features
    pub features: FeatureTable,
    /// Fitted model
    pub model: FittedModel,
    /// Forecast for every month of the forecast years, all five boroughs
    pub predictions: Vec<Prediction>,
}

/// Load the incident table from the configured source.
pub async fn load(config: &PipelineConfig) -> Result<IncidentTable> {
    let table = match &config.source {
        Source::File(path) => {
            info!(path = %path.display(), "reading incidents from file");
            IncidentTable::from_path(path)?
        }
        Source::Url(url) => {
            let fetch = FetchConfig {
                url: url.clone(),
                timeout_secs: config.timeout_secs,
            };
            NypdClient::with_config(&fetch)?.fetch_table().await?
        }
    };
    info!(incidents = table.len(), years = ?table.year_range(), "incidents loaded");
    Ok(table)
}

/// Years after the last observed year, `horizon` of them.
pub fn forecast_years(table: &IncidentTable, horizon: u32) -> Vec<i32> {
    let Some((_, last)) = table.year_range() else {
        return Vec::new();
    };
    (1..=horizon as i32).map(|k| last + k).collect()
}

/// Aggregate, build features, fit and forecast.
pub fn analyze(table: &IncidentTable, config: &PipelineConfig) -> Result<PipelineOutput> {
    let report = summarize(table)?;
    let features = build_features(table)?;
    let model = OlsRegression::default().fit(features.rows())?;

    let requests = PredictionRequest::grid(
        forecast_years(table, config.forecast_years),
        &Borough::all(),
    );
    let predictions = model.predict(&requests, config.interval)?;
    info!(predictions = predictions.len(), "forecast computed");

    Ok(PipelineOutput {
        report,
        features,
        model,
        predictions,
    })
}

/// Write the aggregate and prediction tables.
pub fn export(output: &PipelineOutput, out_dir: &Path, format: ExportFormat) -> Result<Vec<PathBuf>> {
    Ok(write_tables(out_dir, &output.report, &output.predictions, format)?)
}

/// Run load, analysis and export.
pub async fn run(config: &PipelineConfig) -> Result<PipelineOutput> {
    let table = load(config).await?;
    let output = analyze(&table, config)?;
    export(&output, &config.out_dir, config.format)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use precinct_data::Incident;

    fn incident(year: i32) -> Incident {
        Incident::new(
            NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            "BRONX",
            None,
        )
    }

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.source, Source::Url(DEFAULT_SOURCE_URL.to_string()));
        assert_eq!(config.forecast_years, 1);
        assert_eq!(config.interval, Some(0.95));
        assert_eq!(config.format, ExportFormat::Csv);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"source": {"file": "shootings.csv"}, "format": "json"}"#).unwrap();
        assert_eq!(config.source, Source::File(PathBuf::from("shootings.csv")));
        assert_eq!(config.format, ExportFormat::Json);
        assert_eq!(config.forecast_years, 1);
    }

    #[test]
    fn test_forecast_years_follow_last_year() {
        let table = IncidentTable::new(vec![incident(2019), incident(2022), incident(2020)]);
        assert_eq!(forecast_years(&table, 2), vec![2023, 2024]);
        assert!(forecast_years(&table, 0).is_empty());
        assert!(forecast_years(&IncidentTable::default(), 3).is_empty());
    }

    #[test]
    fn test_empty_table_cannot_be_modelled() {
        let err = analyze(&IncidentTable::default(), &PipelineConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Model(ModelError::InsufficientData { .. })
        ));
    }
}
