//! Export of result tables.
//!
//! Any slice of serializable rows can be written as CSV (one header row,
//! then one line per row) or JSON (an array of objects). Missing values
//! such as an undefined rate become empty CSV cells and JSON `null`.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer produced bytes that are not UTF-8.
    #[error("Encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Comma-separated values format.
    #[default]
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl<T: Serialize> Exporter for [T] {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for record in self {
                    wtr.serialize(record)?;
                }
                let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
                Ok(String::from_utf8(bytes)?)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use precinct_analysis::{DeathRate, HourlyCount, SeasonalCount};
    use precinct_data::Season;
    use rstest::rstest;

    fn death_rates() -> Vec<DeathRate> {
        vec![
            DeathRate {
                borough: "BRONX".to_string(),
                deaths: 1,
                shootings: 2,
                rate: Some(0.5),
            },
            DeathRate {
                borough: "STATEN ISLAND".to_string(),
                deaths: 0,
                shootings: 0,
                rate: None,
            },
        ]
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let csv = death_rates().export_to_string(ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "borough,deaths,shootings,rate");
        assert_eq!(lines[1], "BRONX,1,2,0.5");
        assert_eq!(lines[2], "STATEN ISLAND,0,0,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_json_keeps_missing_rate_as_null() {
        let json = death_rates().export_to_string(ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["rate"], 0.5);
        assert!(value[1]["rate"].is_null());
    }

    #[test]
    fn test_pretty_json_is_indented() {
        let rows = vec![HourlyCount { hour: 2, count: 2 }];
        let json = rows.export_to_string(ExportFormat::PrettyJson).unwrap();
        assert!(json.contains("\n  "));
        assert!(json.contains("\"hour\": 2"));
    }

    #[test]
    fn test_season_serializes_by_name() {
        let rows = vec![SeasonalCount {
            season: Season::Winter,
            total: 2,
            fatal: 1,
            rate: Some(0.5),
        }];
        let csv = rows.export_to_string(ExportFormat::Csv).unwrap();
        assert!(csv.contains("Winter,2,1,0.5"));
    }

    #[test]
    fn test_empty_table_exports_empty() {
        let rows: Vec<HourlyCount> = Vec::new();
        assert_eq!(rows.export_to_string(ExportFormat::Csv).unwrap(), "");
        assert_eq!(rows.export_to_string(ExportFormat::Json).unwrap(), "[]");
    }

    #[rstest]
    #[case("csv", ExportFormat::Csv)]
    #[case("JSON", ExportFormat::Json)]
    #[case("pretty-json", ExportFormat::PrettyJson)]
    fn test_format_from_str(#[case] input: &str, #[case] expected: ExportFormat) {
        assert_eq!(input.parse::<ExportFormat>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_format() {
        assert!(matches!(
            "xlsx".parse::<ExportFormat>(),
            Err(ExportError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_extensions() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }
}
