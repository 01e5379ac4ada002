//! Error types for aggregation and feature building.

use polars::prelude::PolarsError;
use precinct_data::DataError;
use thiserror::Error;

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors raised while deriving tables from incidents.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Building the input frame failed
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Polars computation error
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    /// A key or measure that must be present was null
    #[error("Unexpected null in column {column} at row {row}")]
    MissingValue {
        /// Column name
        column: &'static str,
        /// Row index in the computed frame
        row: usize,
    },

    /// A season label that is not one of the four seasons
    #[error("Unknown season: {0}")]
    UnknownSeason(String),
}

/// Unwrap a cell value or report which cell was null.
pub(crate) fn require<T>(value: Option<T>, column: &'static str, row: usize) -> Result<T> {
    value.ok_or(AnalysisError::MissingValue { column, row })
}
