//! Model errors

use crate::design::Predictor;
use thiserror::Error;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while fitting or predicting
#[derive(Debug, Error)]
pub enum ModelError {
    /// Design matrix columns are linearly dependent
    #[error("Rank-deficient design matrix: {} linearly dependent on earlier predictors", names(.predictors))]
    RankDeficient {
        /// Predictors whose columns collapsed, in design order
        predictors: Vec<Predictor>,
    },

    /// Not enough observations for the number of parameters
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations
        required: usize,
        /// Actual number of observations
        actual: usize,
    },

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

fn names(predictors: &[Predictor]) -> String {
    predictors
        .iter()
        .map(|p| p.name())
        .collect::<Vec<_>>()
        .join(", ")
}
