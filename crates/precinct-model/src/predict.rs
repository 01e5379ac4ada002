//! Predictions from a fitted model.

use crate::design::DesignMatrix;
use crate::error::{ModelError, Result};
use crate::ols::FittedModel;
use precinct_data::Borough;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::debug;

/// A (year, month, borough) to predict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Calendar year
    pub year: i32,
    /// Month of year, 1-12
    pub month: u32,
    /// Borough name as written in the source
    pub borough: String,
}

impl PredictionRequest {
    /// Create a request.
    pub fn new(year: i32, month: u32, borough: impl Into<String>) -> Self {
        Self {
            year,
            month,
            borough: borough.into(),
        }
    }

    /// Every month of every year for each borough, ordered by
    /// (year, month, borough order given).
    pub fn grid(years: impl IntoIterator<Item = i32>, boroughs: &[Borough]) -> Vec<Self> {
        years
            .into_iter()
            .flat_map(|year| {
                (1..=12).flat_map(move |month| {
                    boroughs
                        .iter()
                        .map(move |b| Self::new(year, month, b.name()))
                })
            })
            .collect()
    }
}

/// Predicted incident count for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Calendar year
    pub year: i32,
    /// Month of year
    pub month: u32,
    /// Borough name
    pub borough: String,
    /// Point prediction
    pub predicted: f64,
    /// Lower prediction bound, when an interval was requested
    pub lower: Option<f64>,
    /// Upper prediction bound, when an interval was requested
    pub upper: Option<f64>,
}

impl FittedModel {
    /// Predict each request with the fitted coefficients.
    ///
    /// With `level = Some(c)` each prediction carries a two-sided interval
    /// `y0 ± t(1 - (1 - c)/2, n - p) * sqrt(sigma^2 * (1 + x0^T (X^T X)^-1 x0))`.
    ///
    /// # Errors
    /// [`ModelError::InvalidParameter`] when `level` is not strictly between
    /// 0 and 1.
    pub fn predict(&self, requests: &[PredictionRequest], level: Option<f64>) -> Result<Vec<Prediction>> {
        let quantile = level.map(|c| self.t_quantile(c)).transpose()?;
        let beta = self.estimates();

        let predictions: Vec<Prediction> = requests
            .iter()
            .map(|req| {
                let x0 = DesignMatrix::encode(req.year, req.month, &req.borough);
                let predicted = x0.dot(&beta);
                let half_width = quantile.map(|t| {
                    t * (self.residual_variance() * (1.0 + self.leverage(&x0))).sqrt()
                });
                Prediction {
                    year: req.year,
                    month: req.month,
                    borough: req.borough.clone(),
                    predicted,
                    lower: half_width.map(|h| predicted - h),
                    upper: half_width.map(|h| predicted + h),
                }
            })
            .collect();

        debug!(requests = requests.len(), ?level, "predictions computed");
        Ok(predictions)
    }

    fn t_quantile(&self, level: f64) -> Result<f64> {
        if !(level > 0.0 && level < 1.0) {
            return Err(ModelError::InvalidParameter(format!(
                "interval level must be in (0, 1), got {level}"
            )));
        }
        let dist = StudentsT::new(0.0, 1.0, self.df_residual() as f64)
            .map_err(|e| ModelError::InvalidParameter(e.to_string()))?;
        Ok(dist.inverse_cdf(1.0 - (1.0 - level) / 2.0))
    }
}
