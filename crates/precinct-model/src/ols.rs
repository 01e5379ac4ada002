//! Ordinary least squares
//!
//! Solves the normal equations `X^T X b = X^T y` by Cholesky factorisation.
//! Standard errors come from `sigma^2 (X^T X)^-1` where `sigma^2` is the
//! residual variance with `n - p` degrees of freedom.

use crate::design::{DesignMatrix, Predictor};
use crate::error::{ModelError, Result};
use crate::linalg::Cholesky;
use ndarray::{Array1, Array2};
use precinct_analysis::FeatureRow;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One fitted coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    /// Design column
    pub predictor: Predictor,
    /// Least-squares estimate
    pub estimate: f64,
    /// Standard error of the estimate
    pub std_error: f64,
    /// `estimate / std_error`; `None` when the standard error is zero
    pub t_statistic: Option<f64>,
}

/// OLS estimator configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OlsRegression {
    /// Relative pivot threshold below which a column counts as dependent
    pub tolerance: f64,
}

impl Default for OlsRegression {
    fn default() -> Self {
        Self { tolerance: 1e-10 }
    }
}

impl OlsRegression {
    /// Create an estimator with a custom rank tolerance
    pub fn with_tolerance(tolerance: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&tolerance) {
            return Err(ModelError::InvalidParameter(format!(
                "tolerance must be in [0, 1), got {tolerance}"
            )));
        }
        Ok(Self { tolerance })
    }

    /// Fit incident count on the fixed predictor set.
    ///
    /// # Errors
    /// * [`ModelError::InsufficientData`] when there are not more rows than
    ///   parameters
    /// * [`ModelError::RankDeficient`] when design columns are linearly
    ///   dependent; no coefficients are produced
    pub fn fit(&self, rows: &[FeatureRow]) -> Result<FittedModel> {
        self.fit_design(&DesignMatrix::from_features(rows))
    }

    /// Fit a prebuilt design matrix.
    pub fn fit_design(&self, design: &DesignMatrix) -> Result<FittedModel> {
        let (n, p) = design.x.dim();
        if p != Predictor::COUNT {
            return Err(ModelError::DimensionMismatch {
                expected: Predictor::COUNT,
                actual: p,
            });
        }
        if design.y.len() != n {
            return Err(ModelError::DimensionMismatch {
                expected: n,
                actual: design.y.len(),
            });
        }
        if n <= p {
            return Err(ModelError::InsufficientData {
                required: p + 1,
                actual: n,
            });
        }

        let xtx = design.x.t().dot(&design.x);
        let xty = design.x.t().dot(&design.y);

        let chol = Cholesky::factorize(&xtx, self.tolerance).map_err(|columns| {
            ModelError::RankDeficient {
                predictors: columns.into_iter().map(|j| Predictor::ALL[j]).collect(),
            }
        })?;

        let beta = chol.solve(&xty);
        let xtx_inv = chol.inverse();

        let residuals = &design.y - &design.x.dot(&beta);
        let ssr = residuals.dot(&residuals);
        let df_residual = n - p;
        let residual_variance = ssr / df_residual as f64;

        let mean = design.y.sum() / n as f64;
        let sst: f64 = design.y.iter().map(|v| (v - mean).powi(2)).sum();
        let (r_squared, adj_r_squared) = if sst > 0.0 {
            let r2 = 1.0 - ssr / sst;
            let adj = 1.0 - (1.0 - r2) * (n - 1) as f64 / df_residual as f64;
            (Some(r2), Some(adj))
        } else {
            (None, None)
        };

        let coefficients: Vec<Coefficient> = Predictor::ALL
            .iter()
            .enumerate()
            .map(|(j, &predictor)| {
                let std_error = (residual_variance * xtx_inv[[j, j]]).max(0.0).sqrt();
                let t_statistic = (std_error > 0.0).then(|| beta[j] / std_error);
                Coefficient {
                    predictor,
                    estimate: beta[j],
                    std_error,
                    t_statistic,
                }
            })
            .collect();

        for c in &coefficients {
            debug!(
                predictor = c.predictor.name(),
                estimate = c.estimate,
                std_error = c.std_error,
                "coefficient"
            );
        }
        info!(
            observations = n,
            df_residual,
            residual_variance,
            r_squared = ?r_squared,
            "model fitted"
        );

        Ok(FittedModel {
            coefficients,
            xtx_inv,
            residual_variance,
            r_squared,
            adj_r_squared,
            n_observations: n,
            df_residual,
        })
    }
}

/// Result of a successful fit. Immutable once built.
#[derive(Debug, Clone)]
pub struct FittedModel {
    coefficients: Vec<Coefficient>,
    xtx_inv: Array2<f64>,
    residual_variance: f64,
    r_squared: Option<f64>,
    adj_r_squared: Option<f64>,
    n_observations: usize,
    df_residual: usize,
}

impl FittedModel {
    /// Coefficients in [`Predictor::ALL`] order.
    pub fn coefficients(&self) -> &[Coefficient] {
        &self.coefficients
    }

    /// Coefficient for one predictor.
    pub fn coefficient(&self, predictor: Predictor) -> &Coefficient {
        &self.coefficients[predictor.index()]
    }

    /// Estimates as a vector, in design order.
    pub fn estimates(&self) -> Array1<f64> {
        self.coefficients.iter().map(|c| c.estimate).collect()
    }

    /// Residual variance `SSR / (n - p)`.
    pub const fn residual_variance(&self) -> f64 {
        self.residual_variance
    }

    /// Residual standard error.
    pub fn residual_std_error(&self) -> f64 {
        self.residual_variance.sqrt()
    }

    /// Coefficient of determination; `None` when the response is constant.
    pub const fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }

    /// Adjusted R²; `None` when the response is constant.
    pub const fn adj_r_squared(&self) -> Option<f64> {
        self.adj_r_squared
    }

    /// Number of observations used in the fit.
    pub const fn n_observations(&self) -> usize {
        self.n_observations
    }

    /// Residual degrees of freedom `n - p`.
    pub const fn df_residual(&self) -> usize {
        self.df_residual
    }

    /// Leverage-style quadratic form `x0^T (X^T X)^-1 x0`.
    pub(crate) fn leverage(&self, x0: &Array1<f64>) -> f64 {
        x0.dot(&self.xtx_inv.dot(x0))
    }
}
