//! Design matrix construction.
//!
//! Column order is fixed by [`Predictor::ALL`]. Year and month enter as raw
//! integers, so the year coefficient is the change per calendar year and the
//! month coefficient treats month-of-year as a linear (not cyclic) effect.

use ndarray::{Array1, Array2};
use precinct_analysis::FeatureRow;
use precinct_data::Borough;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A column of the design matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Predictor {
    /// Constant term
    Intercept,
    /// Calendar year
    Year,
    /// Month of year, 1-12
    Month,
    /// Borough is BRONX
    IsBronx,
    /// Borough is BROOKLYN
    IsBrooklyn,
    /// Borough is MANHATTAN
    IsManhattan,
    /// Borough is QUEENS
    IsQueens,
}

impl Predictor {
    /// All predictors in design-matrix column order.
    pub const ALL: [Self; 7] = [
        Self::Intercept,
        Self::Year,
        Self::Month,
        Self::IsBronx,
        Self::IsBrooklyn,
        Self::IsManhattan,
        Self::IsQueens,
    ];

    /// Number of design columns.
    pub const COUNT: usize = Self::ALL.len();

    /// Column name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Intercept => "intercept",
            Self::Year => "year",
            Self::Month => "month",
            Self::IsBronx => "is_bronx",
            Self::IsBrooklyn => "is_brooklyn",
            Self::IsManhattan => "is_manhattan",
            Self::IsQueens => "is_queens",
        }
    }

    /// Position of this predictor in the design matrix.
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Predictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn row_vector(year: i32, month: u32, indicators: [bool; 4]) -> [f64; Predictor::COUNT] {
    let flag = |b: bool| if b { 1.0 } else { 0.0 };
    [
        1.0,
        f64::from(year),
        f64::from(month),
        flag(indicators[0]),
        flag(indicators[1]),
        flag(indicators[2]),
        flag(indicators[3]),
    ]
}

/// Regressors and response for one fit.
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    /// Regressors (n x [`Predictor::COUNT`])
    pub x: Array2<f64>,
    /// Incident counts (n)
    pub y: Array1<f64>,
}

impl DesignMatrix {
    /// Build the design matrix from feature rows, in row order.
    pub fn from_features(rows: &[FeatureRow]) -> Self {
        let mut x = Array2::<f64>::zeros((rows.len(), Predictor::COUNT));
        let mut y = Array1::<f64>::zeros(rows.len());

        for (i, row) in rows.iter().enumerate() {
            let values = row_vector(row.year, row.month, row.indicators());
            for (j, value) in values.into_iter().enumerate() {
                x[[i, j]] = value;
            }
            y[i] = f64::from(row.count);
        }

        Self { x, y }
    }

    /// Encode a single (year, month, borough) as a design row.
    ///
    /// Uses the same indicator rule as the feature table, so an unrecognised
    /// borough encodes as the baseline.
    pub fn encode(year: i32, month: u32, borough: &str) -> Array1<f64> {
        Array1::from(row_vector(year, month, Borough::indicators_for(borough)).to_vec())
    }

    /// Number of observations.
    pub fn n_observations(&self) -> usize {
        self.x.nrows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ols::test_support::feature;

    #[test]
    fn test_predictor_order() {
        for (i, predictor) in Predictor::ALL.iter().enumerate() {
            assert_eq!(predictor.index(), i);
        }
        assert_eq!(Predictor::IsBronx.name(), Borough::Bronx.indicator_column().unwrap());
        assert_eq!(Predictor::IsQueens.name(), Borough::Queens.indicator_column().unwrap());
    }

    #[test]
    fn test_from_features() {
        let rows = vec![feature(2020, 1, "BRONX", 2), feature(2021, 6, "STATEN ISLAND", 5)];
        let design = DesignMatrix::from_features(&rows);

        assert_eq!(design.x.dim(), (2, 7));
        assert_eq!(design.x.row(0).to_vec(), vec![1.0, 2020.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(design.x.row(1).to_vec(), vec![1.0, 2021.0, 6.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(design.y.to_vec(), vec![2.0, 5.0]);
    }

    #[test]
    fn test_encode_matches_feature_rows() {
        for borough in ["BRONX", "BROOKLYN", "MANHATTAN", "QUEENS", "STATEN ISLAND", "?"] {
            let design = DesignMatrix::from_features(&[feature(2019, 11, borough, 0)]);
            assert_eq!(design.x.row(0), DesignMatrix::encode(2019, 11, borough));
        }
    }
}
