#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod design;
pub mod error;
mod linalg;
pub mod ols;
pub mod predict;

// Re-export main types
pub use design::{DesignMatrix, Predictor};
pub use error::{ModelError, Result};
pub use ols::{Coefficient, FittedModel, OlsRegression};
pub use predict::{Prediction, PredictionRequest};
