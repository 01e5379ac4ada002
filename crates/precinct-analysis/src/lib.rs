#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod error;
pub mod features;
pub mod registry;

pub use aggregate::{
    Aggregate, AggregateReport, DeathRate, DeathRateByBorough, HourlyCount, HourlyCounts,
    SeasonalCount, SeasonalCounts, YearlyByBorough, YearlyCount, summarize,
};
pub use error::{AnalysisError, Result};
pub use features::{FeatureRow, FeatureTable, build_features};
pub use registry::{AggregateInfo, available_aggregates, get_aggregate_info};
