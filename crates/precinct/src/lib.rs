#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod pipeline;

// Re-export main types from sub-crates
pub use precinct_analysis as analysis;
pub use precinct_data as data;
pub use precinct_model as model;
pub use precinct_output as output;

// Re-export the shared vocabulary
pub use precinct_data::{Borough, Season};

pub use pipeline::{PipelineConfig, PipelineError, PipelineOutput, Source};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
