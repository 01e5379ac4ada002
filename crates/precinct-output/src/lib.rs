#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod summary;
pub mod tables;

pub use export::{ExportError, ExportFormat, Exporter};
pub use summary::{AggregateSummary, ModelSummary};
pub use tables::{PREDICTIONS, write_tables};
