#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod borough;
pub mod error;
pub mod nypd;
pub mod season;
pub mod table;

pub use borough::Borough;
pub use error::{DataError, Result};
pub use season::Season;
pub use table::{Incident, IncidentTable};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
