//! NYPD Shooting Incident Data (Historic) from NYC Open Data.
//!
//! The dataset is published at <https://data.cityofnewyork.us/d/833y-fsy8> and
//! exported as CSV with one row per shooting incident.

pub mod client;
pub mod parse;

pub use client::{DEFAULT_SOURCE_URL, FetchConfig, NypdClient};
pub use parse::{REQUIRED_COLUMNS, parse_incidents};
