//! The immutable incident table shared by every analysis stage.

use crate::borough::Borough;
use crate::error::Result;
use crate::nypd::parse_incidents;
use chrono::{Datelike, NaiveDate, NaiveTime};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

/// Column names of the frame produced by [`IncidentTable::to_frame`].
pub mod columns {
    /// Occurrence date (`Date`).
    pub const OCCUR_DATE: &str = "occur_date";
    /// Occurrence time of day (`Time`).
    pub const OCCUR_TIME: &str = "occur_time";
    /// Borough name as written in the source (`String`).
    pub const BORO: &str = "boro";
    /// Statistical murder flag (`Boolean`, nullable).
    pub const MURDER_FLAG: &str = "murder_flag";
}

/// A single shooting incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    /// Date of occurrence.
    pub occur_date: NaiveDate,
    /// Time of day of occurrence.
    pub occur_time: NaiveTime,
    /// Borough as written in the source. Values outside the five boroughs
    /// are kept as-is.
    pub borough: String,
    /// Whether the shooting was classified as a murder; `None` when missing.
    pub murder_flag: Option<bool>,
}

impl Incident {
    /// Create a new incident.
    pub fn new(
        occur_date: NaiveDate,
        occur_time: NaiveTime,
        borough: impl Into<String>,
        murder_flag: Option<bool>,
    ) -> Self {
        Self {
            occur_date,
            occur_time,
            borough: borough.into(),
            murder_flag,
        }
    }

    /// The borough, if it is one of the five known boroughs.
    pub fn known_borough(&self) -> Option<Borough> {
        Borough::from_name(&self.borough)
    }

    /// True only when the flag is present and set.
    pub const fn is_fatal(&self) -> bool {
        matches!(self.murder_flag, Some(true))
    }
}

/// Read-only snapshot of the loaded dataset.
///
/// Every component takes the table by shared reference and builds new
/// tables from it; nothing mutates the rows after loading.
#[derive(Debug, Clone, Default)]
pub struct IncidentTable {
    incidents: Vec<Incident>,
}

impl IncidentTable {
    /// Wrap already-typed incidents.
    pub const fn new(incidents: Vec<Incident>) -> Self {
        Self { incidents }
    }

    /// Parse a table from CSV text.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let incidents = parse_incidents(reader)?;
        info!(rows = incidents.len(), "loaded incident table");
        Ok(Self::new(incidents))
    }

    /// Parse a table from a CSV file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Number of incidents.
    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    /// True if the table holds no incidents.
    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// All incidents in source order.
    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    /// Distinct borough values present, sorted.
    pub fn boroughs(&self) -> Vec<String> {
        let mut boroughs: Vec<String> = self.incidents.iter().map(|i| i.borough.clone()).collect();
        boroughs.sort();
        boroughs.dedup();
        boroughs
    }

    /// First and last calendar year present, or `None` for an empty table.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let years = self.incidents.iter().map(|i| i.occur_date.year());
        let min = years.clone().min()?;
        let max = years.max()?;
        Some((min, max))
    }

    /// Build a polars frame with columns
    /// `[occur_date, occur_time, boro, murder_flag]`.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let dates: Vec<NaiveDate> = self.incidents.iter().map(|i| i.occur_date).collect();
        let times: Vec<NaiveTime> = self.incidents.iter().map(|i| i.occur_time).collect();
        let boros: Vec<&str> = self.incidents.iter().map(|i| i.borough.as_str()).collect();
        let flags: Vec<Option<bool>> = self.incidents.iter().map(|i| i.murder_flag).collect();

        let df = DataFrame::new(vec![
            Column::new(columns::OCCUR_DATE.into(), dates),
            Column::new(columns::OCCUR_TIME.into(), times),
            Column::new(columns::BORO.into(), boros),
            Column::new(columns::MURDER_FLAG.into(), flags),
        ])?;

        Ok(df)
    }
}

impl From<Vec<Incident>> for IncidentTable {
    fn from(incidents: Vec<Incident>) -> Self {
        Self::new(incidents)
    }
}
