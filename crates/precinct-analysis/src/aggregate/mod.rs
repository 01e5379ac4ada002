//! Grouped summaries of the incident table.
//!
//! Each aggregate turns the incident frame into a small table of one row per
//! distinct grouping key. Groups with no incidents are absent rather than
//! zero-filled; consumers should read absence as zero.

pub mod death_rate;
pub mod hourly;
pub mod seasonal;
pub mod yearly;

pub use death_rate::{DeathRate, DeathRateByBorough};
pub use hourly::{HourlyCount, HourlyCounts};
pub use seasonal::{SeasonalCount, SeasonalCounts};
pub use yearly::{YearlyByBorough, YearlyCount};

use crate::error::Result;
use polars::prelude::*;
use precinct_data::IncidentTable;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A grouped summary over the incident frame.
///
/// `compute` describes the aggregation lazily; `extract` reads the collected
/// result back into typed rows.
pub trait Aggregate {
    /// Typed row produced by this aggregate.
    type Row;

    /// Unique name, also used as the export file stem.
    fn name(&self) -> &'static str;

    /// Columns of the incident frame this aggregate reads.
    fn required_columns(&self) -> &'static [&'static str];

    /// Build the aggregation over the incident frame.
    fn compute(&self, data: LazyFrame) -> PolarsResult<LazyFrame>;

    /// Convert the collected aggregate frame into rows.
    fn extract(&self, frame: &DataFrame) -> Result<Vec<Self::Row>>;

    /// Run the aggregate against an already-built incident frame.
    fn evaluate(&self, frame: &DataFrame) -> Result<Vec<Self::Row>> {
        let result = self.compute(frame.clone().lazy())?.collect()?;
        debug!(aggregate = self.name(), groups = result.height(), "aggregate computed");
        self.extract(&result)
    }

    /// Run the aggregate against an incident table.
    fn rows(&self, table: &IncidentTable) -> Result<Vec<Self::Row>> {
        self.evaluate(&table.to_frame()?)
    }
}

/// `numerator / denominator` as a float, null when the denominator is zero.
pub(crate) fn rate(numerator: &str, denominator: &str) -> Expr {
    when(col(denominator).gt(lit(0)))
        .then(col(numerator).cast(DataType::Float64) / col(denominator).cast(DataType::Float64))
        .otherwise(lit(NULL).cast(DataType::Float64))
}

/// All four aggregate tables for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Incident counts per (borough, year).
    pub yearly: Vec<YearlyCount>,
    /// Deaths, shootings and fatality rate per borough.
    pub death_rates: Vec<DeathRate>,
    /// Incident counts per hour of day.
    pub hourly: Vec<HourlyCount>,
    /// Totals, fatalities and fatality rate per season.
    pub seasonal: Vec<SeasonalCount>,
}

/// Compute all four aggregates from one incident table.
///
/// The incident frame is built once and shared by the four aggregates.
pub fn summarize(table: &IncidentTable) -> Result<AggregateReport> {
    let frame = table.to_frame()?;

    let report = AggregateReport {
        yearly: YearlyByBorough.evaluate(&frame)?,
        death_rates: DeathRateByBorough.evaluate(&frame)?,
        hourly: HourlyCounts.evaluate(&frame)?,
        seasonal: SeasonalCounts.evaluate(&frame)?,
    };

    info!(
        incidents = table.len(),
        yearly_groups = report.yearly.len(),
        boroughs = report.death_rates.len(),
        hours = report.hourly.len(),
        seasons = report.seasonal.len(),
        "aggregates computed"
    );

    Ok(report)
}
