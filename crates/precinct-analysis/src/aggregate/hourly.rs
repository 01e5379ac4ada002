//! Incident counts per hour of day.

use super::Aggregate;
use crate::error::{Result, require};
use polars::prelude::*;
use precinct_data::table::columns::OCCUR_TIME;
use serde::{Deserialize, Serialize};

/// Number of incidents that occurred during one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyCount {
    /// Hour of day, 0-23.
    pub hour: u32,
    /// Number of incidents.
    pub count: u32,
}

/// Groups incidents by the hour of their occurrence time.
///
/// Hours without incidents are absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct HourlyCounts;

impl Aggregate for HourlyCounts {
    type Row = HourlyCount;

    fn name(&self) -> &'static str {
        "hourly_counts"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &[OCCUR_TIME]
    }

    fn compute(&self, data: LazyFrame) -> PolarsResult<LazyFrame> {
        let result = data
            .with_column(col(OCCUR_TIME).dt().hour().cast(DataType::UInt32).alias("hour"))
            .group_by([col("hour")])
            .agg([len().cast(DataType::UInt32).alias("count")])
            .sort(["hour"], SortMultipleOptions::default())
            .select([col("hour"), col("count")]);

        Ok(result)
    }

    fn extract(&self, frame: &DataFrame) -> Result<Vec<HourlyCount>> {
        let hours = frame.column("hour")?.u32()?;
        let counts = frame.column("count")?.u32()?;

        (0..frame.height())
            .map(|i| {
                Ok(HourlyCount {
                    hour: require(hours.get(i), "hour", i)?,
                    count: require(counts.get(i), "count", i)?,
                })
            })
            .collect()
    }
}
