//! Fatality rate per borough.
//!
//! Deaths and shootings are counted independently and combined by borough.
//! The shootings table supplies the key set, so a borough with incidents but
//! no fatalities is reported with zero deaths instead of being dropped.

use super::{Aggregate, rate};
use crate::error::{Result, require};
use polars::prelude::*;
use precinct_data::table::columns::{BORO, MURDER_FLAG};
use serde::{Deserialize, Serialize};

/// Fatalities relative to all shootings in one borough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathRate {
    /// Borough as written in the source.
    pub borough: String,
    /// Incidents whose murder flag is exactly `true`.
    pub deaths: u32,
    /// All incidents.
    pub shootings: u32,
    /// `deaths / shootings`; `None` when there are no shootings.
    pub rate: Option<f64>,
}

/// Computes deaths, shootings and fatality rate for every borough.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeathRateByBorough;

impl Aggregate for DeathRateByBorough {
    type Row = DeathRate;

    fn name(&self) -> &'static str {
        "death_rate_by_borough"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &[BORO, MURDER_FLAG]
    }

    fn compute(&self, data: LazyFrame) -> PolarsResult<LazyFrame> {
        let shootings = data
            .clone()
            .group_by([col(BORO)])
            .agg([len().cast(DataType::UInt32).alias("shootings")]);

        // Null flags compare as null and are filtered out with the falses.
        let deaths = data
            .filter(col(MURDER_FLAG).eq(lit(true)))
            .group_by([col(BORO)])
            .agg([len().cast(DataType::UInt32).alias("deaths")]);

        let result = shootings
            .join(
                deaths,
                [col(BORO)],
                [col(BORO)],
                JoinArgs::new(JoinType::Left),
            )
            .with_column(
                col("deaths")
                    .fill_null(lit(0))
                    .cast(DataType::UInt32)
                    .alias("deaths"),
            )
            .with_column(rate("deaths", "shootings").alias("rate"))
            .sort([BORO], SortMultipleOptions::default())
            .select([col(BORO), col("deaths"), col("shootings"), col("rate")]);

        Ok(result)
    }

    fn extract(&self, frame: &DataFrame) -> Result<Vec<DeathRate>> {
        let boros = frame.column(BORO)?.str()?;
        let deaths = frame.column("deaths")?.u32()?;
        let shootings = frame.column("shootings")?.u32()?;
        let rates = frame.column("rate")?.f64()?;

        (0..frame.height())
            .map(|i| {
                Ok(DeathRate {
                    borough: require(boros.get(i), "boro", i)?.to_string(),
                    deaths: require(deaths.get(i), "deaths", i)?,
                    shootings: require(shootings.get(i), "shootings", i)?,
                    rate: rates.get(i),
                })
            })
            .collect()
    }
}
