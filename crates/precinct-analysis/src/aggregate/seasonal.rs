//! Incident totals and fatality rates per season.

use super::{Aggregate, rate};
use crate::error::{AnalysisError, Result, require};
use polars::prelude::*;
use precinct_data::Season;
use precinct_data::table::columns::{MURDER_FLAG, OCCUR_DATE};
use serde::{Deserialize, Serialize};

/// Totals for one season across all years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalCount {
    /// Season of the occurrence month.
    pub season: Season,
    /// Number of incidents.
    pub total: u32,
    /// Number of incidents whose murder flag is exactly `true`.
    pub fatal: u32,
    /// `fatal / total`; `None` when the season has no incidents.
    pub rate: Option<f64>,
}

/// Groups incidents by the season of their occurrence month.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonalCounts;

/// Month-to-season lookup frame: `[month, season, season_order]`.
fn season_lookup() -> PolarsResult<DataFrame> {
    let months: Vec<i32> = Season::month_table().map(|(m, _)| m as i32).collect();
    let names: Vec<&str> = Season::month_table().map(|(_, s)| s.name()).collect();
    let order: Vec<u32> = Season::month_table().map(|(_, s)| s.ordinal()).collect();

    DataFrame::new(vec![
        Column::new("month".into(), months),
        Column::new("season".into(), names),
        Column::new("season_order".into(), order),
    ])
}

impl Aggregate for SeasonalCounts {
    type Row = SeasonalCount;

    fn name(&self) -> &'static str {
        "seasonal_counts"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &[OCCUR_DATE, MURDER_FLAG]
    }

    fn compute(&self, data: LazyFrame) -> PolarsResult<LazyFrame> {
        let lookup = season_lookup()?;

        let result = data
            .with_column(col(OCCUR_DATE).dt().month().cast(DataType::Int32).alias("month"))
            .join(
                lookup.lazy(),
                [col("month")],
                [col("month")],
                JoinArgs::new(JoinType::Inner),
            )
            .group_by([col("season"), col("season_order")])
            .agg([
                len().cast(DataType::UInt32).alias("total"),
                // Null flags are counted as non-fatal.
                col(MURDER_FLAG)
                    .eq(lit(true))
                    .fill_null(lit(false))
                    .cast(DataType::UInt32)
                    .sum()
                    .cast(DataType::UInt32)
                    .alias("fatal"),
            ])
            .with_column(rate("fatal", "total").alias("rate"))
            .sort(["season_order"], SortMultipleOptions::default())
            .select([col("season"), col("total"), col("fatal"), col("rate")]);

        Ok(result)
    }

    fn extract(&self, frame: &DataFrame) -> Result<Vec<SeasonalCount>> {
        let seasons = frame.column("season")?.str()?;
        let totals = frame.column("total")?.u32()?;
        let fatals = frame.column("fatal")?.u32()?;
        let rates = frame.column("rate")?.f64()?;

        (0..frame.height())
            .map(|i| {
                let name = require(seasons.get(i), "season", i)?;
                let season = Season::from_name(name)
                    .ok_or_else(|| AnalysisError::UnknownSeason(name.to_string()))?;
                Ok(SeasonalCount {
                    season,
                    total: require(totals.get(i), "total", i)?,
                    fatal: require(fatals.get(i), "fatal", i)?,
                    rate: rates.get(i),
                })
            })
            .collect()
    }
}
