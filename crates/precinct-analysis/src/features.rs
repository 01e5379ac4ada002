//! Regression features.
//!
//! Collapses incidents into one row per observed (year, month, borough)
//! triple with the incident count as the response, and one-hot encodes the
//! borough against [`Borough::INDICATORS`]. The baseline borough, and any
//! borough name outside the known five, has every indicator false.

use crate::error::{Result, require};
use polars::prelude::*;
use precinct_data::table::columns::{BORO, OCCUR_DATE};
use precinct_data::{Borough, IncidentTable};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Count column in the feature frame.
pub const COUNT: &str = "count";

/// One observation for the regression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Borough as written in the source.
    pub borough: String,
    /// Borough is `BRONX`.
    pub is_bronx: bool,
    /// Borough is `BROOKLYN`.
    pub is_brooklyn: bool,
    /// Borough is `MANHATTAN`.
    pub is_manhattan: bool,
    /// Borough is `QUEENS`.
    pub is_queens: bool,
    /// Incidents in this (year, month, borough).
    pub count: u32,
}

impl FeatureRow {
    /// Indicator values in [`Borough::INDICATORS`] order.
    pub const fn indicators(&self) -> [bool; 4] {
        [self.is_bronx, self.is_brooklyn, self.is_manhattan, self.is_queens]
    }
}

/// Feature rows together with the frame they were read from.
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    frame: DataFrame,
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    /// Rows sorted by (year, month, borough).
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Frame with columns `[year, month, boro, is_bronx, is_brooklyn,
    /// is_manhattan, is_queens, count]`.
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no observations.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn indicator_columns() -> impl Iterator<Item = (Borough, &'static str)> {
    Borough::INDICATORS
        .into_iter()
        .filter_map(|b| b.indicator_column().map(|name| (b, name)))
}

/// Group incidents by (year, month, borough) and attach indicator columns.
///
/// Triples with no incidents are not emitted.
pub fn build_features(table: &IncidentTable) -> Result<FeatureTable> {
    let mut lf = table
        .to_frame()?
        .lazy()
        .with_columns([
            col(OCCUR_DATE).dt().year().cast(DataType::Int32).alias("year"),
            col(OCCUR_DATE).dt().month().cast(DataType::UInt32).alias("month"),
        ])
        .group_by([col("year"), col("month"), col(BORO)])
        .agg([len().cast(DataType::UInt32).alias(COUNT)]);

    for (borough, column) in indicator_columns() {
        lf = lf.with_column(col(BORO).eq(lit(borough.name())).alias(column));
    }

    let selection: Vec<Expr> = [col("year"), col("month"), col(BORO)]
        .into_iter()
        .chain(indicator_columns().map(|(_, column)| col(column)))
        .chain(std::iter::once(col(COUNT)))
        .collect();

    let frame = lf
        .sort(["year", "month", BORO], SortMultipleOptions::default())
        .select(selection)
        .collect()?;

    let rows = extract_rows(&frame)?;
    info!(incidents = table.len(), observations = rows.len(), "features built");

    Ok(FeatureTable { frame, rows })
}

fn extract_rows(frame: &DataFrame) -> Result<Vec<FeatureRow>> {
    let years = frame.column("year")?.i32()?;
    let months = frame.column("month")?.u32()?;
    let boros = frame.column(BORO)?.str()?;
    let bronx = frame.column("is_bronx")?.bool()?;
    let brooklyn = frame.column("is_brooklyn")?.bool()?;
    let manhattan = frame.column("is_manhattan")?.bool()?;
    let queens = frame.column("is_queens")?.bool()?;
    let counts = frame.column(COUNT)?.u32()?;

    (0..frame.height())
        .map(|i| {
            Ok(FeatureRow {
                year: require(years.get(i), "year", i)?,
                month: require(months.get(i), "month", i)?,
                borough: require(boros.get(i), "boro", i)?.to_string(),
                is_bronx: require(bronx.get(i), "is_bronx", i)?,
                is_brooklyn: require(brooklyn.get(i), "is_brooklyn", i)?,
                is_manhattan: require(manhattan.get(i), "is_manhattan", i)?,
                is_queens: require(queens.get(i), "is_queens", i)?,
                count: require(counts.get(i), COUNT, i)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::test_support::*;

    #[test]
    fn test_three_incident_scenario() {
        let features = build_features(&three_incidents()).unwrap();
        let rows = features.rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            FeatureRow {
                year: 2020,
                month: 1,
                borough: "BRONX".to_string(),
                is_bronx: true,
                is_brooklyn: false,
                is_manhattan: false,
                is_queens: false,
                count: 2,
            }
        );
        assert_eq!(rows[1].month, 6);
        assert_eq!(rows[1].borough, "QUEENS");
        assert_eq!(rows[1].indicators(), [false, false, false, true]);
        assert_eq!(rows[1].count, 1);
    }

    #[test]
    fn test_baseline_and_unknown_have_no_indicator() {
        let table = IncidentTable::new(vec![
            incident((2020, 3, 1), 0, "STATEN ISLAND", None),
            incident((2020, 3, 2), 0, "Bronx", None),
        ]);
        let features = build_features(&table).unwrap();

        assert_eq!(features.len(), 2);
        for row in features.rows() {
            assert_eq!(row.indicators(), [false; 4], "{row:?}");
        }
    }

    #[test]
    fn test_frame_column_order() {
        let features = build_features(&three_incidents()).unwrap();
        assert_eq!(
            features.frame().get_column_names(),
            vec![
                "year",
                "month",
                "boro",
                "is_bronx",
                "is_brooklyn",
                "is_manhattan",
                "is_queens",
                "count"
            ]
        );
    }

    #[test]
    fn test_empty_table_gives_empty_features() {
        let features = build_features(&IncidentTable::default()).unwrap();
        assert!(features.is_empty());
    }
}
