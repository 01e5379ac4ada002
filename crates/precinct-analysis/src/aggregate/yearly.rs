//! Incident counts per borough and calendar year.

use super::Aggregate;
use crate::error::{Result, require};
use polars::prelude::*;
use precinct_data::table::columns::{BORO, OCCUR_DATE};
use serde::{Deserialize, Serialize};

/// Number of incidents in one borough during one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyCount {
    /// Borough as written in the source.
    pub borough: String,
    /// Calendar year of occurrence.
    pub year: i32,
    /// Number of incidents.
    pub count: u32,
}

/// Groups incidents by (borough, year of occurrence).
///
/// Pairs with no incidents do not appear in the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct YearlyByBorough;

impl Aggregate for YearlyByBorough {
    type Row = YearlyCount;

    fn name(&self) -> &'static str {
        "yearly_by_borough"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &[BORO, OCCUR_DATE]
    }

    fn compute(&self, data: LazyFrame) -> PolarsResult<LazyFrame> {
        let result = data
            .with_column(col(OCCUR_DATE).dt().year().cast(DataType::Int32).alias("year"))
            .group_by([col(BORO), col("year")])
            .agg([len().cast(DataType::UInt32).alias("count")])
            .sort([BORO, "year"], SortMultipleOptions::default())
            .select([col(BORO), col("year"), col("count")]);

        Ok(result)
    }

    fn extract(&self, frame: &DataFrame) -> Result<Vec<YearlyCount>> {
        let boros = frame.column(BORO)?.str()?;
        let years = frame.column("year")?.i32()?;
        let counts = frame.column("count")?.u32()?;

        (0..frame.height())
            .map(|i| {
                Ok(YearlyCount {
                    borough: require(boros.get(i), "boro", i)?.to_string(),
                    year: require(years.get(i), "year", i)?,
                    count: require(counts.get(i), "count", i)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::test_support::*;
    use precinct_data::IncidentTable;

    fn row(borough: &str, year: i32, count: u32) -> YearlyCount {
        YearlyCount {
            borough: borough.to_string(),
            year,
            count,
        }
    }

    #[test]
    fn test_three_incident_scenario() {
        let rows = YearlyByBorough.rows(&three_incidents()).unwrap();
        assert_eq!(rows, vec![row("BRONX", 2020, 2), row("QUEENS", 2020, 1)]);
    }

    #[test]
    fn test_sparse_and_sorted() {
        let table = IncidentTable::new(vec![
            incident((2021, 3, 1), 0, "QUEENS", None),
            incident((2019, 3, 1), 0, "QUEENS", None),
            incident((2019, 7, 1), 0, "BROOKLYN", None),
            incident((2019, 8, 1), 0, "BROOKLYN", Some(true)),
        ]);
        let rows = YearlyByBorough.rows(&table).unwrap();

        // QUEENS 2020 has no incidents and must be absent.
        assert_eq!(
            rows,
            vec![
                row("BROOKLYN", 2019, 2),
                row("QUEENS", 2019, 1),
                row("QUEENS", 2021, 1),
            ]
        );
    }

    #[test]
    fn test_unknown_borough_is_its_own_group() {
        let table = IncidentTable::new(vec![
            incident((2020, 1, 1), 0, "BRONX", None),
            incident((2020, 1, 1), 0, "bronx", None),
        ]);
        let rows = YearlyByBorough.rows(&table).unwrap();
        assert_eq!(rows, vec![row("BRONX", 2020, 1), row("bronx", 2020, 1)]);
    }

    #[test]
    fn test_per_borough_sum_matches_total() {
        let table = IncidentTable::new(vec![
            incident((2018, 1, 1), 0, "BRONX", None),
            incident((2019, 1, 1), 0, "BRONX", None),
            incident((2019, 2, 1), 0, "BRONX", None),
            incident((2019, 2, 1), 0, "MANHATTAN", None),
        ]);
        let rows = YearlyByBorough.rows(&table).unwrap();

        for borough in table.boroughs() {
            let expected = table
                .incidents()
                .iter()
                .filter(|i| i.borough == borough)
                .count() as u32;
            let summed: u32 = rows
                .iter()
                .filter(|r| r.borough == borough)
                .map(|r| r.count)
                .sum();
            assert_eq!(summed, expected);
        }
    }
}
