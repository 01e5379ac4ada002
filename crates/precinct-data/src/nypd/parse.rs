//! CSV parsing of shooting incident rows.
//!
//! Only four columns are read; every other column in the export is ignored.
//! A row that cannot be parsed fails the whole load, since every downstream
//! table is computed over the complete dataset.

use crate::error::{DataError, Result};
use crate::table::Incident;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::io::Read;
use tracing::debug;

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "OCCUR_DATE",
    "OCCUR_TIME",
    "BORO",
    "STATISTICAL_MURDER_FLAG",
];

const DATE_FORMAT: &str = "%m/%d/%Y";
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// One row as it appears in the export, before typing.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "OCCUR_DATE")]
    occur_date: String,
    #[serde(rename = "OCCUR_TIME")]
    occur_time: String,
    #[serde(rename = "BORO")]
    boro: String,
    #[serde(rename = "STATISTICAL_MURDER_FLAG")]
    murder_flag: String,
}

/// Parse the month/day/year date used by the export.
pub(crate) fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| format!("unparseable OCCUR_DATE {value:?}: {e}"))
}

/// Parse a time of day, with or without seconds.
pub(crate) fn parse_time(value: &str) -> std::result::Result<NaiveTime, String> {
    let value = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| format!("unparseable OCCUR_TIME {value:?}"))
}

/// Parse the murder flag. An empty cell is a missing value, not `false`.
pub(crate) fn parse_flag(value: &str) -> std::result::Result<Option<bool>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.to_ascii_lowercase().as_str() {
        "true" | "y" => Ok(Some(true)),
        "false" | "n" => Ok(Some(false)),
        _ => Err(format!("unrecognized STATISTICAL_MURDER_FLAG {value:?}")),
    }
}

impl RawRecord {
    fn into_incident(self) -> std::result::Result<Incident, String> {
        Ok(Incident {
            occur_date: parse_date(&self.occur_date)?,
            occur_time: parse_time(&self.occur_time)?,
            borough: self.boro,
            murder_flag: parse_flag(&self.murder_flag)?,
        })
    }
}

/// Parse incident rows from CSV text with a header row.
///
/// Columns are matched by header name, so column order does not matter.
///
/// # Errors
///
/// Returns [`DataError::MissingColumn`] if a required column is absent and
/// [`DataError::InvalidRow`] for the first row that cannot be parsed.
pub fn parse_incidents<R: Read>(reader: R) -> Result<Vec<Incident>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::MissingColumn(column.to_string()));
        }
    }

    let mut incidents = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        let raw: RawRecord = record
            .deserialize(Some(&headers))
            .map_err(|e| DataError::InvalidRow {
                line,
                reason: e.to_string(),
            })?;
        let incident = raw
            .into_incident()
            .map_err(|reason| DataError::InvalidRow { line, reason })?;

        incidents.push(incident);
    }

    debug!(rows = incidents.len(), "parsed incident rows");
    Ok(incidents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const HEADER: &str = "INCIDENT_KEY,OCCUR_DATE,OCCUR_TIME,BORO,STATISTICAL_MURDER_FLAG";

    #[test]
    fn test_parse_basic_rows() {
        let csv = format!(
            "{HEADER}\n\
             1,01/05/2020,02:00:00,BRONX,true\n\
             2,06/01/2020,14:30:00,QUEENS,false\n"
        );
        let incidents = parse_incidents(csv.as_bytes()).unwrap();

        assert_eq!(incidents.len(), 2);
        assert_eq!(
            incidents[0].occur_date,
            NaiveDate::from_ymd_opt(2020, 1, 5).unwrap()
        );
        assert_eq!(
            incidents[0].occur_time,
            NaiveTime::from_hms_opt(2, 0, 0).unwrap()
        );
        assert_eq!(incidents[0].borough, "BRONX");
        assert_eq!(incidents[0].murder_flag, Some(true));
        assert_eq!(incidents[1].murder_flag, Some(false));
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let csv = "BORO,STATISTICAL_MURDER_FLAG,OCCUR_TIME,OCCUR_DATE\n\
                   MANHATTAN,false,23:59:59,12/31/2019\n";
        let incidents = parse_incidents(csv.as_bytes()).unwrap();
        assert_eq!(incidents[0].borough, "MANHATTAN");
        assert_eq!(
            incidents[0].occur_date,
            NaiveDate::from_ymd_opt(2019, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_unknown_borough_preserved() {
        let csv = format!("{HEADER}\n1,03/03/2021,10:00:00,NEW JERSEY,false\n");
        let incidents = parse_incidents(csv.as_bytes()).unwrap();
        assert_eq!(incidents[0].borough, "NEW JERSEY");
    }

    #[test]
    fn test_missing_flag_is_null() {
        let csv = format!("{HEADER}\n1,03/03/2021,10:00:00,QUEENS,\n");
        let incidents = parse_incidents(csv.as_bytes()).unwrap();
        assert_eq!(incidents[0].murder_flag, None);
    }

    #[test]
    fn test_bad_date_fails_with_line() {
        let csv = format!(
            "{HEADER}\n\
             1,01/05/2020,02:00:00,BRONX,true\n\
             2,2020-01-06,02:00:00,BRONX,false\n"
        );
        let err = parse_incidents(csv.as_bytes()).unwrap_err();
        match err {
            DataError::InvalidRow { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("OCCUR_DATE"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_column() {
        let csv = "OCCUR_DATE,OCCUR_TIME,BORO\n01/05/2020,02:00:00,BRONX\n";
        let err = parse_incidents(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(c) if c == "STATISTICAL_MURDER_FLAG"));
    }

    #[test]
    fn test_empty_body_has_no_rows() {
        let csv = format!("{HEADER}\n");
        assert!(parse_incidents(csv.as_bytes()).unwrap().is_empty());
    }

    #[rstest]
    #[case("true", Some(true))]
    #[case("TRUE", Some(true))]
    #[case("Y", Some(true))]
    #[case("false", Some(false))]
    #[case("N", Some(false))]
    #[case("", None)]
    #[case("  ", None)]
    fn test_parse_flag(#[case] input: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_flag(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_flag_rejects_garbage() {
        assert!(parse_flag("maybe").is_err());
    }

    #[rstest]
    #[case("02:00:00", 2, 0, 0)]
    #[case("23:15", 23, 15, 0)]
    #[case(" 07:05:09 ", 7, 5, 9)]
    fn test_parse_time(#[case] input: &str, #[case] h: u32, #[case] m: u32, #[case] s: u32) {
        assert_eq!(
            parse_time(input).unwrap(),
            NaiveTime::from_hms_opt(h, m, s).unwrap()
        );
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert!(parse_time("noon").is_err());
        assert!(parse_time("25:00:00").is_err());
    }
}
