//! Integration tests for writing pipeline tables to disk.

use chrono::{NaiveDate, NaiveTime};
use precinct_analysis::{build_features, summarize};
use precinct_data::{Borough, Incident, IncidentTable};
use precinct_model::{OlsRegression, PredictionRequest};
use precinct_output::{AggregateSummary, ExportFormat, ModelSummary, write_tables};
use std::path::PathBuf;

fn table() -> IncidentTable {
    let mut incidents = Vec::new();
    for (b, borough) in Borough::all().into_iter().enumerate() {
        for year in 2019..=2020 {
            for month in 1..=12u32 {
                for k in 0..(1 + (month as usize + b) % 3) {
                    incidents.push(Incident::new(
                        NaiveDate::from_ymd_opt(year, month, 1 + k as u32).unwrap(),
                        NaiveTime::from_hms_opt((month + k as u32) % 24, 30, 0).unwrap(),
                        borough.name(),
                        Some(k == 1),
                    ));
                }
            }
        }
    }
    IncidentTable::new(incidents)
}

fn out_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("precinct_output_test_{name}"));
    std::fs::remove_dir_all(&dir).ok();
    dir
}

#[test]
fn test_write_all_tables_as_csv() {
    let table = table();
    let report = summarize(&table).unwrap();
    let features = build_features(&table).unwrap();
    let model = OlsRegression::default().fit(features.rows()).unwrap();
    let predictions = model
        .predict(&PredictionRequest::grid([2021], &Borough::all()), Some(0.95))
        .unwrap();

    let dir = out_dir("csv");
    let paths = write_tables(&dir, &report, &predictions, ExportFormat::Csv).unwrap();

    let names: Vec<_> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "yearly_by_borough.csv",
            "death_rate_by_borough.csv",
            "hourly_counts.csv",
            "seasonal_counts.csv",
            "predictions.csv"
        ]
    );

    let yearly = std::fs::read_to_string(&paths[0]).unwrap();
    assert_eq!(yearly.lines().next(), Some("borough,year,count"));
    assert_eq!(yearly.lines().count(), 1 + report.yearly.len());

    let forecast = std::fs::read_to_string(&paths[4]).unwrap();
    assert_eq!(
        forecast.lines().next(),
        Some("year,month,borough,predicted,lower,upper")
    );
    assert_eq!(forecast.lines().count(), 1 + 60);

    let summary = ModelSummary::from(&model).to_ascii_table();
    assert!(summary.contains("is_queens"));
    assert!(AggregateSummary::new(&report).to_string().contains("Winter"));

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_write_tables_as_json() {
    let report = summarize(&table()).unwrap();
    let dir = out_dir("json");
    let paths = write_tables(&dir, &report, &[], ExportFormat::Json).unwrap();

    let seasonal: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths[3]).unwrap()).unwrap();
    assert_eq!(seasonal.as_array().unwrap().len(), 4);
    assert_eq!(seasonal[0]["season"], "Winter");

    let predictions = std::fs::read_to_string(&paths[4]).unwrap();
    assert_eq!(predictions, "[]");

    std::fs::remove_dir_all(dir).ok();
}
