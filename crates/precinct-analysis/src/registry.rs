//! Aggregate Registry
//!
//! Static catalogue of the available aggregates, for listing and lookup by
//! name.

use crate::aggregate::{Aggregate, DeathRateByBorough, HourlyCounts, SeasonalCounts, YearlyByBorough};

/// Aggregate metadata
#[derive(Debug, Clone)]
pub struct AggregateInfo {
    /// Aggregate name (unique identifier)
    pub name: &'static str,
    /// Grouping key(s)
    pub keys: &'static [&'static str],
    /// Brief description of what the aggregate measures
    pub description: &'static str,
    /// Required column names in the incident frame
    pub required_columns: &'static [&'static str],
}

fn info<A: Aggregate>(aggregate: &A, keys: &'static [&'static str], description: &'static str) -> AggregateInfo {
    AggregateInfo {
        name: aggregate.name(),
        keys,
        description,
        required_columns: aggregate.required_columns(),
    }
}

/// Get all available aggregate info
pub fn available_aggregates() -> Vec<AggregateInfo> {
    vec![
        info(
            &YearlyByBorough,
            &["boro", "year"],
            "Incident count per borough and calendar year",
        ),
        info(
            &DeathRateByBorough,
            &["boro"],
            "Deaths, shootings and fatality rate per borough",
        ),
        info(
            &HourlyCounts,
            &["hour"],
            "Incident count per hour of day",
        ),
        info(
            &SeasonalCounts,
            &["season"],
            "Total, fatal and fatality rate per season",
        ),
    ]
}

/// Get info for a specific aggregate by name
pub fn get_aggregate_info(name: &str) -> Option<AggregateInfo> {
    available_aggregates().into_iter().find(|a| a.name == name)
}
