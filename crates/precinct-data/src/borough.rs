//! NYC borough definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five NYC boroughs as they appear in the `BORO` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Borough {
    /// Bronx
    Bronx,

    /// Brooklyn
    Brooklyn,

    /// Manhattan
    Manhattan,

    /// Queens
    Queens,

    /// Staten Island
    StatenIsland,
}

impl Borough {
    /// Boroughs that get their own indicator column, in design-matrix order.
    pub const INDICATORS: [Self; 4] = [Self::Bronx, Self::Brooklyn, Self::Manhattan, Self::Queens];

    /// Reference category: represented by all indicators being false.
    pub const BASELINE: Self = Self::StatenIsland;

    /// Returns all boroughs.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Bronx,
            Self::Brooklyn,
            Self::Manhattan,
            Self::Queens,
            Self::StatenIsland,
        ]
    }

    /// Returns the borough name exactly as written in the source data.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bronx => "BRONX",
            Self::Brooklyn => "BROOKLYN",
            Self::Manhattan => "MANHATTAN",
            Self::Queens => "QUEENS",
            Self::StatenIsland => "STATEN ISLAND",
        }
    }

    /// Name of the indicator column for this borough.
    ///
    /// The baseline borough has no indicator and returns `None`.
    pub const fn indicator_column(&self) -> Option<&'static str> {
        match self {
            Self::Bronx => Some("is_bronx"),
            Self::Brooklyn => Some("is_brooklyn"),
            Self::Manhattan => Some("is_manhattan"),
            Self::Queens => Some("is_queens"),
            Self::StatenIsland => None,
        }
    }

    /// Parse a borough from its source name.
    ///
    /// Matching is exact: `"bronx"` or `" BRONX"` are not boroughs.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "BRONX" => Some(Self::Bronx),
            "BROOKLYN" => Some(Self::Brooklyn),
            "MANHATTAN" => Some(Self::Manhattan),
            "QUEENS" => Some(Self::Queens),
            "STATEN ISLAND" => Some(Self::StatenIsland),
            _ => None,
        }
    }

    /// Indicator values for a source borough name, in [`Self::INDICATORS`]
    /// order.
    ///
    /// At most one value is true. The baseline and any unrecognised name
    /// give all false.
    pub fn indicators_for(name: &str) -> [bool; 4] {
        Self::INDICATORS.map(|b| b.name() == name)
    }
}

impl fmt::Display for Borough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
