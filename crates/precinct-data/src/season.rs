//! Meteorological seasons and the month-to-season table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A meteorological season (northern hemisphere).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    /// December, January, February
    Winter,

    /// March, April, May
    Spring,

    /// June, July, August
    Summer,

    /// September, October, November
    Fall,
}

/// Season of each calendar month, indexed by `month - 1`.
const MONTH_TABLE: [Season; 12] = [
    Season::Winter,
    Season::Winter,
    Season::Spring,
    Season::Spring,
    Season::Spring,
    Season::Summer,
    Season::Summer,
    Season::Summer,
    Season::Fall,
    Season::Fall,
    Season::Fall,
    Season::Winter,
];

impl Season {
    /// Returns all seasons in calendar order.
    pub const fn all() -> [Self; 4] {
        [Self::Winter, Self::Spring, Self::Summer, Self::Fall]
    }

    /// Season of a calendar month (1-12). Returns `None` outside that range.
    pub const fn from_month(month: u32) -> Option<Self> {
        if matches!(month, 1..=12) {
            Some(MONTH_TABLE[(month - 1) as usize])
        } else {
            None
        }
    }

    /// The three months belonging to this season.
    pub const fn months(&self) -> [u32; 3] {
        match self {
            Self::Winter => [12, 1, 2],
            Self::Spring => [3, 4, 5],
            Self::Summer => [6, 7, 8],
            Self::Fall => [9, 10, 11],
        }
    }

    /// Position in calendar order, used for sorting presentation output.
    pub const fn ordinal(&self) -> u32 {
        match self {
            Self::Winter => 0,
            Self::Spring => 1,
            Self::Summer => 2,
            Self::Fall => 3,
        }
    }

    /// Returns the season name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
        }
    }

    /// Parse a season from its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.name() == name)
    }

    /// The full month table as `(month, season)` pairs.
    pub fn month_table() -> impl Iterator<Item = (u32, Self)> {
        MONTH_TABLE
            .iter()
            .enumerate()
            .map(|(i, season)| (i as u32 + 1, *season))
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
