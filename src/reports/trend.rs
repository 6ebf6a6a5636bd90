//! Trend classification over an ordered metric series.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

/// Direction of the change between the two most recent week buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Stable => "stable",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Up => "↑",
            TrendDirection::Down => "↓",
            TrendDirection::Stable => "→",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify an ascending-ordered series by the sign of the delta between its
/// last two values. Fewer than two values is `Stable`. No threshold: any
/// nonzero delta flips the classification.
pub fn classify(values: &[Decimal]) -> TrendDirection {
    if values.len() < 2 {
        return TrendDirection::Stable;
    }

    let delta = values[values.len() - 1] - values[values.len() - 2];
    if delta > Decimal::ZERO {
        TrendDirection::Up
    } else if delta < Decimal::ZERO {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    }
}
