use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

/// Closing-price history for one instrument, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub points: Vec<PricePoint>,
    /// False when the upstream fetch failed; `points` is then empty.
    pub available: bool,
}

/// Latest close and its change from the prior close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub value: f64,
    pub change: f64,
}

impl PriceSeries {
    /// Builds a series, sorting by time and dropping non-finite closes.
    pub fn new(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.retain(|p| p.close.is_finite());
        points.sort_by_key(|p| p.timestamp);
        Self {
            symbol: symbol.into(),
            points,
            available: true,
        }
    }

    pub fn unavailable(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            points: vec![],
            available: false,
        }
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// True when there are at least two points to take a change from.
    pub fn has_change_data(&self) -> bool {
        self.points.len() >= 2
    }

    /// `(0, 0)` when fewer than two points are available.
    pub fn metric(&self) -> Metric {
        match self.points.as_slice() {
            [.., prev, last] => Metric {
                value: last.close,
                change: last.close - prev.close,
            },
            _ => Metric {
                value: 0.0,
                change: 0.0,
            },
        }
    }
}
