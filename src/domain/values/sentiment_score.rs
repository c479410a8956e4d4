use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a sentiment reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    ExternalIndex,
    TechnicalProxy,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::ExternalIndex => write!(f, "external-index"),
            Provenance::TechnicalProxy => write!(f, "technical-proxy"),
        }
    }
}

/// Gauge colour band for a 0-100 fear/greed reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeBand {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl GaugeBand {
    /// Bands: [0,25) [25,45) [45,55] (55,75] (75,100].
    pub fn for_value(value: f64) -> Self {
        if value > 75.0 {
            GaugeBand::ExtremeGreed
        } else if value > 55.0 {
            GaugeBand::Greed
        } else if value >= 45.0 {
            GaugeBand::Neutral
        } else if value >= 25.0 {
            GaugeBand::Fear
        } else {
            GaugeBand::ExtremeFear
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            GaugeBand::ExtremeGreed => "#FF4B4B",
            GaugeBand::Greed => "#FF8C00",
            GaugeBand::Neutral => "#9E9E9E",
            GaugeBand::Fear => "#00CC96",
            GaugeBand::ExtremeFear => "#006400",
        }
    }
}

impl fmt::Display for GaugeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GaugeBand::ExtremeFear => write!(f, "extreme fear"),
            GaugeBand::Fear => write!(f, "fear"),
            GaugeBand::Neutral => write!(f, "neutral"),
            GaugeBand::Greed => write!(f, "greed"),
            GaugeBand::ExtremeGreed => write!(f, "extreme greed"),
        }
    }
}

/// A 0-100 market sentiment reading tagged with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    value: f64,
    provenance: Provenance,
}

impl SentimentScore {
    pub fn external(value: f64) -> Result<Self, String> {
        if !(0.0..=100.0).contains(&value) {
            return Err(format!("Sentiment index must be between 0 and 100, got {value}"));
        }
        Ok(Self {
            value,
            provenance: Provenance::ExternalIndex,
        })
    }

    /// Oscillator-derived substitute. Out-of-range input is clamped and NaN reads neutral.
    pub fn technical_proxy(oscillator: f64) -> Self {
        let value = if oscillator.is_nan() {
            crate::domain::values::rsi::NEUTRAL
        } else {
            oscillator.clamp(0.0, 100.0)
        };
        Self {
            value,
            provenance: Provenance::TechnicalProxy,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn band(&self) -> GaugeBand {
        GaugeBand::for_value(self.value)
    }
}
