use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Five ordered headline sentiment buckets, most negative first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentTier {
    ExtremelyNegative,
    LeaningNegative,
    Neutral,
    LeaningPositive,
    ExtremelyPositive,
}

impl SentimentTier {
    pub const ALL: [SentimentTier; 5] = [
        SentimentTier::ExtremelyNegative,
        SentimentTier::LeaningNegative,
        SentimentTier::Neutral,
        SentimentTier::LeaningPositive,
        SentimentTier::ExtremelyPositive,
    ];

    /// Buckets: [-1,-0.3) [-0.3,-0.1) [-0.1,0.1] (0.1,0.3] (0.3,1].
    /// Values outside [-1,1] land in the outer tiers; NaN is neutral.
    pub fn from_polarity(p: f64) -> Self {
        if p.is_nan() {
            SentimentTier::Neutral
        } else if p > 0.3 {
            SentimentTier::ExtremelyPositive
        } else if p > 0.1 {
            SentimentTier::LeaningPositive
        } else if p >= -0.1 {
            SentimentTier::Neutral
        } else if p >= -0.3 {
            SentimentTier::LeaningNegative
        } else {
            SentimentTier::ExtremelyNegative
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            SentimentTier::ExtremelyPositive | SentimentTier::LeaningPositive => "green",
            SentimentTier::Neutral => "gray",
            SentimentTier::LeaningNegative => "orange",
            SentimentTier::ExtremelyNegative => "red",
        }
    }
}

impl fmt::Display for SentimentTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentTier::ExtremelyPositive => write!(f, "extremely positive"),
            SentimentTier::LeaningPositive => write!(f, "leaning positive"),
            SentimentTier::Neutral => write!(f, "neutral"),
            SentimentTier::LeaningNegative => write!(f, "leaning negative"),
            SentimentTier::ExtremelyNegative => write!(f, "extremely negative"),
        }
    }
}

impl FromStr for SentimentTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', " ").as_str() {
            "extremely positive" => Ok(SentimentTier::ExtremelyPositive),
            "leaning positive" => Ok(SentimentTier::LeaningPositive),
            "neutral" => Ok(SentimentTier::Neutral),
            "leaning negative" => Ok(SentimentTier::LeaningNegative),
            "extremely negative" => Ok(SentimentTier::ExtremelyNegative),
            _ => Err(format!("Unknown sentiment tier: {s}")),
        }
    }
}
