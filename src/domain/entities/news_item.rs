use crate::domain::values::sentiment_tier::SentimentTier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display string for entries without a usable publish time.
pub const UNKNOWN_TIME: &str = "unknown time";

/// A named feed endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSpec {
    pub name: String,
    pub url: String,
}

impl FeedSpec {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// One entry as parsed from a feed, before aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub published: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub source: String,
    pub title: String,
    pub link: String,
    pub published_at: Option<DateTime<Utc>>,
    /// Unix seconds; 0 when the publish time is unknown.
    pub timestamp: i64,
    pub time_label: String,
}

impl NewsItem {
    pub fn from_entry(source: &str, entry: FeedEntry) -> Self {
        let (timestamp, time_label) = match entry.published {
            Some(dt) => (dt.timestamp(), dt.format("%Y-%m-%d %H:%M").to_string()),
            None => (0, UNKNOWN_TIME.to_string()),
        };
        Self {
            source: source.to_string(),
            title: entry.title,
            link: entry.link,
            published_at: entry.published,
            timestamp,
            time_label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadlineSentiment {
    pub polarity: f64,
    pub tier: SentimentTier,
}

impl HeadlineSentiment {
    pub fn from_polarity(polarity: f64) -> Self {
        Self {
            polarity,
            tier: SentimentTier::from_polarity(polarity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedHeadline {
    #[serde(flatten)]
    pub item: NewsItem,
    pub sentiment: HeadlineSentiment,
    pub color: String,
}
