pub mod cnn;
pub mod rss;
pub mod yahoo;

use crate::domain::entities::news_item::{FeedEntry, FeedSpec};
use crate::domain::entities::price_series::PriceSeries;
use crate::domain::values::lookback::Lookback;
use async_trait::async_trait;
use std::time::Duration;

/// Browser user agent; several upstreams reject obvious bots.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Closing-price history for one symbol.
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn name(&self) -> &str;

    async fn history(&self, symbol: &str, lookback: Lookback) -> Result<PriceSeries, FeedError>;
}

/// Externally published 0-100 composite sentiment index.
#[async_trait]
pub trait SentimentIndexSource: Send + Sync {
    fn name(&self) -> &str;

    async fn latest_score(&self) -> Result<f64, FeedError>;
}

/// RSS/Atom style headline feed.
#[async_trait]
pub trait NewsSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, feed: &FeedSpec) -> Result<Vec<FeedEntry>, FeedError>;
}

#[derive(Debug)]
pub enum FeedError {
    /// HTTP or network error
    Network(String),
    /// Response parsing error
    Parse(String),
    /// Configuration error (bad URL, empty symbol, etc.)
    Config(String),
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Network(msg) => write!(f, "Network error: {msg}"),
            FeedError::Parse(msg) => write!(f, "Parse error: {msg}"),
            FeedError::Config(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for FeedError {}

pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}
