use super::{http_client, FeedError, PriceSource, DEFAULT_TIMEOUT};
use crate::domain::entities::price_series::{PricePoint, PriceSeries};
use crate::domain::values::lookback::Lookback;
use async_trait::async_trait;
use chrono::DateTime;
use std::time::Duration;

/// Yahoo Finance daily closes via the v8 chart API (no auth required).
pub struct YahooPriceSource {
    base_url: String,
    client: reqwest::Client,
}

impl YahooPriceSource {
    pub fn new(timeout: Duration) -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            client: http_client(timeout),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            client: http_client(timeout),
        }
    }
}

impl Default for YahooPriceSource {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[derive(Debug, serde::Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, serde::Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, serde::Deserialize)]
struct ChartData {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, serde::Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, serde::Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Pulls the close series out of a chart response body, skipping null closes.
pub fn parse_chart(symbol: &str, body: &str) -> Result<PriceSeries, FeedError> {
    let data: ChartResponse =
        serde_json::from_str(body).map_err(|e| FeedError::Parse(e.to_string()))?;

    if let Some(err) = data.chart.error {
        if !err.is_null() {
            return Err(FeedError::Parse(format!("Yahoo error: {err}")));
        }
    }

    let results = data
        .chart
        .result
        .ok_or_else(|| FeedError::Parse("No chart results".into()))?;
    let chart = results
        .into_iter()
        .next()
        .ok_or_else(|| FeedError::Parse("Empty chart results".into()))?;

    let closes = chart
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let points = chart
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(ts, close)| {
            let close = close?;
            let timestamp = DateTime::from_timestamp(*ts, 0)?;
            Some(PricePoint { timestamp, close })
        })
        .collect();

    Ok(PriceSeries::new(symbol, points))
}

#[async_trait]
impl PriceSource for YahooPriceSource {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    async fn history(&self, symbol: &str, lookback: Lookback) -> Result<PriceSeries, FeedError> {
        if symbol.trim().is_empty() {
            return Err(FeedError::Config("Empty symbol".into()));
        }

        let url = format!("{}/v8/finance/chart/{symbol}", self.base_url);
        let range = lookback.to_string();

        let resp = self
            .client
            .get(&url)
            .query(&[("range", range.as_str()), ("interval", "1d")])
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FeedError::Network(format!(
                "Yahoo API returned {} for {symbol}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;
        parse_chart(symbol, &body)
    }
}
