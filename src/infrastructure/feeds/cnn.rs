use super::{http_client, FeedError, SentimentIndexSource, DEFAULT_TIMEOUT};
use async_trait::async_trait;
use std::time::Duration;

const GRAPHDATA_URL: &str = "https://production.dataviz.cnn.io/index/fearandgreed/graphdata";
const REFERER: &str = "https://edition.cnn.com/";

/// CNN Fear & Greed index. Unofficial endpoint; needs browser-like headers.
pub struct CnnFearGreedSource {
    url: String,
    client: reqwest::Client,
}

impl CnnFearGreedSource {
    pub fn new(timeout: Duration) -> Self {
        Self {
            url: GRAPHDATA_URL.to_string(),
            client: http_client(timeout),
        }
    }

    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            client: http_client(timeout),
        }
    }
}

impl Default for CnnFearGreedSource {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[derive(Debug, serde::Deserialize)]
struct GraphData {
    fear_and_greed_historical: Historical,
}

#[derive(Debug, serde::Deserialize)]
struct Historical {
    data: Vec<HistoricalPoint>,
}

#[derive(Debug, serde::Deserialize)]
struct HistoricalPoint {
    y: f64,
}

/// Last historical point's score, truncated to an integer and range-checked.
pub fn parse_graphdata(body: &str) -> Result<f64, FeedError> {
    let data: GraphData =
        serde_json::from_str(body).map_err(|e| FeedError::Parse(e.to_string()))?;
    let last = data
        .fear_and_greed_historical
        .data
        .last()
        .ok_or_else(|| FeedError::Parse("Empty fear and greed history".into()))?;
    if !last.y.is_finite() {
        return Err(FeedError::Parse(format!("Non-numeric score {}", last.y)));
    }
    let score = last.y.trunc();
    if !(0.0..=100.0).contains(&score) {
        return Err(FeedError::Parse(format!("Score out of range: {score}")));
    }
    Ok(score)
}

#[async_trait]
impl SentimentIndexSource for CnnFearGreedSource {
    fn name(&self) -> &str {
        "cnn_fear_greed"
    }

    async fn latest_score(&self) -> Result<f64, FeedError> {
        let resp = self
            .client
            .get(&self.url)
            .header("Referer", REFERER)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FeedError::Network(format!(
                "CNN index returned {}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;
        parse_graphdata(&body)
    }
}
