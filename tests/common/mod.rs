//! Shared test helpers: in-memory stubs for every external collaborator.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use marketpulse::config::Config;
use marketpulse::domain::entities::analysis_report::AnalysisReport;
use marketpulse::domain::entities::news_item::{FeedEntry, FeedSpec};
use marketpulse::domain::entities::price_series::{PricePoint, PriceSeries};
use marketpulse::domain::error::DomainError;
use marketpulse::domain::ports::language_model::LanguageModel;
use marketpulse::domain::ports::report_repository::ReportRepository;
use marketpulse::domain::values::lookback::Lookback;
use marketpulse::domain::values::polarity::LexiconModel;
use marketpulse::infrastructure::feeds::{FeedError, NewsSource, PriceSource, SentimentIndexSource};
use marketpulse::{MarketPulse, Providers};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn test_config() -> Config {
    Config {
        db_path: ":memory:".into(),
        symbols: vec!["SPY".into(), "QQQ".into(), "IEF".into()],
        feeds: vec![
            FeedSpec::new("A", "https://feeds.test/a"),
            FeedSpec::new("B", "https://feeds.test/b"),
        ],
        ..Config::default()
    }
}

pub fn daily_series(symbol: &str, closes: &[f64]) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2025, 1, 2, 21, 0, 0).unwrap();
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, c)| PricePoint {
            timestamp: start + Duration::days(i as i64),
            close: *c,
        })
        .collect();
    PriceSeries::new(symbol, points)
}

pub fn entry(title: &str, ts: Option<i64>) -> FeedEntry {
    FeedEntry {
        title: title.to_string(),
        link: format!("https://news.test/{}", title.replace(' ', "-")),
        published: ts.and_then(|t| DateTime::from_timestamp(t, 0)),
    }
}

#[derive(Default)]
pub struct StubPrices {
    pub closes: HashMap<String, Vec<f64>>,
    pub calls: AtomicUsize,
}

impl StubPrices {
    pub fn with(pairs: &[(&str, Vec<f64>)]) -> Self {
        Self {
            closes: pairs
                .iter()
                .map(|(s, c)| (s.to_string(), c.clone()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PriceSource for StubPrices {
    fn name(&self) -> &str {
        "stub_prices"
    }

    async fn history(&self, symbol: &str, _lookback: Lookback) -> Result<PriceSeries, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.closes
            .get(symbol)
            .map(|c| daily_series(symbol, c))
            .ok_or_else(|| FeedError::Network(format!("no data for {symbol}")))
    }
}

pub struct StubIndex {
    pub score: Option<f64>,
    pub calls: AtomicUsize,
}

impl StubIndex {
    pub fn ok(score: f64) -> Self {
        Self {
            score: Some(score),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn down() -> Self {
        Self {
            score: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SentimentIndexSource for StubIndex {
    fn name(&self) -> &str {
        "stub_index"
    }

    async fn latest_score(&self) -> Result<f64, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.score
            .ok_or_else(|| FeedError::Network("operation timed out".into()))
    }
}

/// Feed stub keyed by feed name; a missing name behaves like malformed XML.
#[derive(Default)]
pub struct StubNews {
    pub feeds: HashMap<String, Vec<FeedEntry>>,
}

impl StubNews {
    pub fn with(pairs: Vec<(&str, Vec<FeedEntry>)>) -> Self {
        Self {
            feeds: pairs.into_iter().map(|(n, e)| (n.to_string(), e)).collect(),
        }
    }
}

#[async_trait]
impl NewsSource for StubNews {
    fn name(&self) -> &str {
        "stub_news"
    }

    async fn fetch(&self, feed: &FeedSpec) -> Result<Vec<FeedEntry>, FeedError> {
        self.feeds
            .get(&feed.name)
            .cloned()
            .ok_or_else(|| FeedError::Parse(format!("malformed feed {}", feed.name)))
    }
}

pub struct StubModel {
    pub reply: Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(vec![]),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            reply: Err(msg.to_string()),
            prompts: Mutex::new(vec![]),
        }
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LanguageModel for StubModel {
    fn name(&self) -> &str {
        "stub_model"
    }

    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(DomainError::Llm)
    }
}

/// Log whose appends always fail.
pub struct ReadOnlyRepo;

impl ReportRepository for ReadOnlyRepo {
    fn append(&self, _report: &AnalysisReport) -> Result<(), DomainError> {
        Err(DomainError::Database("disk full".into()))
    }

    fn load(&self) -> Result<Vec<AnalysisReport>, DomainError> {
        Ok(vec![])
    }
}

pub struct Stubs {
    pub prices: Arc<StubPrices>,
    pub index: Arc<StubIndex>,
    pub news: Arc<StubNews>,
    pub model: Option<Arc<StubModel>>,
}

impl Stubs {
    pub fn new(prices: StubPrices, index: StubIndex, news: StubNews) -> Self {
        Self {
            prices: Arc::new(prices),
            index: Arc::new(index),
            news: Arc::new(news),
            model: None,
        }
    }

    pub fn with_model(mut self, model: StubModel) -> Self {
        self.model = Some(Arc::new(model));
        self
    }

    pub fn providers(&self) -> Providers {
        Providers {
            prices: self.prices.clone(),
            sentiment_index: self.index.clone(),
            news: self.news.clone(),
            polarity: Arc::new(LexiconModel),
            language_model: self
                .model
                .clone()
                .map(|m| m as Arc<dyn LanguageModel>),
        }
    }
}

pub fn setup(stubs: &Stubs) -> MarketPulse {
    MarketPulse::with_providers(test_config(), stubs.providers()).unwrap()
}

pub fn setup_with(config: Config, stubs: &Stubs) -> MarketPulse {
    MarketPulse::with_providers(config, stubs.providers()).unwrap()
}

/// Strictly falling closes, long enough for the default 14-period window.
pub fn downtrend(len: usize) -> Vec<f64> {
    (0..len).map(|i| 120.0 - i as f64 * 1.5).collect()
}
