use crate::application::classify::ClassifyUseCase;
use crate::application::market_data::{MarketDataUseCase, SymbolMetric};
use crate::application::news::NewsUseCase;
use crate::application::reports::ReportsUseCase;
use crate::application::sentiment::SentimentUseCase;
use crate::config::Config;
use crate::domain::entities::analysis_report::AnalysisReport;
use crate::domain::entities::news_item::ClassifiedHeadline;
use crate::domain::entities::price_series::PriceSeries;
use crate::domain::entities::session::{authorize, Session};
use crate::domain::ports::report_repository::ReportStats;
use crate::domain::values::role::Role;
use crate::domain::values::rsi::latest_rsi;
use crate::domain::values::sentiment_score::{GaugeBand, Provenance};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A panel that may be missing without taking the rest of the page down.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum Section<T> {
    Ready(T),
    Unavailable(String),
}

impl<T> Section<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(v) => Some(v),
            Section::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketSection {
    pub lookback: String,
    pub metrics: Vec<SymbolMetric>,
    pub unavailable: Vec<String>,
    /// Latest RSI per symbol, for the trend panel.
    pub oscillators: Vec<(String, f64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GaugeSection {
    pub value: f64,
    pub provenance: Provenance,
    pub band: GaugeBand,
    pub band_label: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsSection {
    pub total: usize,
    pub failed_feeds: Vec<String>,
    pub headlines: Vec<ClassifiedHeadline>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub rendered_at: DateTime<Utc>,
    pub market: MarketSection,
    pub sentiment: GaugeSection,
    pub news: NewsSection,
    pub latest_report: Section<Option<AnalysisReport>>,
    /// Present only when the admin panel is enabled and the viewer is an admin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<Section<ReportStats>>,
}

/// Borrowed view of the use cases one render pass needs.
pub struct DashboardPipeline<'a> {
    pub config: &'a Config,
    pub market: &'a MarketDataUseCase,
    pub sentiment: &'a SentimentUseCase,
    pub news: &'a NewsUseCase,
    pub classify: &'a ClassifyUseCase,
    pub reports: &'a ReportsUseCase,
}

impl DashboardPipeline<'_> {
    /// One render pass: prices, then the gauge, then news, then the report panels.
    pub async fn render(&self, session: &Session) -> Dashboard {
        let cfg = self.config;

        let data = self.market.execute(&cfg.fetch_symbols(), cfg.lookback).await;

        let market = MarketSection {
            lookback: data.lookback.to_string(),
            metrics: data.metrics(),
            unavailable: data.unavailable_symbols(),
            oscillators: data
                .series
                .iter()
                .map(|s| (s.symbol.clone(), latest_rsi(&s.closes(), cfg.rsi_window)))
                .collect(),
        };

        let reference = data
            .get(&cfg.reference_symbol)
            .cloned()
            .unwrap_or_else(|| PriceSeries::unavailable(cfg.reference_symbol.clone()));
        let score = self.sentiment.resolve(&reference, cfg.rsi_window).await;
        let band = score.band();
        let sentiment = GaugeSection {
            value: score.value(),
            provenance: score.provenance(),
            band,
            band_label: band.to_string(),
            color: band.color().to_string(),
        };

        let digest = self.news.aggregate().await;
        let news = NewsSection {
            total: digest.items.len(),
            failed_feeds: digest.failed_feeds.clone(),
            headlines: self
                .classify
                .classify_items(digest.top(cfg.news_display_limit)),
        };

        let latest_report = match self.reports.latest(session) {
            Ok(r) => Section::Ready(r),
            Err(e) => Section::Unavailable(e.to_string()),
        };

        let admin = (cfg.admin_panel && authorize(session, Role::Admin).is_granted()).then(|| {
            match self.reports.stats(session) {
                Ok(stats) => Section::Ready(stats),
                Err(e) => Section::Unavailable(e.to_string()),
            }
        });

        Dashboard {
            rendered_at: Utc::now(),
            market,
            sentiment,
            news,
            latest_report,
            admin,
        }
    }
}
