pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::analyze::{AnalysisOutcome, AnalyzeUseCase};
use crate::application::classify::ClassifyUseCase;
use crate::application::dashboard::{Dashboard, DashboardPipeline};
use crate::application::market_data::{MarketData, MarketDataUseCase, SymbolMetric};
use crate::application::news::{NewsDigest, NewsUseCase};
use crate::application::reports::ReportsUseCase;
use crate::application::sentiment::SentimentUseCase;
use crate::config::Config;
use crate::domain::entities::analysis_report::AnalysisReport;
use crate::domain::entities::news_item::{ClassifiedHeadline, HeadlineSentiment, NewsItem};
use crate::domain::entities::price_series::PriceSeries;
use crate::domain::entities::session::{authorize, Session};
use crate::domain::error::DomainError;
use crate::domain::ports::language_model::LanguageModel;
use crate::domain::ports::polarity_model::PolarityModel;
use crate::domain::ports::report_repository::{ReportRepository, ReportStats};
use crate::domain::values::polarity::LexiconModel;
use crate::domain::values::role::Role;
use crate::domain::values::rsi::rsi;
use crate::domain::values::sentiment_score::SentimentScore;
use crate::infrastructure::feeds::cnn::CnnFearGreedSource;
use crate::infrastructure::feeds::rss::HttpFeedSource;
use crate::infrastructure::feeds::yahoo::YahooPriceSource;
use crate::infrastructure::feeds::{NewsSource, PriceSource, SentimentIndexSource};
use crate::infrastructure::file::report_log::JsonFileReportRepo;
use crate::infrastructure::llm::openai_chat::OpenAiChatModel;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::report_repo::SqliteReportRepo;
use rusqlite::Connection;
use std::sync::Arc;
use std::time::Duration;

/// External collaborators the core talks to.
pub struct Providers {
    pub prices: Arc<dyn PriceSource>,
    pub sentiment_index: Arc<dyn SentimentIndexSource>,
    pub news: Arc<dyn NewsSource>,
    pub polarity: Arc<dyn PolarityModel>,
    /// `None` when no API key is configured; analysis is then refused.
    pub language_model: Option<Arc<dyn LanguageModel>>,
}

impl Providers {
    pub fn live(config: &Config) -> Self {
        let language_model = config.llm_api_key.as_ref().map(|key| {
            Arc::new(OpenAiChatModel::new(
                key.clone(),
                Some(config.llm_base_url.clone()),
                Some(config.llm_model.clone()),
            )) as Arc<dyn LanguageModel>
        });

        Self {
            prices: Arc::new(YahooPriceSource::new(config.http_timeout)),
            sentiment_index: Arc::new(CnnFearGreedSource::new(config.http_timeout)),
            news: Arc::new(HttpFeedSource::new(config.http_timeout)),
            polarity: Arc::new(LexiconModel),
            language_model,
        }
    }
}

/// Opens the report log: a JSON file for `*.json` paths, SQLite otherwise.
pub fn open_report_repo(path: &str) -> Result<Arc<dyn ReportRepository>, DomainError> {
    if path.ends_with(".json") {
        return Ok(Arc::new(JsonFileReportRepo::new(path)));
    }
    let conn = Connection::open(path).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
    conn.busy_timeout(Duration::from_secs(5))
        .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
    if path != ":memory:" {
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
    }
    run_migrations(&conn)?;
    Ok(Arc::new(SqliteReportRepo::new(conn)))
}

pub struct MarketPulse {
    config: Config,
    market_uc: MarketDataUseCase,
    sentiment_uc: SentimentUseCase,
    news_uc: NewsUseCase,
    classify_uc: ClassifyUseCase,
    analyze_uc: AnalyzeUseCase,
    reports_uc: ReportsUseCase,
}

impl MarketPulse {
    pub fn new(config: Config) -> Result<Self, DomainError> {
        let providers = Providers::live(&config);
        Self::with_providers(config, providers)
    }

    pub fn with_providers(config: Config, providers: Providers) -> Result<Self, DomainError> {
        let reports = open_report_repo(&config.db_path)?;
        Ok(Self::with_parts(config, providers, reports))
    }

    pub fn with_parts(
        config: Config,
        providers: Providers,
        reports: Arc<dyn ReportRepository>,
    ) -> Self {
        Self {
            market_uc: MarketDataUseCase::new(providers.prices),
            sentiment_uc: SentimentUseCase::new(providers.sentiment_index),
            news_uc: NewsUseCase::new(providers.news, config.feeds.clone(), config.dedup_news),
            classify_uc: ClassifyUseCase::new(providers.polarity),
            analyze_uc: AnalyzeUseCase::new(
                providers.language_model,
                reports.clone(),
                config.llm_context_limit,
            ),
            reports_uc: ReportsUseCase::new(reports),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // Delegating methods
    pub async fn market_data(&self) -> MarketData {
        self.market_uc
            .execute(&self.config.fetch_symbols(), self.config.lookback)
            .await
    }

    pub async fn metrics(&self) -> Vec<SymbolMetric> {
        self.market_data().await.metrics()
    }

    /// Full RSI series for one configured symbol, aligned with its closes.
    pub async fn oscillator(&self, symbol: &str) -> Vec<f64> {
        let data = self.market_data().await;
        let closes = data.get(symbol).map(|s| s.closes()).unwrap_or_default();
        rsi(&closes, self.config.rsi_window)
    }

    pub async fn sentiment(&self) -> SentimentScore {
        let data = self.market_data().await;
        let reference = data
            .get(&self.config.reference_symbol)
            .cloned()
            .unwrap_or_else(|| PriceSeries::unavailable(self.config.reference_symbol.clone()));
        self.sentiment_uc
            .resolve(&reference, self.config.rsi_window)
            .await
    }

    pub async fn news(&self) -> NewsDigest {
        self.news_uc.aggregate().await
    }

    pub async fn headlines(&self, limit: usize) -> Vec<ClassifiedHeadline> {
        let digest = self.news().await;
        self.classify_uc.classify_items(digest.top(limit))
    }

    pub fn classify(&self, text: &str) -> HeadlineSentiment {
        self.classify_uc.classify(text)
    }

    /// Fetches current news and runs a briefing over it.
    pub async fn analyze(&self, session: &Session) -> Result<AnalysisOutcome, DomainError> {
        // Gate and credential checks happen before any feed is fetched.
        authorize(session, Role::User).into_principal()?;
        if !self.analyze_uc.is_configured() {
            return self.analyze_uc.execute(session, &[]).await;
        }
        let digest = self.news().await;
        self.analyze_uc.execute(session, &digest.items).await
    }

    pub async fn analyze_news(
        &self,
        session: &Session,
        news: &[NewsItem],
    ) -> Result<AnalysisOutcome, DomainError> {
        self.analyze_uc.execute(session, news).await
    }

    pub fn reports(&self, session: &Session) -> Result<Vec<AnalysisReport>, DomainError> {
        self.reports_uc.history(session)
    }

    pub fn latest_report(&self, session: &Session) -> Result<Option<AnalysisReport>, DomainError> {
        self.reports_uc.latest(session)
    }

    pub fn report_stats(&self, session: &Session) -> Result<ReportStats, DomainError> {
        self.reports_uc.stats(session)
    }

    pub async fn dashboard(&self, session: &Session) -> Dashboard {
        DashboardPipeline {
            config: &self.config,
            market: &self.market_uc,
            sentiment: &self.sentiment_uc,
            news: &self.news_uc,
            classify: &self.classify_uc,
            reports: &self.reports_uc,
        }
        .render(session)
        .await
    }
}
