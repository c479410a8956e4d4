//! Runtime configuration from `MARKETPULSE_*` environment variables.

use crate::domain::entities::news_item::FeedSpec;
use crate::domain::error::DomainError;
use crate::domain::values::lookback::Lookback;
use crate::domain::values::rsi::DEFAULT_WINDOW;
use crate::infrastructure::llm::openai_chat::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use std::str::FromStr;
use std::time::Duration;

pub const VIX_SYMBOL: &str = "^VIX";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite path, or a `.json` path for the file-backed report log.
    pub db_path: String,
    pub symbols: Vec<String>,
    pub include_vix: bool,
    /// Instrument whose RSI stands in when the sentiment index is down.
    pub reference_symbol: String,
    pub lookback: Lookback,
    pub rsi_window: usize,
    pub news_display_limit: usize,
    pub llm_context_limit: usize,
    pub dedup_news: bool,
    pub admin_panel: bool,
    pub feeds: Vec<FeedSpec>,
    pub http_timeout: Duration,
    pub llm_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    /// Default principal when the CLI is not given `--user`.
    pub user: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "./marketpulse.db".into(),
            symbols: vec!["SPY".into(), "QQQ".into(), "IEF".into()],
            include_vix: false,
            reference_symbol: "SPY".into(),
            lookback: Lookback::default(),
            rsi_window: DEFAULT_WINDOW,
            news_display_limit: 20,
            llm_context_limit: 10,
            dedup_news: false,
            admin_panel: true,
            feeds: default_feeds(),
            http_timeout: Duration::from_secs(10),
            llm_api_key: None,
            llm_base_url: DEFAULT_BASE_URL.into(),
            llm_model: DEFAULT_MODEL.into(),
            user: None,
        }
    }
}

pub fn default_feeds() -> Vec<FeedSpec> {
    vec![
        FeedSpec::new(
            "Goldman Sachs",
            "https://news.google.com/rss/search?q=Goldman+Sachs+outlook+when:7d&hl=en-US&gl=US&ceid=US:en",
        ),
        FeedSpec::new(
            "Morgan Stanley",
            "https://news.google.com/rss/search?q=Morgan+Stanley+market+outlook+when:7d&hl=en-US&gl=US&ceid=US:en",
        ),
        FeedSpec::new(
            "Market Risk",
            "https://news.google.com/rss/search?q=stock+market+crash+warning+when:2d&hl=en-US&gl=US&ceid=US:en",
        ),
    ]
}

impl Config {
    /// Loads `.env` (if present) and then the process environment.
    pub fn from_env() -> Result<Self, DomainError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = Config::default();

        if let Some(v) = get("MARKETPULSE_DB") {
            cfg.db_path = v;
        }
        if let Some(v) = get("MARKETPULSE_SYMBOLS") {
            cfg.symbols = parse_symbols(&v)?;
        }
        if let Some(v) = get("MARKETPULSE_INCLUDE_VIX") {
            cfg.include_vix = parse_bool("MARKETPULSE_INCLUDE_VIX", &v)?;
        }
        if let Some(v) = get("MARKETPULSE_REFERENCE_SYMBOL") {
            cfg.reference_symbol = v.to_uppercase();
        }
        if let Some(v) = get("MARKETPULSE_LOOKBACK") {
            cfg.lookback = v.parse().map_err(DomainError::Config)?;
        }
        if let Some(v) = get("MARKETPULSE_RSI_WINDOW") {
            cfg.rsi_window = parse_num("MARKETPULSE_RSI_WINDOW", &v)?;
        }
        if let Some(v) = get("MARKETPULSE_NEWS_LIMIT") {
            cfg.news_display_limit = parse_num("MARKETPULSE_NEWS_LIMIT", &v)?;
        }
        if let Some(v) = get("MARKETPULSE_LLM_CONTEXT") {
            cfg.llm_context_limit = parse_num("MARKETPULSE_LLM_CONTEXT", &v)?;
        }
        if let Some(v) = get("MARKETPULSE_DEDUP_NEWS") {
            cfg.dedup_news = parse_bool("MARKETPULSE_DEDUP_NEWS", &v)?;
        }
        if let Some(v) = get("MARKETPULSE_ADMIN_PANEL") {
            cfg.admin_panel = parse_bool("MARKETPULSE_ADMIN_PANEL", &v)?;
        }
        if let Some(v) = get("MARKETPULSE_FEEDS") {
            cfg.feeds = serde_json::from_str(&v)
                .map_err(|e| DomainError::Config(format!("MARKETPULSE_FEEDS: {e}")))?;
        }
        if let Some(v) = get("MARKETPULSE_HTTP_TIMEOUT_SECS") {
            let secs: u64 = parse_num("MARKETPULSE_HTTP_TIMEOUT_SECS", &v)?;
            if secs == 0 {
                return Err(DomainError::Config(
                    "MARKETPULSE_HTTP_TIMEOUT_SECS must be at least 1".into(),
                ));
            }
            cfg.http_timeout = Duration::from_secs(secs);
        }
        cfg.llm_api_key = get("MARKETPULSE_LLM_API_KEY");
        if let Some(v) = get("MARKETPULSE_LLM_BASE_URL") {
            cfg.llm_base_url = v;
        }
        if let Some(v) = get("MARKETPULSE_LLM_MODEL") {
            cfg.llm_model = v;
        }
        cfg.user = get("MARKETPULSE_USER");

        Ok(cfg)
    }

    /// Symbols to fetch this render pass, with VIX appended when enabled.
    pub fn instrument_symbols(&self) -> Vec<String> {
        let mut symbols = self.symbols.clone();
        if self.include_vix && !symbols.iter().any(|s| s == VIX_SYMBOL) {
            symbols.push(VIX_SYMBOL.to_string());
        }
        symbols
    }

    /// Instrument symbols plus the sentiment reference, fetched as one batch.
    pub fn fetch_symbols(&self) -> Vec<String> {
        let mut symbols = self.instrument_symbols();
        if !symbols
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&self.reference_symbol))
        {
            symbols.push(self.reference_symbol.clone());
        }
        symbols
    }
}

fn parse_symbols(raw: &str) -> Result<Vec<String>, DomainError> {
    let symbols: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();
    if symbols.is_empty() {
        return Err(DomainError::Config("MARKETPULSE_SYMBOLS is empty".into()));
    }
    Ok(symbols)
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, DomainError> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DomainError::Config(format!("{key}: expected a boolean, got {raw}"))),
    }
}

fn parse_num<T: FromStr>(key: &str, raw: &str) -> Result<T, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::Config(format!("{key}: expected a number, got {raw}")))
}
