use crate::application::cache::{cache_key, TtlCache, SENTIMENT_INDEX_TTL};
use crate::domain::entities::price_series::PriceSeries;
use crate::domain::values::rsi::latest_rsi;
use crate::domain::values::sentiment_score::SentimentScore;
use crate::infrastructure::feeds::SentimentIndexSource;
use std::sync::Arc;

/// Resolves the market sentiment gauge: the published index when it can be
/// fetched, otherwise the reference instrument's RSI.
pub struct SentimentUseCase {
    index: Arc<dyn SentimentIndexSource>,
    cache: TtlCache<SentimentScore>,
}

impl SentimentUseCase {
    pub fn new(index: Arc<dyn SentimentIndexSource>) -> Self {
        Self {
            index,
            cache: TtlCache::new(SENTIMENT_INDEX_TTL),
        }
    }

    /// One attempt at the external index. Any failure reads as `None`.
    /// Only successful readings are cached.
    pub async fn external(&self) -> Option<SentimentScore> {
        let key = cache_key("sentiment_index", &[self.index.name()]);
        if let Some(hit) = self.cache.get(&key) {
            return Some(hit);
        }

        let score = match self.index.latest_score().await {
            Ok(raw) => match SentimentScore::external(raw.trunc()) {
                Ok(score) => score,
                Err(e) => {
                    tracing::warn!(source = self.index.name(), error = %e, "sentiment index malformed");
                    return None;
                }
            },
            Err(e) => {
                tracing::warn!(source = self.index.name(), error = %e, "sentiment index unavailable");
                return None;
            }
        };

        self.cache.put(key, score);
        Some(score)
    }

    /// External index first; on failure, RSI of `reference` over `window`.
    pub async fn resolve(&self, reference: &PriceSeries, window: usize) -> SentimentScore {
        if let Some(score) = self.external().await {
            return score;
        }
        let proxy = technical_proxy(reference, window);
        tracing::info!(
            symbol = %reference.symbol,
            value = proxy.value(),
            "using technical proxy for sentiment"
        );
        proxy
    }
}

/// Fallback reading; never cached here, it follows the price data's lifetime.
pub fn technical_proxy(reference: &PriceSeries, window: usize) -> SentimentScore {
    SentimentScore::technical_proxy(latest_rsi(&reference.closes(), window))
}
