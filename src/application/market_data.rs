use crate::application::cache::{cache_key, TtlCache, PRICE_TTL};
use crate::domain::entities::price_series::{Metric, PriceSeries};
use crate::domain::values::lookback::Lookback;
use crate::infrastructure::feeds::PriceSource;
use serde::Serialize;
use std::sync::Arc;

/// Price histories for one symbol set and window, in request order.
#[derive(Debug, Clone, Serialize)]
pub struct MarketData {
    pub lookback: Lookback,
    pub series: Vec<PriceSeries>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolMetric {
    pub symbol: String,
    #[serde(flatten)]
    pub metric: Metric,
    /// False when fewer than two closes were available.
    pub has_change: bool,
}

impl MarketData {
    pub fn get(&self, symbol: &str) -> Option<&PriceSeries> {
        self.series.iter().find(|s| s.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn metrics(&self) -> Vec<SymbolMetric> {
        self.series
            .iter()
            .map(|s| SymbolMetric {
                symbol: s.symbol.clone(),
                metric: s.metric(),
                has_change: s.has_change_data(),
            })
            .collect()
    }

    pub fn unavailable_symbols(&self) -> Vec<String> {
        self.series
            .iter()
            .filter(|s| !s.available)
            .map(|s| s.symbol.clone())
            .collect()
    }
}

pub struct MarketDataUseCase {
    source: Arc<dyn PriceSource>,
    cache: TtlCache<MarketData>,
}

impl MarketDataUseCase {
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self {
            source,
            cache: TtlCache::new(PRICE_TTL),
        }
    }

    /// Fetches every symbol in turn. A symbol that fails comes back as an
    /// unavailable series; this never returns an error.
    pub async fn execute(&self, symbols: &[String], lookback: Lookback) -> MarketData {
        let key = cache_key("prices", &[symbols.join(",").as_str(), lookback.to_string().as_str()]);
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(%key, "price cache hit");
            return hit;
        }

        let mut series = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            match self.source.history(symbol, lookback).await {
                Ok(s) => series.push(s),
                Err(e) => {
                    tracing::warn!(symbol = %symbol, source = self.source.name(), error = %e, "price history unavailable");
                    series.push(PriceSeries::unavailable(symbol.clone()));
                }
            }
        }

        let data = MarketData { lookback, series };
        self.cache.put(key, data.clone());
        data
    }
}
