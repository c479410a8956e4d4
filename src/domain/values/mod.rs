pub mod lookback;
pub mod polarity;
pub mod role;
pub mod rsi;
pub mod sentiment_score;
pub mod sentiment_tier;
