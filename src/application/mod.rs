pub mod analyze;
pub mod cache;
pub mod classify;
pub mod dashboard;
pub mod market_data;
pub mod news;
pub mod reports;
pub mod sentiment;
