pub mod analysis_report;
pub mod news_item;
pub mod price_series;
pub mod session;
