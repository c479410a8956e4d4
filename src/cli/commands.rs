use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "marketpulse", about = "Market risk dashboard: prices, sentiment gauge, classified news, AI briefings")]
pub struct Cli {
    /// Authenticated principal (falls back to MARKETPULSE_USER)
    #[arg(long, global = true)]
    pub user: Option<String>,
    /// Role of the principal (user, admin)
    #[arg(long, global = true, default_value = "user")]
    pub role: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one full render pass and print every section
    Dashboard,
    /// Latest close and change for each configured instrument
    Prices,
    /// Sentiment gauge (external index, or technical proxy)
    Sentiment,
    /// Aggregated, classified headlines, newest first
    News {
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Include feeds that failed to load
        #[arg(long)]
        show_failed: bool,
    },
    /// Classify a piece of text
    Classify {
        text: String,
    },
    /// Ask the language model for a risk briefing and store it
    Analyze,
    /// Stored briefings, oldest first
    Reports {
        /// Only the most recent briefing
        #[arg(long)]
        latest: bool,
    },
    /// Report log statistics (admin only)
    ReportStats,
}
