use clap::Parser;
use marketpulse::cli::commands::{Cli, Commands};
use marketpulse::config::Config;
use marketpulse::domain::entities::session::Session;
use marketpulse::domain::values::role::Role;
use marketpulse::MarketPulse;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    let mp = match MarketPulse::new(config) {
        Ok(mp) => mp,
        Err(e) => {
            eprintln!("Error initializing MarketPulse: {e}");
            std::process::exit(1);
        }
    };

    let session = match build_session(cli.user.or_else(|| mp.config().user.clone()), &cli.role) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(mp, &session, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn build_session(user: Option<String>, role: &str) -> Result<Session, String> {
    let role: Role = role.parse()?;
    Ok(match user {
        Some(u) if !u.trim().is_empty() => Session::authenticated(u.trim(), role),
        _ => Session::anonymous(),
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_command(
    mp: MarketPulse,
    session: &Session,
    cmd: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Dashboard => {
            let dashboard = mp.dashboard(session).await;
            print_json(&dashboard)?;
        }
        Commands::Prices => {
            let data = mp.market_data().await;
            for symbol in data.unavailable_symbols() {
                eprintln!("⚠️  {symbol}: price history unavailable");
            }
            print_json(&data.metrics())?;
        }
        Commands::Sentiment => {
            let score = mp.sentiment().await;
            print_json(&serde_json::json!({
                "value": score.value(),
                "provenance": score.provenance(),
                "band": score.band().to_string(),
                "color": score.band().color(),
            }))?;
        }
        Commands::News { limit, show_failed } => {
            let digest = mp.news().await;
            if show_failed && !digest.failed_feeds.is_empty() {
                eprintln!("Failed feeds: {}", digest.failed_feeds.join(", "));
            }
            let headlines: Vec<_> = digest
                .top(limit)
                .iter()
                .map(|item| {
                    let sentiment = mp.classify(&item.title);
                    serde_json::json!({
                        "tier": sentiment.tier.to_string(),
                        "polarity": sentiment.polarity,
                        "source": item.source,
                        "title": item.title,
                        "time": item.time_label,
                        "link": item.link,
                    })
                })
                .collect();
            print_json(&headlines)?;
        }
        Commands::Classify { text } => {
            let sentiment = mp.classify(&text);
            print_json(&serde_json::json!({
                "polarity": sentiment.polarity,
                "tier": sentiment.tier.to_string(),
                "color": sentiment.tier.color(),
            }))?;
        }
        Commands::Analyze => {
            let outcome = mp.analyze(session).await?;
            if let Some(warning) = &outcome.warning {
                eprintln!("⚠️  {warning}");
            }
            println!("{}", outcome.report.content);
        }
        Commands::Reports { latest } => {
            if latest {
                match mp.latest_report(session)? {
                    Some(report) => print_json(&report)?,
                    None => println!("No reports yet"),
                }
            } else {
                print_json(&mp.reports(session)?)?;
            }
        }
        Commands::ReportStats => {
            print_json(&mp.report_stats(session)?)?;
        }
    }
    Ok(())
}
