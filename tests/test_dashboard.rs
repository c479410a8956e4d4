//! End-to-end render passes: prices, gauge, classified news and report panels.

mod common;

use common::{downtrend, entry, setup, setup_with, test_config, StubIndex, StubModel, StubNews, StubPrices, Stubs};
use marketpulse::application::dashboard::Section;
use marketpulse::domain::entities::session::Session;
use marketpulse::domain::values::rsi::latest_rsi;
use marketpulse::domain::values::sentiment_score::{GaugeBand, Provenance};
use marketpulse::domain::values::role::Role;

fn market() -> StubPrices {
    StubPrices::with(&[
        ("SPY", downtrend(20)),
        ("QQQ", vec![430.0, 431.5]),
        ("IEF", vec![95.0, 94.8]),
    ])
}

fn news() -> StubNews {
    StubNews::with(vec![
        ("A", vec![entry("Market crash warning as recession fears grow", Some(200))]),
        ("B", vec![entry("Stocks rally to record high on strong earnings", Some(100))]),
    ])
}

#[tokio::test]
async fn test_degraded_render_uses_technical_proxy() {
    let s = Stubs::new(market(), StubIndex::down(), news());
    let mp = setup(&s);
    let user = Session::authenticated("alice", Role::User);

    let dash = mp.dashboard(&user).await;

    assert_eq!(dash.sentiment.provenance, Provenance::TechnicalProxy);
    assert_eq!(dash.sentiment.value, latest_rsi(&downtrend(20), 14));
    assert!(dash.sentiment.value < 50.0);
    assert_eq!(dash.sentiment.band, GaugeBand::for_value(dash.sentiment.value));
    assert_eq!(dash.sentiment.color, dash.sentiment.band.color());

    assert_eq!(dash.market.metrics.len(), 3);
    assert!(dash.market.unavailable.is_empty());
    let spy_osc = dash
        .market
        .oscillators
        .iter()
        .find(|(sym, _)| sym == "SPY")
        .map(|(_, v)| *v)
        .unwrap();
    assert_eq!(spy_osc, dash.sentiment.value);

    assert_eq!(dash.news.total, 2);
    assert_eq!(
        dash.news.headlines[0].item.title,
        "Market crash warning as recession fears grow"
    );

    assert!(matches!(dash.latest_report, Section::Ready(None)));
    assert!(dash.admin.is_none());
}

#[tokio::test]
async fn test_external_index_shown_when_available() {
    let s = Stubs::new(market(), StubIndex::ok(18.0), news());
    let mp = setup(&s);

    let dash = mp.dashboard(&Session::authenticated("alice", Role::User)).await;
    assert_eq!(dash.sentiment.provenance, Provenance::ExternalIndex);
    assert_eq!(dash.sentiment.value, 18.0);
    assert_eq!(dash.sentiment.band, GaugeBand::ExtremeFear);
    assert_eq!(dash.sentiment.band_label, "extreme fear");
}

#[tokio::test]
async fn test_everything_down_still_renders() {
    let s = Stubs::new(StubPrices::default(), StubIndex::down(), StubNews::default());
    let mp = setup(&s);

    let dash = mp.dashboard(&Session::anonymous()).await;
    assert_eq!(dash.market.unavailable.len(), 3);
    assert!(dash.market.metrics.iter().all(|m| m.metric.value == 0.0));
    assert_eq!(dash.sentiment.value, 50.0);
    assert_eq!(dash.news.total, 0);
    assert_eq!(dash.news.failed_feeds.len(), 2);
    // anonymous viewers get an unavailable report panel, not an error
    assert!(matches!(dash.latest_report, Section::Unavailable(_)));
}

#[tokio::test]
async fn test_admin_panel_for_admins_only() {
    let s = Stubs::new(market(), StubIndex::down(), news())
        .with_model(StubModel::replying("Briefing."));
    let mp = setup(&s);
    let admin = Session::authenticated("root", Role::Admin);
    mp.analyze(&admin).await.unwrap();

    let dash = mp.dashboard(&admin).await;
    let stats = dash.admin.as_ref().and_then(|s| s.ready()).unwrap();
    assert_eq!(stats.total_reports, 1);
    match &dash.latest_report {
        Section::Ready(Some(r)) => assert_eq!(r.content, "Briefing."),
        other => panic!("unexpected report panel: {other:?}"),
    }

    let mut config = test_config();
    config.admin_panel = false;
    let mp = setup_with(config, &s);
    assert!(mp.dashboard(&admin).await.admin.is_none());
}

#[tokio::test]
async fn test_dashboard_serializes() {
    let s = Stubs::new(market(), StubIndex::ok(64.0), news());
    let mp = setup(&s);

    let dash = mp.dashboard(&Session::authenticated("alice", Role::User)).await;
    let json = serde_json::to_value(&dash).unwrap();
    assert_eq!(json["sentiment"]["provenance"], "external-index");
    assert_eq!(json["latest_report"]["status"], "ready");
    assert!(json.get("admin").is_none());
    assert_eq!(json["news"]["headlines"][0]["source"], "A");
}
