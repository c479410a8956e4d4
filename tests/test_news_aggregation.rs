mod common;

use common::{entry, setup, setup_with, test_config, StubIndex, StubNews, StubPrices, Stubs};
use marketpulse::domain::entities::news_item::{FeedSpec, UNKNOWN_TIME};
use marketpulse::domain::values::sentiment_tier::SentimentTier;

fn stubs(news: StubNews) -> Stubs {
    Stubs::new(StubPrices::default(), StubIndex::down(), news)
}

#[tokio::test]
async fn test_feeds_merged_newest_first() {
    let s = stubs(StubNews::with(vec![
        ("A", vec![entry("a-old", Some(100)), entry("a-new", Some(300))]),
        ("B", vec![entry("b-mid", Some(200))]),
    ]));
    let mp = setup(&s);

    let digest = mp.news().await;
    let ts: Vec<i64> = digest.items.iter().map(|i| i.timestamp).collect();
    assert_eq!(ts, vec![300, 200, 100]);
    let sources: Vec<&str> = digest.items.iter().map(|i| i.source.as_str()).collect();
    assert_eq!(sources, vec!["A", "B", "A"]);
    assert!(digest.failed_feeds.is_empty());
}

#[tokio::test]
async fn test_malformed_feed_skipped() {
    // B is not registered with the stub, so it fails to parse.
    let s = stubs(StubNews::with(vec![(
        "A",
        vec![entry("only", Some(10)), entry("other", Some(20))],
    )]));
    let mp = setup(&s);

    let digest = mp.news().await;
    assert_eq!(digest.items.len(), 2);
    assert_eq!(digest.failed_feeds, vec!["B".to_string()]);
}

#[tokio::test]
async fn test_all_feeds_down_is_empty() {
    let mp = setup(&stubs(StubNews::default()));

    let digest = mp.news().await;
    assert!(digest.items.is_empty());
    assert_eq!(digest.failed_feeds.len(), 2);
    assert!(mp.headlines(20).await.is_empty());
}

#[tokio::test]
async fn test_undated_entries_last_with_label() {
    let s = stubs(StubNews::with(vec![
        ("A", vec![entry("undated", None)]),
        ("B", vec![entry("dated", Some(1_700_000_000))]),
    ]));
    let mp = setup(&s);

    let digest = mp.news().await;
    assert_eq!(digest.items[0].title, "dated");
    assert_eq!(digest.items[0].time_label, "2023-11-14 22:13");
    let last = digest.items.last().unwrap();
    assert_eq!(last.title, "undated");
    assert_eq!(last.timestamp, 0);
    assert_eq!(last.time_label, UNKNOWN_TIME);
}

#[tokio::test]
async fn test_duplicates_kept_unless_enabled() {
    let batches = || {
        StubNews::with(vec![
            ("A", vec![entry("Fed holds rates", Some(10))]),
            ("B", vec![entry("Fed holds rates", Some(20))]),
        ])
    };

    let mp = setup(&stubs(batches()));
    assert_eq!(mp.news().await.items.len(), 2);

    let mut config = test_config();
    config.dedup_news = true;
    let mp = setup_with(config, &stubs(batches()));
    let items = mp.news().await.items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].source, "B");
}

#[tokio::test]
async fn test_headlines_classified_and_bounded() {
    let s = stubs(StubNews::with(vec![
        (
            "A",
            vec![
                entry("Market crash warning as recession fears grow", Some(300)),
                entry("Fed meeting on Tuesday", Some(100)),
            ],
        ),
        (
            "B",
            vec![entry("Stocks rally to record high on strong earnings", Some(200))],
        ),
    ]));
    let mp = setup(&s);

    let headlines = mp.headlines(2).await;
    assert_eq!(headlines.len(), 2);

    assert_eq!(headlines[0].sentiment.tier, SentimentTier::ExtremelyNegative);
    assert_eq!(headlines[0].color, "red");
    assert!(headlines[1].sentiment.tier > SentimentTier::Neutral);
    assert_eq!(headlines[1].color, "green");
}

#[tokio::test]
async fn test_neutral_text_classified_neutral() {
    let mp = setup(&stubs(StubNews::default()));

    let s = mp.classify("Fed meeting on Tuesday");
    assert_eq!(s.polarity, 0.0);
    assert_eq!(s.tier, SentimentTier::Neutral);

    let s = mp.classify("");
    assert_eq!(s.tier, SentimentTier::Neutral);
}

#[tokio::test]
async fn test_custom_feed_list() {
    let mut config = test_config();
    config.feeds = vec![FeedSpec::new("Solo", "https://feeds.test/solo")];
    let s = stubs(StubNews::with(vec![
        ("Solo", vec![entry("solo item", Some(5))]),
        ("A", vec![entry("never fetched", Some(9))]),
    ]));
    let mp = setup_with(config, &s);

    let digest = mp.news().await;
    assert_eq!(digest.items.len(), 1);
    assert_eq!(digest.items[0].source, "Solo");
}
