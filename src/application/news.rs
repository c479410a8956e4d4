use crate::domain::entities::news_item::{FeedEntry, FeedSpec, NewsItem};
use crate::infrastructure::feeds::NewsSource;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Headlines merged from every configured feed, newest first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewsDigest {
    pub items: Vec<NewsItem>,
    /// Feeds that contributed nothing because their fetch failed.
    pub failed_feeds: Vec<String>,
}

impl NewsDigest {
    pub fn top(&self, n: usize) -> &[NewsItem] {
        &self.items[..n.min(self.items.len())]
    }
}

pub struct NewsUseCase {
    source: Arc<dyn NewsSource>,
    feeds: Vec<FeedSpec>,
    dedup: bool,
}

impl NewsUseCase {
    pub fn new(source: Arc<dyn NewsSource>, feeds: Vec<FeedSpec>, dedup: bool) -> Self {
        Self {
            source,
            feeds,
            dedup,
        }
    }

    /// Fetches each feed in turn; one feed failing does not affect the rest.
    pub async fn aggregate(&self) -> NewsDigest {
        let mut batches = Vec::with_capacity(self.feeds.len());
        let mut failed_feeds = Vec::new();

        for feed in &self.feeds {
            match self.source.fetch(feed).await {
                Ok(entries) => {
                    tracing::debug!(feed = %feed.name, count = entries.len(), "feed fetched");
                    batches.push((feed.name.clone(), entries));
                }
                Err(e) => {
                    tracing::warn!(feed = %feed.name, error = %e, "feed unavailable");
                    failed_feeds.push(feed.name.clone());
                }
            }
        }

        NewsDigest {
            items: merge_feeds(batches, self.dedup),
            failed_feeds,
        }
    }
}

/// Flattens per-feed entries and sorts them newest first.
///
/// The sort is stable, so equal timestamps keep feed order then entry order.
/// Entries with no publish time always come after dated ones. With `dedup`,
/// later items whose normalised title was already seen are dropped.
pub fn merge_feeds(batches: Vec<(String, Vec<FeedEntry>)>, dedup: bool) -> Vec<NewsItem> {
    let mut items: Vec<NewsItem> = batches
        .into_iter()
        .flat_map(|(source, entries)| {
            entries
                .into_iter()
                .map(move |entry| NewsItem::from_entry(&source, entry))
        })
        .collect();

    items.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));

    if dedup {
        let mut seen = HashSet::new();
        items.retain(|item| seen.insert(normalize_title(&item.title)));
    }
    items
}

fn sort_key(item: &NewsItem) -> Option<i64> {
    item.published_at.map(|_| item.timestamp)
}

fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn entry(title: &str, ts: Option<i64>) -> FeedEntry {
        FeedEntry {
            title: title.to_string(),
            link: format!("https://example.com/{}", title.replace(' ', "-")),
            published: ts.and_then(|t| DateTime::from_timestamp(t, 0)),
        }
    }

    #[test]
    fn test_merge_orders_descending() {
        let merged = merge_feeds(
            vec![
                ("A".into(), vec![entry("a1", Some(100)), entry("a3", Some(300))]),
                ("B".into(), vec![entry("b2", Some(200))]),
            ],
            false,
        );
        let ts: Vec<i64> = merged.iter().map(|i| i.timestamp).collect();
        assert_eq!(ts, vec![300, 200, 100]);
        assert_eq!(merged[1].source, "B");
    }

    #[test]
    fn test_unknown_time_sorts_last() {
        let merged = merge_feeds(
            vec![
                ("A".into(), vec![entry("undated", None), entry("old", Some(1))]),
                ("B".into(), vec![entry("new", Some(500))]),
            ],
            false,
        );
        assert_eq!(merged.last().unwrap().title, "undated");
        assert_eq!(merged.last().unwrap().timestamp, 0);
        assert_eq!(merged.last().unwrap().time_label, "unknown time");
    }

    #[test]
    fn test_pre_epoch_still_before_unknown() {
        let merged = merge_feeds(
            vec![("A".into(), vec![entry("undated", None), entry("ancient", Some(-86_400))])],
            false,
        );
        assert_eq!(merged[0].title, "ancient");
    }

    #[test]
    fn test_ties_keep_fetch_order() {
        let merged = merge_feeds(
            vec![
                ("A".into(), vec![entry("first", Some(50)), entry("second", Some(50))]),
                ("B".into(), vec![entry("third", Some(50))]),
            ],
            false,
        );
        let titles: Vec<&str> = merged.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_duplicates_kept_by_default() {
        let batches = || {
            vec![
                ("A".into(), vec![entry("Stocks slide", Some(10))]),
                ("B".into(), vec![entry("stocks  SLIDE", Some(20))]),
            ]
        };
        assert_eq!(merge_feeds(batches(), false).len(), 2);

        let deduped = merge_feeds(batches(), true);
        assert_eq!(deduped.len(), 1);
        // newest copy survives
        assert_eq!(deduped[0].source, "B");
    }

    #[test]
    fn test_top_is_bounded() {
        let digest = NewsDigest {
            items: merge_feeds(vec![("A".into(), vec![entry("x", Some(1)), entry("y", Some(2))])], false),
            failed_feeds: vec![],
        };
        assert_eq!(digest.top(10).len(), 2);
        assert_eq!(digest.top(1)[0].title, "y");
        assert!(digest.top(0).is_empty());
    }
}
