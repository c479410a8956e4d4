use super::{http_client, FeedError, NewsSource, DEFAULT_TIMEOUT};
use crate::domain::entities::news_item::{FeedEntry, FeedSpec};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roxmltree::{Document, Node, ParsingOptions};
use std::time::Duration;

/// Fetches RSS 2.0 or Atom documents over HTTP.
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
        }
    }
}

impl Default for HttpFeedSource {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl NewsSource for HttpFeedSource {
    fn name(&self) -> &str {
        "http_feed"
    }

    async fn fetch(&self, feed: &FeedSpec) -> Result<Vec<FeedEntry>, FeedError> {
        let resp = self
            .client
            .get(&feed.url)
            .header("Accept", "application/rss+xml, application/atom+xml, application/xml;q=0.9, */*;q=0.8")
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FeedError::Network(format!(
                "Feed {} returned {}",
                feed.name,
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;
        parse_feed(&body)
    }
}

/// Parses an RSS `<item>` list or an Atom `<entry>` list.
///
/// Entries without a title are skipped. A missing or unparseable date leaves
/// `published` empty rather than failing the whole document.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, FeedError> {
    let mut opts = ParsingOptions::default();
    opts.allow_dtd = true;
    let doc = Document::parse_with_options(xml, opts).map_err(|e| FeedError::Parse(e.to_string()))?;

    let root = doc.root_element();
    match root.tag_name().name() {
        "rss" | "RDF" | "feed" => {}
        other => return Err(FeedError::Parse(format!("Not a feed document: <{other}>"))),
    }

    let entries = root
        .descendants()
        .filter(|n| n.is_element() && matches!(n.tag_name().name(), "item" | "entry"))
        .filter_map(parse_entry)
        .collect();
    Ok(entries)
}

fn parse_entry(node: Node) -> Option<FeedEntry> {
    let title = child_text(node, "title")?;
    if title.is_empty() {
        return None;
    }

    let link = child_link(node).unwrap_or_default();

    let published = ["pubDate", "published", "updated", "date"]
        .iter()
        .find_map(|tag| child_text(node, tag).and_then(|raw| parse_date(&raw)));

    Some(FeedEntry {
        title,
        link,
        published,
    })
}

fn child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}

fn child_text(node: Node, name: &str) -> Option<String> {
    let el = child(node, name)?;
    let text: String = el
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    Some(text.trim().to_string())
}

/// RSS carries the URL as text; Atom puts it in `href`, preferring `rel="alternate"`.
fn child_link(node: Node) -> Option<String> {
    let links: Vec<Node> = node
        .children()
        .filter(|c| c.is_element() && c.tag_name().name() == "link")
        .collect();

    if let Some(href) = links
        .iter()
        .filter(|l| matches!(l.attribute("rel"), None | Some("alternate")))
        .find_map(|l| l.attribute("href"))
    {
        return Some(href.trim().to_string());
    }

    links
        .iter()
        .filter_map(|l| l.text())
        .map(|t| t.trim().to_string())
        .find(|t| !t.is_empty())
}

/// RFC 2822 (RSS) or RFC 3339 (Atom), normalised to UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
