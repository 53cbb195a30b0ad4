//! Feed retrieval and parsing.
//!
//! One request per configured feed, issued concurrently; a minimal RSS 2.0
//! item extractor turns each payload into matchable items. Individual feed
//! failures are isolated and reported, never fatal.

pub mod fetch;
pub mod parse;

/// The compiled-in feed list. Override per run with `--feed`.
pub const DEFAULT_FEEDS: &[&str] = &[
    "http://rss.sueddeutsche.de/app/service/rss/alles/index.rss?output=rss",
    "http://www.tagesschau.de/xml/rss2",
    "http://www.spiegel.de/schlagzeilen/index.rss",
    "http://newsfeed.zeit.de/all",
    "http://www.faz.net/rss/aktuell",
    "http://www.taz.de/!p4608;rss/",
    "http://www.welt.de/?service=Rss",
    "http://www.handelsblatt.com/contentexport/feed/schlagzeilen",
];

/// Site identifier for a feed URL: the second dot-separated component.
///
/// Somewhat primitive, but more useful than the feeds' own `<title>`
/// elements. Falls back to the whole URL when there is no second
/// component.
pub fn site_of(url: &str) -> String {
    url.split('.').nth(1).unwrap_or(url).to_string()
}

/// A feed item with the fields the report needs.
#[derive(Debug, Clone)]
pub struct FeedItem {
    /// Unique identifier; doubles as the item link.
    pub guid: String,
    pub title: String,
    /// Raw publish date as it appeared in the feed.
    pub date: String,
    /// Plain-text body, markup stripped.
    pub body: String,
}
