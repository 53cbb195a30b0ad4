//! Terminal report rendering: ANSI palette, humanized dates, and the
//! per-feed output blocks.
//!
//! Rendering is a pure string concern so the whole report can be asserted
//! in tests; `main` only decides where each piece is printed.

use chrono::{DateTime, Utc};

use crate::feed::FeedItem;
use crate::highlight::{HIGHLIGHT_BEGIN, HIGHLIGHT_END};

// ── Palette ────────────────────────────────────────────────────────

const SITE: &str = "\x1b[96m";
const META: &str = "\x1b[92m";
const MATCH: &str = "\x1b[93m";
const ALERT: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

/// ANSI escape palette behind a single enable flag. With color disabled
/// every method returns plain text, so correctness never depends on the
/// terminal.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Site names.
    pub fn site(&self, text: &str) -> String {
        self.paint(SITE, text)
    }

    /// Item metadata: titles, links, dates.
    pub fn meta(&self, text: &str) -> String {
        self.paint(META, text)
    }

    /// Failure summaries.
    pub fn alert(&self, text: &str) -> String {
        self.paint(ALERT, text)
    }

    /// Replace highlight markers with match-color escapes, or strip them
    /// when color is disabled.
    pub fn render_highlights(&self, line: &str) -> String {
        let (begin, end) = if self.enabled { (MATCH, RESET) } else { ("", "") };
        line.replace(HIGHLIGHT_BEGIN, begin)
            .replace(HIGHLIGHT_END, end)
    }
}

// ── Humanized dates ────────────────────────────────────────────────

/// Humanized age of an RFC 2822 timestamp relative to `now`.
///
/// Falls back to the raw input when the date does not parse.
pub fn humanize_date(raw: &str, now: DateTime<Utc>) -> String {
    match DateTime::parse_from_rfc2822(raw.trim()) {
        Ok(then) => humanize_age(now.signed_duration_since(then.with_timezone(&Utc))),
        Err(_) => raw.trim().to_string(),
    }
}

fn humanize_age(age: chrono::Duration) -> String {
    if age < chrono::Duration::zero() {
        return "in the future".to_string();
    }
    let secs = age.num_seconds();
    if secs < 60 {
        return "just now".to_string();
    }
    let (count, unit) = if secs < 3_600 {
        (secs / 60, "minute")
    } else if secs < 86_400 {
        (secs / 3_600, "hour")
    } else if secs < 30 * 86_400 {
        (secs / 86_400, "day")
    } else if secs < 365 * 86_400 {
        (secs / (30 * 86_400), "month")
    } else {
        (secs / (365 * 86_400), "year")
    };
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

// ── Report blocks ──────────────────────────────────────────────────

/// One matched feed, ready for printing.
#[derive(Debug)]
pub struct FeedReport {
    pub site: String,
    pub items: Vec<ItemReport>,
}

/// One matched item: its metadata plus the highlighted line.
#[derive(Debug)]
pub struct ItemReport {
    pub item: FeedItem,
    pub highlighted: String,
}

/// Format a feed block: site header, then one block per item, blank lines
/// between them.
pub fn format_feed(report: &FeedReport, palette: &Palette, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str(&format!("Site: {}\n", palette.site(&report.site)));
    for entry in &report.items {
        out.push_str(&format!("In:   {}\n", palette.meta(&entry.item.title)));
        out.push_str(&format!("Link: {}\n", palette.meta(&entry.item.guid)));
        out.push_str(&format!(
            "Date: {}\n",
            palette.meta(&humanize_date(&entry.item.date, now))
        ));
        out.push_str(&palette.render_highlights(&entry.highlighted));
        out.push_str("\n\n");
    }
    out
}

/// Trailing summary for feeds that had no matches. `None` when empty.
pub fn format_nothing_found(sites: &[String], palette: &Palette) -> Option<String> {
    if sites.is_empty() {
        return None;
    }
    Some(format!("Nothing found in: {}", palette.site(&sites.join(" "))))
}

/// Trailing summary for feeds whose retrieval failed. `None` when empty.
pub fn format_lookup_failed(sites: &[String], palette: &Palette) -> Option<String> {
    if sites.is_empty() {
        return None;
    }
    Some(format!(
        "Lookup failed for: {}",
        palette.alert(&sites.join(" "))
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 24, 12, 0, 0).unwrap()
    }

    fn plain() -> Palette {
        Palette::new(false)
    }

    #[test]
    fn ages_humanize_by_tier() {
        let cases = [
            ("Mon, 24 Aug 2026 11:59:30 +0000", "just now"),
            ("Mon, 24 Aug 2026 11:45:00 +0000", "15 minutes ago"),
            ("Mon, 24 Aug 2026 11:00:00 +0000", "1 hour ago"),
            ("Sun, 23 Aug 2026 10:00:00 +0000", "1 day ago"),
            ("Fri, 24 Jul 2026 12:00:00 +0000", "1 month ago"),
            ("Sat, 24 Aug 2024 12:00:00 +0000", "2 years ago"),
        ];
        for (raw, expected) in cases {
            assert_eq!(humanize_date(raw, now()), expected, "raw: {raw}");
        }
    }

    #[test]
    fn future_dates_are_called_out() {
        assert_eq!(
            humanize_date("Tue, 25 Aug 2026 12:00:00 +0000", now()),
            "in the future"
        );
    }

    #[test]
    fn unparseable_date_falls_back_to_raw() {
        assert_eq!(humanize_date("yesterday-ish", now()), "yesterday-ish");
    }

    #[test]
    fn timezone_offsets_are_respected() {
        // 13:30 at +0200 is 11:30 UTC
        assert_eq!(
            humanize_date("Mon, 24 Aug 2026 13:30:00 +0200", now()),
            "30 minutes ago"
        );
    }

    #[test]
    fn disabled_palette_is_plain() {
        let p = plain();
        assert_eq!(p.site("taz"), "taz");
        assert_eq!(p.alert("boom"), "boom");
    }

    #[test]
    fn enabled_palette_wraps_with_escapes() {
        let p = Palette::new(true);
        assert_eq!(p.site("taz"), "\x1b[96mtaz\x1b[0m");
    }

    #[test]
    fn highlight_markers_render_as_match_color() {
        let p = Palette::new(true);
        let line = format!("a {HIGHLIGHT_BEGIN}b{HIGHLIGHT_END} c");
        assert_eq!(p.render_highlights(&line), "a \x1b[93mb\x1b[0m c");
    }

    #[test]
    fn highlight_markers_strip_without_color() {
        let line = format!("a {HIGHLIGHT_BEGIN}b{HIGHLIGHT_END} c");
        assert_eq!(plain().render_highlights(&line), "a b c");
    }

    #[test]
    fn feed_block_lists_every_item() {
        let report = FeedReport {
            site: "tagesschau".to_string(),
            items: vec![ItemReport {
                item: FeedItem {
                    guid: "http://x/1".to_string(),
                    title: "Headline".to_string(),
                    date: "Mon, 24 Aug 2026 11:00:00 +0000".to_string(),
                    body: String::new(),
                },
                highlighted: "context match context".to_string(),
            }],
        };
        let block = format_feed(&report, &plain(), now());
        assert_eq!(
            block,
            "Site: tagesschau\n\
             In:   Headline\n\
             Link: http://x/1\n\
             Date: 1 hour ago\n\
             context match context\n\n"
        );
    }

    #[test]
    fn summaries_are_none_when_empty() {
        assert!(format_nothing_found(&[], &plain()).is_none());
        assert!(format_lookup_failed(&[], &plain()).is_none());
    }

    #[test]
    fn summaries_join_sites_with_spaces() {
        let sites = vec!["faz".to_string(), "taz".to_string()];
        assert_eq!(
            format_nothing_found(&sites, &plain()).unwrap(),
            "Nothing found in: faz taz"
        );
        assert_eq!(
            format_lookup_failed(&sites, &plain()).unwrap(),
            "Lookup failed for: faz taz"
        );
    }
}
