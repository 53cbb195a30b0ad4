//! Minimal RSS 2.0 item extraction.
//!
//! The configured feeds all serve RSS 2.0, so a case-insensitive tag
//! scanner is enough: `<item>` blocks with `guid`, `title`, `pubDate`,
//! `content:encoded`, and `description` children, CDATA unwrapping, and
//! entity decoding. Some sources ship full HTML inside their body fields,
//! so every body is stripped of nested markup before matching.

use tracing::warn;

use super::FeedItem;
use crate::highlight::Pattern;

/// Parse feed markup and return the items whose body matches `pattern`,
/// deduplicated and sorted by guid.
///
/// The body prefers the richer `content:encoded` field over `description`.
/// An item with neither has an empty body and never matches. Items missing
/// a guid, title, or date are skipped with a warning.
pub fn matching_items(xml: &str, pattern: &Pattern) -> Vec<FeedItem> {
    let mut items: Vec<FeedItem> = Vec::new();
    for block in item_blocks(xml) {
        let (Some(guid), Some(title), Some(date)) = (
            tag_text(block, "guid"),
            tag_text(block, "title"),
            tag_text(block, "pubDate"),
        ) else {
            warn!("skipping feed item missing guid, title, or pubDate");
            continue;
        };

        let body = tag_text(block, "content:encoded")
            .or_else(|| tag_text(block, "description"))
            .map(|raw| strip_tags(&raw))
            .unwrap_or_default();

        if !pattern.is_match(&body) {
            continue;
        }
        if items.iter().any(|item| item.guid == guid) {
            continue;
        }
        items.push(FeedItem {
            guid,
            title,
            date,
            body,
        });
    }
    items.sort_by(|a, b| a.guid.cmp(&b.guid));
    items
}

/// Strip nested markup from a body field, leaving plain text.
///
/// Each removed tag becomes a single space so adjacent elements do not run
/// together; the tokenizer collapses the extra whitespace later.
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

// ── Tag scanning ───────────────────────────────────────────────────

/// All `<item>...</item>` blocks in document order.
fn item_blocks(xml: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut from = 0;
    while let Some(start) = find_ci(xml, "<item", from) {
        let after = start + "<item".len();
        match xml.as_bytes().get(after) {
            Some(c) if *c == b'>' || c.is_ascii_whitespace() => {}
            _ => {
                from = start + 1;
                continue;
            }
        }
        let Some(end) = find_ci(xml, "</item>", after) else {
            break;
        };
        blocks.push(&xml[start..end]);
        from = end + "</item>".len();
    }
    blocks
}

/// Text of the first `tag` child inside `block`: CDATA unwrapped, entities
/// decoded, whitespace trimmed.
fn tag_text(block: &str, tag: &str) -> Option<String> {
    let content_at = open_tag_end(block, tag)?;
    let close = format!("</{tag}>");
    let end = find_ci(block, &close, content_at)?;
    let inner = unwrap_cdata(block[content_at..end].trim());
    let text = decode_entities(inner).trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}

/// Find `<tag>` or `<tag attr...>` and return the offset just past `>`.
fn open_tag_end(block: &str, tag: &str) -> Option<usize> {
    let open = format!("<{tag}");
    let mut from = 0;
    while let Some(at) = find_ci(block, &open, from) {
        let rest = at + open.len();
        match block.as_bytes().get(rest) {
            Some(b'>') => return Some(rest + 1),
            Some(c) if c.is_ascii_whitespace() => {
                return find_ci(block, ">", rest).map(|gt| gt + 1);
            }
            // prefix of a longer tag name, keep looking
            _ => from = at + 1,
        }
    }
    None
}

/// Case-insensitive ASCII substring search starting at `from`. Returned
/// offsets are byte positions; every needle used here starts with an ASCII
/// character, so they are always valid slice boundaries.
fn find_ci(hay: &str, needle: &str, from: usize) -> Option<usize> {
    let hay = hay.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || hay.len() < needle.len() || from > hay.len() - needle.len() {
        return None;
    }
    (from..=hay.len() - needle.len())
        .find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

fn unwrap_cdata(text: &str) -> &str {
    text.strip_prefix("<![CDATA[")
        .and_then(|rest| rest.strip_suffix("]]>"))
        .unwrap_or(text)
}

/// Decode the named entities feeds actually use, plus numeric references.
/// Unknown entities pass through literally.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail.find(';').filter(|&semi| semi <= 10).and_then(|semi| {
            let name = &tail[1..semi];
            let c = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => numeric_entity(name),
            };
            c.map(|c| (c, semi + 1))
        });
        match decoded {
            Some((c, skip)) => {
                out.push(c);
                rest = &tail[skip..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn numeric_entity(name: &str) -> Option<char> {
    let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(dec) = name.strip_prefix('#') {
        dec.parse::<u32>().ok()?
    } else {
        return None;
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(fragment: &str) -> Pattern {
        Pattern::new(&[fragment.to_string()]).unwrap()
    }

    fn item(guid: &str, title: &str, description: &str) -> String {
        format!(
            "<item>\
             <guid>{guid}</guid>\
             <title>{title}</title>\
             <pubDate>Mon, 24 Aug 2026 09:00:00 +0200</pubDate>\
             <description>{description}</description>\
             </item>"
        )
    }

    fn feed(items: &[String]) -> String {
        format!(
            "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel>\
             <title>Example</title>{}</channel></rss>",
            items.join("")
        )
    }

    #[test]
    fn only_matching_items_are_returned() {
        let xml = feed(&[
            item("http://a", "First", "about climate policy"),
            item("http://b", "Second", "about housing"),
        ]);
        let items = matching_items(&xml, &pattern("climate"));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].guid, "http://a");
        assert_eq!(items[0].title, "First");
        assert_eq!(items[0].body, "about climate policy");
    }

    #[test]
    fn content_encoded_is_preferred_over_description() {
        let xml = feed(&[
            "<item><guid>g</guid><title>T</title>\
             <pubDate>Mon, 24 Aug 2026 09:00:00 +0200</pubDate>\
             <description>short climate teaser</description>\
             <content:encoded><![CDATA[<p>the full climate story</p>]]></content:encoded>\
             </item>"
                .to_string(),
        ]);
        let items = matching_items(&xml, &pattern("climate"));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].body, "the full climate story");
    }

    #[test]
    fn body_markup_is_stripped_before_matching() {
        let xml = feed(&[item(
            "g",
            "T",
            "&lt;p&gt;nested &lt;b&gt;climate&lt;/b&gt; markup&lt;/p&gt;",
        )]);
        let items = matching_items(&xml, &pattern("climate"));
        assert_eq!(items.len(), 1);
        assert!(!items[0].body.contains('<'));
        assert!(items[0].body.contains("climate"));
    }

    #[test]
    fn malformed_item_is_skipped() {
        let xml = feed(&[
            "<item><title>No guid here</title>\
             <pubDate>Mon, 24 Aug 2026 09:00:00 +0200</pubDate>\
             <description>climate</description></item>"
                .to_string(),
            item("g", "Valid", "climate too"),
        ]);
        let items = matching_items(&xml, &pattern("climate"));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].guid, "g");
    }

    #[test]
    fn duplicate_guids_are_collapsed() {
        let xml = feed(&[
            item("same", "One", "climate a"),
            item("same", "Two", "climate b"),
        ]);
        let items = matching_items(&xml, &pattern("climate"));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "One");
    }

    #[test]
    fn items_are_sorted_by_guid() {
        let xml = feed(&[
            item("http://b", "Second", "climate"),
            item("http://a", "First", "climate"),
        ]);
        let items = matching_items(&xml, &pattern("climate"));
        let guids: Vec<&str> = items.iter().map(|i| i.guid.as_str()).collect();
        assert_eq!(guids, vec!["http://a", "http://b"]);
    }

    #[test]
    fn guid_attributes_are_tolerated() {
        let xml = feed(&[
            "<item><guid isPermaLink=\"true\">http://x</guid>\
             <title>T</title>\
             <pubDate>Mon, 24 Aug 2026 09:00:00 +0200</pubDate>\
             <description>climate</description></item>"
                .to_string(),
        ]);
        let items = matching_items(&xml, &pattern("climate"));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].guid, "http://x");
    }

    #[test]
    fn entities_decode_in_titles() {
        let xml = feed(&[item("g", "Q&amp;A &#252;ber Klima", "climate")]);
        let items = matching_items(&xml, &pattern("climate"));
        assert_eq!(items[0].title, "Q&A über Klima");
    }

    #[test]
    fn unknown_entities_pass_through() {
        assert_eq!(decode_entities("a &bogus; b"), "a &bogus; b");
        assert_eq!(decode_entities("tail &"), "tail &");
    }

    #[test]
    fn hex_entities_decode() {
        assert_eq!(decode_entities("&#x41;&#x42;"), "AB");
    }

    #[test]
    fn strip_tags_leaves_plain_text() {
        assert_eq!(strip_tags("<p>a</p><p>b</p>"), "a  b");
        assert_eq!(strip_tags("no markup"), "no markup");
    }

    #[test]
    fn item_missing_both_bodies_never_matches() {
        let xml = feed(&["<item><guid>g</guid><title>climate</title>\
             <pubDate>Mon, 24 Aug 2026 09:00:00 +0200</pubDate></item>"
            .to_string()]);
        assert!(matching_items(&xml, &pattern("climate")).is_empty());
    }

    #[test]
    fn empty_document_yields_nothing() {
        assert!(matching_items("", &pattern("x")).is_empty());
        assert!(matching_items("<rss></rss>", &pattern("x")).is_empty());
    }
}
