//! Pattern compilation and match-marker insertion.
//!
//! [`Pattern`] wraps a single compiled case-insensitive alternation built by
//! joining all user-supplied fragments with `|`. It has no mutable state and
//! is shared by reference across every feed item in a run.

use regex::RegexBuilder;

use super::{HIGHLIGHT_BEGIN, HIGHLIGHT_END};

/// A compiled search pattern.
#[derive(Debug)]
pub struct Pattern {
    re: regex::Regex,
}

impl Pattern {
    /// Compile one or more pattern fragments into a case-insensitive
    /// alternation.
    ///
    /// Fails on invalid regex syntax and on patterns that can match the
    /// empty string, since an empty match selects no text to highlight.
    pub fn new(fragments: &[String]) -> Result<Self, String> {
        if fragments.is_empty() {
            return Err("at least one pattern fragment is required".to_string());
        }
        let joined = fragments.join("|");
        let re = RegexBuilder::new(&joined)
            .case_insensitive(true)
            .build()
            .map_err(|e| format!("invalid pattern '{joined}': {e}"))?;
        if re.is_match("") {
            return Err(format!("pattern '{joined}' can match the empty string"));
        }
        Ok(Self { re })
    }

    /// Whether `text` contains at least one match.
    pub fn is_match(&self, text: &str) -> bool {
        self.re.is_match(text)
    }

    /// Rewrite `text` with every match wrapped in begin/end highlight
    /// markers.
    ///
    /// Downstream tokenizers track highlight state by scanning for the
    /// marker scalars, so any marker characters already present in the
    /// input are removed first. Matches are ordered and non-overlapping.
    pub fn insert_markers(&self, text: &str) -> String {
        let clean: String = text
            .chars()
            .filter(|c| *c != HIGHLIGHT_BEGIN && *c != HIGHLIGHT_END)
            .collect();

        let mut out = String::with_capacity(clean.len());
        let mut last = 0;
        for m in self.re.find_iter(&clean) {
            out.push_str(&clean[last..m.start()]);
            out.push(HIGHLIGHT_BEGIN);
            out.push_str(m.as_str());
            out.push(HIGHLIGHT_END);
            last = m.end();
        }
        out.push_str(&clean[last..]);
        out
    }
}
