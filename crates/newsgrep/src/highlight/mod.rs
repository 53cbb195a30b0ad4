//! Match highlighting with bounded context windows.
//!
//! Given a text body and a compiled [`Pattern`], produce a single readable
//! line that keeps every match plus a bounded window of surrounding words
//! and elides the rest behind `[...]` markers. The pipeline:
//!
//! 1. [`Pattern::insert_markers`] wraps every match with literal highlight
//!    markers, so downstream tokenization is marker-aware without carrying
//!    span indices forward.
//! 2. [`sentence::segment`] splits the marked text into sentinel-bounded
//!    token sequences.
//! 3. [`runs::keep_flags`] and [`runs::encode`] classify each token as
//!    keep/drop and run-length encode the result.
//! 4. [`window::truncate`] bounds the non-matching context retained around
//!    each highlighted run.
//! 5. [`assemble::FragmentStack`] stitches the kept fragments of all
//!    sentences back into one line with elision markers.
//!
//! The output still carries the highlight markers; the presentation layer
//! turns them into terminal escapes or strips them.

pub mod assemble;
pub mod pattern;
pub mod runs;
pub mod sentence;
pub mod window;

pub use assemble::ELISION;
pub use pattern::Pattern;

/// Marks the first character of a highlighted match. A private-use scalar,
/// so it cannot legitimately occur in feed text.
pub const HIGHLIGHT_BEGIN: char = '\u{e000}';

/// Marks the end of a highlighted match.
pub const HIGHLIGHT_END: char = '\u{e001}';

/// Tuning for the context-window truncation stage.
#[derive(Debug, Clone)]
pub struct HighlightConfig {
    /// Context tokens retained adjacent to a highlight when a gap is
    /// elided.
    pub context_width: usize,
    /// Slack below which a gap is kept whole instead of being cut.
    pub merge_tolerance: usize,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            context_width: 9,
            merge_tolerance: 5,
        }
    }
}

impl HighlightConfig {
    pub fn with_context_width(mut self, width: usize) -> Self {
        self.context_width = width;
        self
    }

    pub fn with_merge_tolerance(mut self, tolerance: usize) -> Self {
        self.merge_tolerance = tolerance;
        self
    }
}

/// Run the full highlighting pipeline over `text`.
///
/// Stateless apart from the borrowed pattern; the same input always
/// produces byte-identical output.
pub fn highlight(pattern: &Pattern, text: &str, config: &HighlightConfig) -> String {
    let marked = pattern.insert_markers(text);
    let mut stack = assemble::FragmentStack::new();
    for sentence in sentence::segment(&marked) {
        let flags = runs::keep_flags(&sentence);
        let encoded = runs::encode(&flags);
        let truncated = window::truncate(&encoded, config);
        stack.push_sentence(&sentence, &truncated);
    }
    stack.finish()
}
