//! Fragment assembly: truncated runs back into one output line.
//!
//! A [`FragmentStack`] accumulates kept token slices across all sentences
//! of an item. Kept slices extend the fragment on top of the stack when one
//! is live, which merges a sentence's trailing kept fragment with the next
//! sentence's leading one: a highlight spanning a sentence boundary reads
//! as a single continuous fragment. Dropped slices push an elision element,
//! but never two in a row.

use super::runs::{self, Run};
use super::sentence::Sentence;

/// Literal rendering of an elided gap.
pub const ELISION: &str = "[...]";

#[derive(Debug)]
enum Fragment {
    Words(Vec<String>),
    Elision,
}

/// Ordered kept fragments and elision markers for one item.
#[derive(Debug, Default)]
pub struct FragmentStack {
    fragments: Vec<Fragment>,
}

impl FragmentStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sentence's truncated runs.
    ///
    /// Sentinel positions are stripped here; runs are re-encoded over the
    /// remaining flags so keep runs merged by the truncator become single
    /// contiguous slices.
    pub fn push_sentence(&mut self, sentence: &Sentence, truncated: &[Run]) {
        let flags = runs::expand(truncated);
        debug_assert_eq!(flags.len(), sentence.len());

        let inner_tokens = &sentence.tokens[1..sentence.len() - 1];
        let inner_flags = &flags[1..flags.len() - 1];

        let mut pos = 0;
        for run in runs::encode(inner_flags) {
            let slice = &inner_tokens[pos..pos + run.len];
            pos += run.len;

            if run.keep {
                match self.fragments.last_mut() {
                    Some(Fragment::Words(words)) => words.extend(slice.iter().cloned()),
                    _ => self.fragments.push(Fragment::Words(slice.to_vec())),
                }
            } else if !matches!(self.fragments.last(), Some(Fragment::Elision)) {
                self.fragments.push(Fragment::Elision);
            }
        }
    }

    /// Join everything into the final line.
    pub fn finish(self) -> String {
        let parts: Vec<String> = self
            .fragments
            .into_iter()
            .filter_map(|fragment| match fragment {
                Fragment::Words(words) if words.is_empty() => None,
                Fragment::Words(words) => Some(words.join(" ")),
                Fragment::Elision => Some(ELISION.to_string()),
            })
            .collect();
        parts.join(" ")
    }
}
