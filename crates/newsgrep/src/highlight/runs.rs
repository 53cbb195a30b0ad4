//! Keep-run classification: per-token keep flags and their run-length
//! encoding.
//!
//! A token is kept when it falls inside an open highlight. State is a
//! single boolean walked left to right: a begin marker opens the highlight
//! before its own token is evaluated (so the carrying token is kept), an
//! end marker closes it afterwards (so that token is kept too).

use super::sentence::Sentence;
use super::{HIGHLIGHT_BEGIN, HIGHLIGHT_END};

/// A maximal consecutive group of tokens sharing one keep flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub keep: bool,
    pub len: usize,
}

impl Run {
    pub fn new(keep: bool, len: usize) -> Self {
        Self { keep, len }
    }
}

/// Per-token keep flags for a sentence, sentinel positions included.
///
/// The END sentinel is forced to `false` regardless of highlight state,
/// which prevents a trailing elision artifact when a highlight runs into
/// the sentence boundary.
pub fn keep_flags(sentence: &Sentence) -> Vec<bool> {
    let last = sentence.len() - 1;
    let mut inside = false;
    sentence
        .tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            if token.contains(HIGHLIGHT_BEGIN) {
                inside = true;
            }
            let keep = inside && i != last;
            if token.contains(HIGHLIGHT_END) {
                inside = false;
            }
            keep
        })
        .collect()
}

/// Run-length encode a flag sequence. Run lengths always sum to the input
/// length.
pub fn encode(flags: &[bool]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for &flag in flags {
        match runs.last_mut() {
            Some(run) if run.keep == flag => run.len += 1,
            _ => runs.push(Run::new(flag, 1)),
        }
    }
    runs
}

/// Expand runs back into per-token flags.
pub fn expand(runs: &[Run]) -> Vec<bool> {
    let total = runs.iter().map(|r| r.len).sum();
    let mut flags = Vec::with_capacity(total);
    for run in runs {
        flags.extend(std::iter::repeat_n(run.keep, run.len));
    }
    flags
}
