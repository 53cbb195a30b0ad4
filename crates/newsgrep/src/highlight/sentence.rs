//! Sentence segmentation over marked text.
//!
//! Splits on the sentence terminator, tokenizes on whitespace, and bounds
//! every sentence with synthetic START/END sentinel tokens so boundary runs
//! are well-defined during windowing. Highlight markers ride along inside
//! whatever token contains them; no tokenizer splits them apart.

/// The sentence terminator character.
pub const TERMINATOR: char = '.';

/// Synthetic token opening every sentence.
pub const START_TOKEN: &str = "\u{e002}";

/// Synthetic token closing every sentence. Never kept in output.
pub const END_TOKEN: &str = "\u{e003}";

/// An ordered token sequence bounded by the synthetic sentinels.
#[derive(Debug, Clone)]
pub struct Sentence {
    /// Tokens, with `tokens[0] == START_TOKEN` and the last == `END_TOKEN`.
    pub tokens: Vec<String>,
}

impl Sentence {
    /// Token count including both sentinels.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Split marked text into sentences.
///
/// Segments with no word tokens are silently skipped; this drops the
/// degenerate empty fragment after a trailing terminator. The terminator is
/// re-appended to the last real token so it survives into the output.
pub fn segment(marked: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    for raw in marked.split(TERMINATOR) {
        let mut words: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
        if words.is_empty() {
            continue;
        }
        if let Some(last) = words.last_mut() {
            last.push(TERMINATOR);
        }

        let mut tokens = Vec::with_capacity(words.len() + 2);
        tokens.push(START_TOKEN.to_string());
        tokens.append(&mut words);
        tokens.push(END_TOKEN.to_string());
        sentences.push(Sentence { tokens });
    }
    sentences
}
