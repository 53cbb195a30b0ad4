//! Context-window truncation of keep/drop run sequences, the core of the
//! highlighter.
//!
//! Bounds how much non-matching context survives around each highlighted
//! run. Short gaps are kept whole: fragmenting them into slivers costs more
//! readability than it saves. Only gaps long enough to exceed the merge
//! slack are elided, and every cut leaves a fixed window of context on each
//! side so the reader keeps their orientation.
//!
//! The rewrite is a single forward pass emitting one to three runs per
//! input run into a fresh sequence; nothing is spliced in place. The output
//! may contain adjacent keep runs, which the assembler re-normalizes.

use super::HighlightConfig;
use super::runs::Run;

/// Rewrite a sentence's run sequence, bounding context length.
///
/// Applies only to sequences of at least three runs, i.e. at least one
/// highlighted run with non-highlighted runs on both sides. Since the
/// sentinels are classified as drop, the first and last runs of any such
/// sequence are drop runs. Shorter sequences pass through unchanged.
pub fn truncate(runs: &[Run], config: &HighlightConfig) -> Vec<Run> {
    if runs.len() < 3 {
        return runs.to_vec();
    }

    let width = config.context_width;
    let whole_below = width + config.merge_tolerance;
    let split_at = 2 * width + config.merge_tolerance;
    let last = runs.len() - 1;

    let mut out = Vec::with_capacity(runs.len() + 2);
    for (i, run) in runs.iter().enumerate() {
        if run.keep {
            out.push(*run);
        } else if i == 0 {
            // Front-of-sentence context before the first highlight: keep
            // the tokens nearest the highlight.
            if run.len < whole_below {
                out.push(Run::new(true, run.len));
            } else {
                out.push(Run::new(false, run.len - width));
                out.push(Run::new(true, width));
            }
        } else if i == last {
            if run.len < whole_below {
                out.push(Run::new(true, run.len));
            } else {
                out.push(Run::new(true, width));
                out.push(Run::new(false, run.len - width));
            }
        } else {
            // Interior gap, bounded by keep runs on both sides.
            if run.len < split_at {
                out.push(Run::new(true, run.len));
            } else {
                out.push(Run::new(true, width));
                out.push(Run::new(false, run.len - 2 * width));
                out.push(Run::new(true, width));
            }
        }
    }
    out
}
