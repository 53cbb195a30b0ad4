//! Grep a set of syndication feeds and print every match with bounded,
//! highlighted context.
//!
//! `newsgrep` fetches a fixed list of news feeds concurrently, finds the
//! items whose body matches a user-supplied pattern, and prints each match
//! as one readable line: the matched text highlighted, nearby words kept,
//! and long non-matching stretches elided behind `[...]` markers.
//!
//! The interesting part is the context-window algorithm in [`highlight`]:
//! sentences are tokenized, tokens classified into keep/drop runs around
//! each match, and the runs rewritten so only a bounded window of context
//! survives on each side of a cut. Short gaps are kept whole rather than
//! fragmented into slivers.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`highlight`] | Pattern compilation and the context-window pipeline |
//! | [`feed`] | Concurrent feed retrieval and RSS item extraction |
//! | [`scan`] | Folds fetch outcomes into a printable report |
//! | [`report`] | ANSI palette, humanized dates, output formatting |

pub mod feed;
pub mod highlight;
pub mod report;
pub mod scan;
