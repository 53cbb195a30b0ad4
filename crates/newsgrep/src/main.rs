//! Scan news feeds for a pattern and print matches with highlighted
//! context.
//!
//! # Examples
//!
//! ```sh
//! # Single pattern against the built-in feed list
//! newsgrep klima
//!
//! # Several fragments join into one case-insensitive alternation
//! newsgrep klima energie wahl
//!
//! # Tighter context, custom feed
//! newsgrep --context-width 4 --feed https://example.org/rss.xml inflation
//! ```

use std::process;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use newsgrep::feed::{self, fetch};
use newsgrep::highlight::{HighlightConfig, Pattern};
use newsgrep::report::{self, Palette};
use newsgrep::scan;

/// Scan news feeds for a pattern and print matches with highlighted
/// context.
#[derive(Parser)]
#[command(name = "newsgrep")]
struct Cli {
    /// Pattern fragments, joined into one case-insensitive alternation.
    #[arg(required = true)]
    patterns: Vec<String>,

    /// Context tokens retained on each side of an elided gap.
    #[arg(long, default_value_t = 9)]
    context_width: usize,

    /// Gap slack below which surrounding context is kept whole.
    #[arg(long, default_value_t = 5)]
    merge_tolerance: usize,

    /// Feed URL to scan instead of the built-in list (repeatable).
    #[arg(long = "feed")]
    feeds: Vec<String>,

    /// Per-request network timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Disable ANSI colors.
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for the report.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Pattern problems are fatal, and caught before any network activity.
    let pattern = match Pattern::new(&cli.patterns) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let config = HighlightConfig::default()
        .with_context_width(cli.context_width)
        .with_merge_tolerance(cli.merge_tolerance);

    let urls: Vec<String> = if cli.feeds.is_empty() {
        feed::DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect()
    } else {
        cli.feeds.clone()
    };

    let client = match fetch::build_client(Duration::from_secs(cli.timeout)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let outcomes = fetch::fetch_all(&client, &urls).await;
    let result = scan::scan(outcomes, &pattern, &config);

    let palette = Palette::new(!cli.no_color);
    let now = Utc::now();
    for feed_report in &result.matched {
        print!("{}", report::format_feed(feed_report, &palette, now));
    }
    if let Some(line) = report::format_nothing_found(&result.nothing_found, &palette) {
        println!("{line}");
    }
    if let Some(line) = report::format_lookup_failed(&result.lookup_failed, &palette) {
        eprintln!("{line}");
    }
}
