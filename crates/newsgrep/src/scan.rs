//! One run's scan state, threaded explicitly from fetch outcomes to the
//! printable report.

use tracing::info;

use crate::feed::fetch::FetchOutcome;
use crate::feed::parse;
use crate::highlight::{self, HighlightConfig, Pattern};
use crate::report::{FeedReport, ItemReport};

/// Everything one run produced.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Feeds with at least one match, in feed-list order.
    pub matched: Vec<FeedReport>,
    /// Sites that fetched fine but matched nothing, sorted.
    pub nothing_found: Vec<String>,
    /// Sites whose retrieval failed, sorted.
    pub lookup_failed: Vec<String>,
}

/// Fold fetch outcomes into a scan report, highlighting every matching
/// item along the way.
pub fn scan(
    outcomes: Vec<FetchOutcome>,
    pattern: &Pattern,
    config: &HighlightConfig,
) -> ScanReport {
    let mut report = ScanReport::default();

    for outcome in outcomes {
        let xml = match outcome.result {
            Ok(xml) => xml,
            Err(_) => {
                report.lookup_failed.push(outcome.site);
                continue;
            }
        };

        let items = parse::matching_items(&xml, pattern);
        if items.is_empty() {
            report.nothing_found.push(outcome.site);
            continue;
        }

        info!("{}: {} matching item(s)", outcome.site, items.len());
        let items = items
            .into_iter()
            .map(|item| {
                let highlighted = highlight::highlight(pattern, &item.body, config);
                ItemReport { item, highlighted }
            })
            .collect();
        report.matched.push(FeedReport {
            site: outcome.site,
            items,
        });
    }

    report.nothing_found.sort();
    report.lookup_failed.sort();
    report
}
