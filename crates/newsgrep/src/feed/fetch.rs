//! Concurrent feed retrieval.
//!
//! One request per feed, spawned onto the tokio runtime and collected as
//! responses arrive. Outcomes are re-ordered by feed-list position before
//! returning, so downstream output stays deterministic regardless of
//! completion order. A failed feed carries its error in the outcome and
//! never aborts the batch; there is no retry.

use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::site_of;

/// Result of fetching one feed.
#[derive(Debug)]
pub struct FetchOutcome {
    pub url: String,
    /// Site identifier extracted from the URL, for reporting.
    pub site: String,
    /// The feed markup, or an error description.
    pub result: Result<String, String>,
}

/// Build the shared HTTP client. The timeout applies per request.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .user_agent(concat!("newsgrep/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| format!("failed to build HTTP client: {e}"))
}

/// Fetch every feed concurrently.
pub async fn fetch_all(client: &reqwest::Client, urls: &[String]) -> Vec<FetchOutcome> {
    info!("fetching {} feed(s)", urls.len());

    let mut tasks: JoinSet<(usize, Result<String, String>)> = JoinSet::new();
    for (idx, url) in urls.iter().enumerate() {
        let client = client.clone();
        let url = url.clone();
        tasks.spawn(async move { (idx, fetch_one(&client, &url).await) });
    }

    let mut slots: Vec<Option<Result<String, String>>> = urls.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((idx, result)) => {
                match &result {
                    Ok(body) => debug!("{}: {} bytes", urls[idx], body.len()),
                    Err(e) => warn!("{}: {e}", urls[idx]),
                }
                slots[idx] = Some(result);
            }
            Err(e) => warn!("feed task panicked: {e}"),
        }
    }

    urls.iter()
        .zip(slots)
        .map(|(url, slot)| FetchOutcome {
            url: url.clone(),
            site: site_of(url),
            result: slot.unwrap_or_else(|| Err("fetch task aborted".to_string())),
        })
        .collect()
}

async fn fetch_one(client: &reqwest::Client, url: &str) -> Result<String, String> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(format!("HTTP {status}"));
    }

    resp.text()
        .await
        .map_err(|e| format!("failed to read response body: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one HTTP response on a random local port, then close.
    async fn one_shot_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "{status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
        });
        format!("http://{addr}/feed")
    }

    #[tokio::test]
    async fn fetch_returns_payloads_in_input_order() {
        let client = build_client(Duration::from_secs(5)).unwrap();
        let first = one_shot_server("HTTP/1.1 200 OK", "first feed").await;
        let second = one_shot_server("HTTP/1.1 200 OK", "second feed").await;

        let outcomes = fetch_all(&client, &[first.clone(), second.clone()]).await;
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].url, first);
        assert_eq!(outcomes[0].result.as_deref(), Ok("first feed"));
        assert_eq!(outcomes[1].url, second);
        assert_eq!(outcomes[1].result.as_deref(), Ok("second feed"));
    }

    #[tokio::test]
    async fn one_failure_does_not_abort_the_batch() {
        let client = build_client(Duration::from_secs(5)).unwrap();
        let good = one_shot_server("HTTP/1.1 200 OK", "payload").await;
        let bad = one_shot_server("HTTP/1.1 500 Internal Server Error", "").await;

        let outcomes = fetch_all(&client, &[bad, good]).await;
        assert!(outcomes[0].result.as_ref().is_err());
        assert!(
            outcomes[0]
                .result
                .as_ref()
                .unwrap_err()
                .contains("HTTP 500")
        );
        assert_eq!(outcomes[1].result.as_deref(), Ok("payload"));
    }

    #[tokio::test]
    async fn unreachable_host_is_an_isolated_error() {
        let client = build_client(Duration::from_secs(5)).unwrap();
        // bind a port and drop the listener so the connection is refused
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let outcomes = fetch_all(&client, &[format!("http://{addr}/gone")]).await;
        assert!(outcomes[0].result.is_err());
    }
}
