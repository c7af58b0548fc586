//! Loader status and SFDL queue polling.
//!
//! Background tasks poll the status document and the queue listing and
//! publish every changed value over a watch channel; the foreground prints
//! one JSON event per value it receives.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use reltag_core::{QueueReport, ReleaseAnalyzer, SfdlQueue, StatusReport, StatusSnapshot};
use serde::Serialize;
use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

const MIN_HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Decodes a raw document into a typed value.
pub type Decode<T> = fn(&str) -> reltag_core::Result<T>;

/// Where a loader document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSource {
    File(PathBuf),
    Http(String),
}

impl StatusSource {
    /// `http://` and `https://` locations are fetched over HTTP, anything
    /// else is read as a file path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Http(raw.to_string())
        } else {
            Self::File(PathBuf::from(raw))
        }
    }

    /// Reads the raw document once.
    pub async fn fetch(&self, client: &reqwest::Client) -> Result<String> {
        match self {
            Self::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
            Self::Http(url) => client
                .get(url)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)
                .with_context(|| format!("Failed to fetch {url}"))?
                .text()
                .await
                .with_context(|| format!("Failed to read response body from {url}")),
        }
    }

    /// Fetches the document and decodes it with `decode`.
    pub async fn load<T>(&self, client: &reqwest::Client, decode: Decode<T>) -> Result<T> {
        let raw = self.fetch(client).await?;
        decode(&raw).with_context(|| format!("Failed to decode {self}"))
    }

    /// Fetches and decodes one status snapshot.
    pub async fn snapshot(&self, client: &reqwest::Client) -> Result<StatusSnapshot> {
        self.load(client, StatusSnapshot::from_json).await
    }

    /// Fetches and decodes the SFDL queue listing.
    pub async fn queue(&self, client: &reqwest::Client) -> Result<SfdlQueue> {
        self.load(client, SfdlQueue::from_json).await
    }
}

impl std::fmt::Display for StatusSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Http(url) => write!(f, "{url}"),
        }
    }
}

/// One line of `reltag watch` output.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    Status(StatusReport),
    Queue(QueueReport),
}

/// HTTP client whose timeout covers the slowest poll period.
pub fn http_client(period: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(period.max(MIN_HTTP_TIMEOUT))
        .build()
        .context("Failed to build HTTP client")
}

/// Polls `source` every `period` and publishes decoded values that differ
/// from the last one. Returns once every receiver is gone.
pub async fn poll<T: PartialEq>(
    source: StatusSource,
    period: Duration,
    client: reqwest::Client,
    decode: Decode<T>,
    tx: watch::Sender<Option<T>>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while !tx.is_closed() {
        ticker.tick().await;

        let value = match source.load(&client, decode).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Poll of {source} failed: {e:#}");
                continue;
            }
        };

        let changed = tx.send_if_modified(|current| {
            if current.as_ref() == Some(&value) {
                false
            } else {
                *current = Some(value);
                true
            }
        });
        if !changed {
            debug!(%source, "Document unchanged");
        }
    }
}

/// The SFDL queue listing to watch next to the status document.
#[derive(Debug, Clone)]
pub struct QueueWatch {
    pub source: StatusSource,
    pub period: Duration,
}

fn print_event(event: &WatchEvent) -> Result<()> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

/// Prints a JSON event for each new status snapshot, and for each new
/// queue listing when `queue` is set, until interrupted.
///
/// With `once`, stops after the first status report and, if watched, the
/// first queue report.
pub async fn run(
    analyzer: &ReleaseAnalyzer,
    source: StatusSource,
    period: Duration,
    queue: Option<QueueWatch>,
    once: bool,
) -> Result<()> {
    let slowest = queue.as_ref().map_or(period, |q| q.period.max(period));
    let client = http_client(slowest)?;

    info!(%source, ?period, "Watching loader status");

    let (status_tx, mut status_rx) = watch::channel(None);
    let status_poller = tokio::spawn(poll(
        source,
        period,
        client.clone(),
        StatusSnapshot::from_json,
        status_tx,
    ));

    let (queue_tx, mut queue_rx) = watch::channel(None);
    let queue_enabled = queue.is_some();
    let queue_poller = queue.map(|q| {
        info!(source = %q.source, period = ?q.period, "Watching SFDL queue");
        tokio::spawn(poll(q.source, q.period, client, SfdlQueue::from_json, queue_tx))
    });

    let mut status_seen = false;
    let mut queue_seen = !queue_enabled;

    loop {
        tokio::select! {
            changed = status_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = status_rx.borrow_and_update().clone();
                if let Some(snapshot) = snapshot {
                    print_event(&WatchEvent::Status(analyzer.status_report(&snapshot)))?;
                    status_seen = true;
                }
            }
            changed = queue_rx.changed(), if queue_enabled => {
                if changed.is_err() {
                    break;
                }
                let listing = queue_rx.borrow_and_update().clone();
                if let Some(listing) = listing {
                    print_event(&WatchEvent::Queue(analyzer.queue_report(&listing)))?;
                    queue_seen = true;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch");
                break;
            }
        }

        if once && status_seen && queue_seen {
            break;
        }
    }

    status_poller.abort();
    if let Some(poller) = queue_poller {
        poller.abort();
    }
    Ok(())
}

/// Fetches the SFDL queue once and prints its report.
pub async fn print_queue(analyzer: &ReleaseAnalyzer, source: StatusSource) -> Result<()> {
    let client = http_client(MIN_HTTP_TIMEOUT)?;
    let listing = source.queue(&client).await?;
    info!(%source, files = listing.len(), "SFDL queue loaded");
    println!("{}", serde_json::to_string(&analyzer.queue_report(&listing))?);
    Ok(())
}
