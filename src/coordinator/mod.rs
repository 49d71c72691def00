//! Batch orchestration.
//!
//! The coordinator accepts one or many scan requests, builds each command
//! through the sanitizer, dispatches tasks onto a semaphore-bounded worker
//! pool, and assembles an order-preserving aggregate result. Tasks are
//! fully independent: a validation error, spawn failure, timeout, or panic
//! in one task yields an `ok=false` entry for that index only.

use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{info, warn};
use tokio::sync::Semaphore;

use crate::command::build_arguments;
use crate::config::Settings;
use crate::report::{BatchEntry, BatchResult, ScanResult};
use crate::request::ScanRequest;
use crate::runner;

/// Runs a single scan request through the full pipeline.
///
/// A validation failure yields an `ok=false` result without spawning
/// anything; execution failures are captured in the result the same way
/// they are for batch members.
pub async fn run_single(request: ScanRequest, settings: &Settings) -> ScanResult {
    match build_arguments(&request, settings) {
        Ok(command) => runner::run(command, settings.process_timeout).await,
        Err(e) => ScanResult::failure(e.to_string(), None),
    }
}

/// Runs a batch of scan requests on a bounded worker pool.
///
/// Effective concurrency is the per-batch override (read from the first
/// request) or the process-wide default, clamped to `1..=len`. Completion
/// order is unconstrained internally; results are always restored to the
/// original request order before returning. The aggregate `ok` is true iff
/// every member is ok.
pub async fn run_batch(requests: Vec<ScanRequest>, settings: &Settings) -> BatchResult {
    if requests.is_empty() {
        return BatchResult {
            ok: true,
            results: Vec::new(),
        };
    }

    let requested = requests
        .first()
        .and_then(|r| r.max_concurrency)
        .unwrap_or(settings.max_concurrency);
    let concurrency = requested.clamp(1, requests.len());
    info!(
        "Dispatching {} scan task(s) with concurrency {}",
        requests.len(),
        concurrency
    );

    let semaphore = Arc::new(Semaphore::new(concurrency));
    let settings = Arc::new(settings.clone());
    let mut tasks = FuturesUnordered::new();

    for (index, request) in requests.into_iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let settings = Arc::clone(&settings);
        tasks.push(tokio::spawn(async move {
            // Closed-semaphore errors cannot happen here; treat one as a
            // plain task failure rather than unwinding the batch
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    return (
                        index,
                        request.url.clone(),
                        ScanResult::failure("worker pool closed", None),
                    )
                }
            };
            let url = request.url.clone();
            let result = run_single(request, &settings).await;
            (index, url, result)
        }));
    }

    let mut entries: Vec<BatchEntry> = Vec::new();
    let mut all_ok = true;
    while let Some(task_result) = tasks.next().await {
        let entry = match task_result {
            Ok((index, url, result)) => BatchEntry {
                index,
                url: (!url.is_empty()).then_some(url),
                result,
            },
            Err(join_error) => {
                // A panicked task loses its index; surface it at the end
                // rather than silently shrinking the batch
                warn!("Scan task panicked: {join_error:?}");
                BatchEntry {
                    index: usize::MAX,
                    url: None,
                    result: ScanResult::failure(
                        format!("worker panicked: {join_error}"),
                        None,
                    ),
                }
            }
        };
        if !entry.result.ok {
            all_ok = false;
        }
        entries.push(entry);
    }

    // External contract: original request order, whatever finished first
    entries.sort_by_key(|entry| entry.index);

    BatchResult {
        ok: all_ok,
        results: entries,
    }
}

/// Scans a plain list of target URLs with environment-default tuning and
/// database enumeration enabled.
///
/// Blank entries fail validation and surface as `invalid url` failure
/// entries at their index; no process is spawned for them.
pub async fn run_urls(urls: Vec<String>, settings: &Settings) -> BatchResult {
    let requests: Vec<ScanRequest> = urls
        .iter()
        .map(|url| ScanRequest::for_url(url.trim()))
        .collect();

    // Invalid entries are decided up front; build_arguments turns the
    // empty URL into the per-index failure, so the normal batch path
    // handles both shapes
    let mut batch = run_batch(requests, settings).await;
    for entry in &mut batch.results {
        if entry.result.error.as_deref() == Some("URL is required.") {
            entry.result.error = Some("invalid url".to_string());
        }
    }
    batch.ok = batch.results.iter().all(|entry| entry.result.ok);
    batch
}
