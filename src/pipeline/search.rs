// src/pipeline/search.rs

//! Sequential batch execution.
//!
//! Runs the items of a batch strictly in order: item N+1 is never built
//! or sent before item N's full cycle (pace, build, invoke) completes.

use serde_json::Value;

use crate::error::Result;
use crate::models::{Credentials, SearchOptions};
use crate::pipeline::pacing::Pacing;
use crate::services::{SearchClient, build_search_request};

/// What to do when one item of a batch fails.
///
/// This is the host's call, not the pipeline's: an interactive run
/// usually wants to stop at the first failure, an unattended batch
/// usually wants every item attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMode {
    /// Stop the batch at the first failing item.
    Abort,

    /// Record the failure and keep going.
    Collect,
}

/// Result for one input item.
#[derive(Debug)]
pub struct ItemResult {
    /// Position of the item in the input batch
    pub index: usize,

    /// Raw response payload, or the item-scoped failure
    pub outcome: Result<Value>,
}

/// Outcome of a whole batch run, results in input order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub results: Vec<ItemResult>,
    pub success_count: usize,
    pub failure_count: usize,
}

/// Run a batch of searches sequentially.
///
/// Each item is paced, built, and invoked independently; build failures
/// (validation, partner tag resolution) surface before any remote call
/// for that item. With `ErrorMode::Abort` the first failure ends the
/// batch; with `ErrorMode::Collect` it is recorded and the loop moves
/// on to the next item.
pub async fn run_search_batch(
    client: &dyn SearchClient,
    credentials: &Credentials,
    items: &[SearchOptions],
    mode: ErrorMode,
) -> Result<BatchOutcome> {
    log::info!("Starting search batch: {} item(s)", items.len());

    let mut outcome = BatchOutcome::default();

    for (index, options) in items.iter().enumerate() {
        Pacing::from_options(&options.extra).pause_before(index).await;

        match run_item(client, credentials, options).await {
            Ok(value) => {
                outcome.success_count += 1;
                outcome.results.push(ItemResult {
                    index,
                    outcome: Ok(value),
                });
            }
            Err(error) => {
                log::warn!("Search item {index} failed: {error}");
                outcome.failure_count += 1;
                match mode {
                    ErrorMode::Abort => return Err(error),
                    ErrorMode::Collect => outcome.results.push(ItemResult {
                        index,
                        outcome: Err(error),
                    }),
                }
            }
        }
    }

    log::info!(
        "Search batch complete: {} ok, {} failed",
        outcome.success_count,
        outcome.failure_count
    );

    Ok(outcome)
}

async fn run_item(
    client: &dyn SearchClient,
    credentials: &Credentials,
    options: &SearchOptions,
) -> Result<Value> {
    let request = build_search_request(options, credentials)?;
    client.search_items(&request).await
}
