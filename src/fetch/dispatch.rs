// src/fetch/dispatch.rs
// =============================================================================
// Fans the seed list out into concurrent fetches.
//
// How it works:
// 1. Turn the seeds into a stream, numbering each one
// 2. Seed i may not start before `i * launch_delay` after the batch began
// 3. .buffer_unordered(N) keeps at most N fetches in flight, refilling a
//    slot as soon as any fetch finishes
// 4. Collect (index, result) pairs and sort them back into launch order
//
// Launch times are fixed from the batch start, so a seed that waited for a
// free slot goes out immediately instead of waiting another delay.
//
// Everything runs inside the caller's task. Fetches overlap only while they
// wait on the network; parsing a page holds the task until it is done.
// =============================================================================

use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::time::Duration;

use super::page::{harvest_page, FetchResult};
use crate::config::DEFAULT_MAX_CONNECTIONS;
use crate::extract::Extractor;

/// Knobs for one dispatch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Upper bound on fetches in flight at once
    pub max_connections: usize,
    /// Pause between successive launches (zero = launch as fast as slots free up)
    pub launch_delay: Duration,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            launch_delay: Duration::ZERO,
        }
    }
}

// Fetches and extracts every seed, returning one result per seed
//
// The returned Vec lines up with the input: results[i] belongs to seeds[i],
// whatever order the responses actually arrived in.
pub async fn dispatch(
    client: &Client,
    seeds: Vec<String>,
    extractor: &dyn Extractor,
    options: DispatchOptions,
) -> Vec<FetchResult> {
    let delay = options.launch_delay;
    let started = tokio::time::Instant::now();

    let mut results: Vec<(usize, FetchResult)> = stream::iter(seeds.into_iter().enumerate())
        .map(move |(index, url)| async move {
            // Pacing: the first seed goes out immediately
            if !delay.is_zero() {
                let offset = delay.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
                tokio::time::sleep_until(started + offset).await;
            }
            (index, harvest_page(client, extractor, &url, index).await)
        })
        .buffer_unordered(options.max_connections.max(1))
        .collect()
        .await;

    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}
