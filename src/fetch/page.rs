// src/fetch/page.rs
// =============================================================================
// Fetches one seed page and runs the extractor over it.
//
// Steps for every seed:
// 1. GET the page through the shared client
// 2. Reject non-success statuses
// 3. Read the whole body and decode it as UTF-8 (no lossy fallback)
// 4. Parse + extract synchronously
//
// Any failure is returned as a FetchError and logged here; the caller just
// drops that seed's contribution.
// =============================================================================

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::error::FetchError;
use crate::extract::{extract_urls, Extractor};

/// Result of harvesting a single seed page
pub type FetchResult = Result<Vec<String>, FetchError>;

// Builds the one client shared by every fetch of a run
//
// reqwest keeps a connection pool per client; cloning or borrowing the same
// client means every request draws from the same pool.
pub fn build_client(max_connections: usize, timeout: Option<Duration>) -> reqwest::Result<Client> {
    let mut builder = Client::builder().pool_max_idle_per_host(max_connections);

    // No timeout unless one was configured: a hung server stalls its slot
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

// Downloads a page and returns its body as text
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let body = response.bytes().await?;
    let html = String::from_utf8(body.to_vec())?;
    Ok(html)
}

// Fetches one seed and extracts its derived URLs
//
// Parameters:
//   index: position of the seed in the input list, only used in log lines
pub async fn harvest_page(
    client: &Client,
    extractor: &dyn Extractor,
    url: &str,
    index: usize,
) -> FetchResult {
    debug!(extractor = extractor.name(), "checking {}", url);

    let result = match fetch_page(client, url).await {
        Ok(html) => extract_urls(extractor, &html).map_err(FetchError::from),
        Err(e) => Err(e),
    };

    match &result {
        Ok(urls) => {
            info!(found = urls.len(), "{:>5} : ok: {}", index, url);
        }
        Err(e) => {
            warn!(kind = ?e.kind(), "{:>5} : {} error: {}", index, url, e);
        }
    }

    result
}
