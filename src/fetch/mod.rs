// src/fetch/mod.rs
// =============================================================================
// This module downloads seed pages and turns them into derived URLs.
//
// Submodules:
// - dispatch: runs all seeds with a connection cap and optional pacing
// - page: fetches a single page and applies an extractor to it
// - error: the per-seed error type
// =============================================================================

mod dispatch;
mod error;
mod page;

pub use dispatch::{dispatch, DispatchOptions};
pub use error::{ErrorKind, FetchError};
pub use page::{build_client, FetchResult};
