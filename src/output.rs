// src/output.rs
// =============================================================================
// Writes the harvested URLs as a plain seed list for the crawler.
//
// Format: one URL per line, every line (including the last) ends in "\n".
// Failed seeds are skipped. Each seed's URLs stay together, and seeds appear
// in the order they were launched.
// =============================================================================

use std::io::{self, Write};

use crate::fetch::FetchResult;

// Writes every successful result to `writer`
//
// Returns: how many URLs were written
pub fn write_results<W: Write>(writer: &mut W, results: &[FetchResult]) -> io::Result<usize> {
    let mut written = 0;

    for urls in results.iter().filter_map(|r| r.as_ref().ok()) {
        for url in urls {
            writeln!(writer, "{}", url)?;
            written += 1;
        }
    }

    Ok(written)
}
