// src/seeds.rs
// =============================================================================
// Reads the seed list: one page URL per line.
//
// Lines are trimmed and blank lines are skipped. A missing or non-UTF-8 file
// is fatal; nothing has been fetched or written at that point.
// =============================================================================

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

// Loads every seed URL from `path`, preserving file order
pub fn load_seeds(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read seed list {}", path.display()))?;

    Ok(parse_seeds(&content).map(str::to_string).collect())
}

// Splits seed-list text into trimmed, non-empty lines
pub fn parse_seeds(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
}
