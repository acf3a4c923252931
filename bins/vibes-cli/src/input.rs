//! Loading candidate batches from JSON files or stdin.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use vibes_core::types::RankableItem;

/// Read a JSON array of candidates from `path`, or from stdin when `path`
/// is `-`.
pub fn load_candidates(path: &Path) -> Result<Vec<RankableItem>> {
    if path == Path::new("-") {
        return parse_candidates(io::stdin().lock()).context("failed to parse candidates from stdin");
    }
    let file = File::open(path)
        .with_context(|| format!("failed to open candidate file: {}", path.display()))?;
    parse_candidates(BufReader::new(file))
        .with_context(|| format!("failed to parse candidate file: {}", path.display()))
}

/// Parse a JSON array of candidates.
pub fn parse_candidates<R: Read>(reader: R) -> Result<Vec<RankableItem>> {
    let items: Vec<RankableItem> = serde_json::from_reader(reader)?;
    tracing::debug!(count = items.len(), "loaded candidates");
    Ok(items)
}
