//! JSONL block-events feed.
//!
//! One JSON-encoded [`BlockEvents`] batch per line, blocks in chain
//! order. A development stand-in for a streaming chain subscription; the
//! pipeline consumes it through the same channel a live feed would use.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;

use dao_types::BlockEvents;

/// Load every block batch from a JSONL file, preserving order.
pub async fn load_feed(path: &Path) -> Result<Vec<BlockEvents>> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("reading feed {}", path.display()))?;

    let mut blocks = Vec::new();
    for (i, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let block: BlockEvents = serde_json::from_str(line)
            .with_context(|| format!("parsing feed line {}", i + 1))?;
        blocks.push(block);
    }
    Ok(blocks)
}
