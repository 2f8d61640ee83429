//! # DAO Indexer Node
//!
//! The indexer executable. It wires the subsystems together and drives
//! the serial ingestion loop:
//!
//! ```text
//! feed (JSONL) ──→ decoder ──→ router ──→ handlers ──→ document store
//!                     │
//!            schema / block ports
//!         (static schema, recorded headers)
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Initialize tracing from `RUST_LOG` (default `info`)
//! 2. Load configuration from `DAO_*` environment variables
//! 3. Validate it (zero contract or bank addresses are rejected)
//! 4. Wire decoder, projector, and store; start the pipeline
//! 5. Stream the feed through, block by block, in order
//! 6. Log a projection summary and exit

mod adapters;
mod config;
mod feed;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dao_decoder::EventDecoder;
use dao_projector::{MemoryStore, Pipeline, Projector};
use dao_query::{Page, QueryService};

use crate::adapters::{RecordedBlockLookup, StaticSchemaProvider};
use crate::config::NodeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(true)
        .init();

    let config = NodeConfig::from_env();
    config.validate()?;

    info!("===========================================");
    info!("  DAO Indexer Node v0.1.0");
    info!("===========================================");
    info!(contract = %config.governance_contract, "governance contract");
    info!(bank = %config.bank_address, "bank address");
    info!(feed = %config.feed_path.display(), "event feed");

    run(config).await
}

async fn run(config: NodeConfig) -> Result<()> {
    let schemas = Arc::new(StaticSchemaProvider::new(config.governance_contract));
    let blocks = Arc::new(RecordedBlockLookup::new());
    let store = Arc::new(MemoryStore::new());

    let decoder = EventDecoder::new(schemas, Arc::clone(&blocks) as _, config.decoder_config());
    let projector = Projector::new(Arc::clone(&store) as _, config.bank_address);
    let pipeline = Pipeline::new(decoder, projector);

    let batches = feed::load_feed(&config.feed_path).await?;
    info!(blocks = batches.len(), "feed loaded");

    let (tx, rx) = mpsc::channel(64);
    let ingest = tokio::spawn(async move { pipeline.run(rx).await });

    for block in batches {
        blocks.record(&block.header).await;
        tx.send(block).await.context("pipeline stopped early")?;
    }
    drop(tx);

    ingest
        .await
        .context("ingestion task panicked")?
        .context("ingestion halted on a fatal projection error")?;

    summarize(store, config.bank_address).await
}

/// Log what the run projected, exercising the same read path queries use.
async fn summarize(store: Arc<MemoryStore>, bank_address: dao_types::Address) -> Result<()> {
    let queries = QueryService::new(store, bank_address);
    let now = dao_query::unix_now();

    let proposals = queries
        .list_proposals(
            Page {
                skip: 0,
                limit: usize::MAX,
            },
            now,
        )
        .await?;
    let members = queries
        .list_members(Page {
            skip: 0,
            limit: usize::MAX,
        })
        .await?;

    info!(
        proposals = proposals.data.len(),
        members = members.data.len(),
        malformed = proposals.errors.len() + members.errors.len(),
        "ingestion complete"
    );
    Ok(())
}
