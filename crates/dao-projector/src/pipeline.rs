//! # Ingestion Pipeline
//!
//! The serial, ordered loop: raw event → decoder → router → handler →
//! store. Events are processed strictly in emission order within a block,
//! and blocks in feed order; async suspension (schema fetch, block
//! lookup, store I/O) never reorders them.
//!
//! ## Error Policy
//!
//! - Decode failures and unknown event names abort only the offending
//!   event (logged at error level).
//! - Missing governance parameters and store failures are fatal and stop
//!   the loop: continuing would corrupt derived state.

use tokio::sync::mpsc;
use tracing::{error, info};

use dao_decoder::EventDecoder;
use dao_types::BlockEvents;

use crate::handlers::{Projector, ProjectorError};
use crate::router::EventKind;

/// Decoder and projector wired over one store.
pub struct Pipeline {
    decoder: EventDecoder,
    projector: Projector,
}

impl Pipeline {
    pub fn new(decoder: EventDecoder, projector: Projector) -> Self {
        Self { decoder, projector }
    }

    /// Consume block batches until the feed closes or a fatal error
    /// demands operator intervention.
    pub async fn run(&self, mut feed: mpsc::Receiver<BlockEvents>) -> Result<(), ProjectorError> {
        info!("ingestion pipeline started");
        while let Some(block) = feed.recv().await {
            self.process_block(&block).await?;
        }
        info!("event feed closed, pipeline stopping");
        Ok(())
    }

    /// Process one block's events in emission order.
    pub async fn process_block(&self, block: &BlockEvents) -> Result<(), ProjectorError> {
        for raw in &block.events {
            let Some(kind) = EventKind::from_name(&raw.name) else {
                error!(event = %raw.name, block = block.header.number, "no handler for event, skipping");
                continue;
            };

            let decoded = match self.decoder.decode(raw, &block.header).await {
                Ok(decoded) => decoded,
                Err(e) => {
                    error!(event = %raw.name, block = block.header.number, error = %e, "decode failed, skipping event");
                    continue;
                }
            };

            if let Err(e) = self.projector.apply(kind, &decoded, &block.header).await {
                if e.is_fatal() {
                    error!(event = %raw.name, block = block.header.number, error = %e, "fatal projection error, halting ingestion");
                    return Err(e);
                }
                error!(event = %raw.name, block = block.header.number, error = %e, "projection failed, skipping event");
            }
        }
        Ok(())
    }
}
