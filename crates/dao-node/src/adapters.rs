//! Port implementations wiring the decoder to this node's data sources.
//!
//! The governance contract's schema ships with the binary, so the schema
//! port is a static table rather than a network fetch. Block lookups are
//! served from headers the feed has already delivered; the feed is the
//! node's only upstream, and an event can only reference a block at or
//! before its own.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use dao_decoder::{
    dao_governance_schema, BlockLookup, BlockLookupError, ContractSchema, SchemaError,
    SchemaProvider,
};
use dao_types::{Address, BlockHeader};

/// Serves the bundled governance schema for the one configured contract.
pub struct StaticSchemaProvider {
    contract: Address,
    schema: ContractSchema,
}

impl StaticSchemaProvider {
    pub fn new(contract: Address) -> Self {
        Self {
            contract,
            schema: dao_governance_schema(),
        }
    }
}

#[async_trait]
impl SchemaProvider for StaticSchemaProvider {
    async fn resolve(&self, contract: Address) -> Result<ContractSchema, SchemaError> {
        if contract == self.contract {
            Ok(self.schema.clone())
        } else {
            Err(SchemaError::NotFound(contract))
        }
    }
}

/// Block lookup backed by the headers already seen on the feed.
#[derive(Default)]
pub struct RecordedBlockLookup {
    headers: RwLock<HashMap<u64, BlockHeader>>,
}

impl RecordedBlockLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a header delivered by the feed.
    pub async fn record(&self, header: &BlockHeader) {
        let mut headers = self.headers.write().await;
        headers.insert(header.number, *header);
    }
}

#[async_trait]
impl BlockLookup for RecordedBlockLookup {
    async fn get_block(&self, number: u64) -> Result<BlockHeader, BlockLookupError> {
        let headers = self.headers.read().await;
        headers
            .get(&number)
            .cloned()
            .ok_or(BlockLookupError::NotFound(number))
    }
}
