//! # Outbound Ports
//!
//! SPIs the decoder depends on. Both are network-backed in production and
//! trivially mockable in tests; both return immutable data, which is what
//! makes unbounded-lifetime LRU caching sound.

use async_trait::async_trait;
use thiserror::Error;

use dao_types::{Address, BlockHeader};

use crate::schema::ContractSchema;

/// Errors from schema resolution.
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    /// No contract deployed at the address, or it exposes no ABI.
    #[error("no schema available for contract {0}")]
    NotFound(Address),

    /// Transport-level failure talking to the schema source.
    #[error("schema fetch failed: {0}")]
    Fetch(String),
}

/// Resolves a contract's event schema, assumed immutable per address.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    async fn resolve(&self, contract: Address) -> Result<ContractSchema, SchemaError>;
}

/// Errors from block lookups.
#[derive(Debug, Clone, Error)]
pub enum BlockLookupError {
    #[error("block {0} not found")]
    NotFound(u64),

    #[error("block fetch failed: {0}")]
    Fetch(String),
}

/// Fetches a historical block header by number.
#[async_trait]
pub trait BlockLookup: Send + Sync {
    async fn get_block(&self, number: u64) -> Result<BlockHeader, BlockLookupError>;
}
