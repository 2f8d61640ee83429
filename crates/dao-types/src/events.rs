//! Raw event feed types, as consumed from the chain-facing boundary.

use serde::{Deserialize, Serialize};

use crate::felt::{Address, Felt};
use crate::Timestamp;

/// Header of the block containing a batch of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BlockHeader {
    /// Block height on the source chain.
    pub number: u64,
    /// Unix timestamp the block was sealed at.
    pub timestamp: Timestamp,
}

/// A chain-native event: a name plus an array of fixed-width felts whose
/// meaning is only known once the emitting contract's schema is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub contract_address: Address,
    pub name: String,
    pub data: Vec<Felt>,
}

/// One ordered group of events emitted during a single block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEvents {
    pub header: BlockHeader,
    pub events: Vec<RawEvent>,
}
