//! # Shared Types Crate
//!
//! Domain entities, chain primitives, and status enums shared by every
//! crate in the indexer workspace.
//!
//! ## Clusters
//!
//! - **Chain**: `Felt`, `Address`, `BlockHeader`, `RawEvent`, `BlockEvents`
//! - **Governance**: `Proposal`, `ProposalParams`, `ProposalRawStatus`,
//!   `ProposalStatus`
//! - **Membership & Treasury**: `Member`, `Bank`, `Balance`, `LedgerEntry`
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every cross-crate type lives here.
//! - **Store-Shaped Serialization**: entities serialize with the camelCase
//!   field names the document store uses, so a stored document round-trips
//!   into its typed form without a translation layer.

pub mod entities;
pub mod events;
pub mod felt;
pub mod status;

pub use entities::*;
pub use events::*;
pub use felt::{
    felt_to_short_string, short_string_to_felt, Address, AddressParseError, Felt, ShortStringError,
};
pub use status::{ProposalRawStatus, ProposalStatus, RawStatusParseError};

/// Unix timestamp in seconds.
pub type Timestamp = u64;
