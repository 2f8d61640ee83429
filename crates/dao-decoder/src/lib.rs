//! # Event Decoder Subsystem
//!
//! Turns a raw chain event — a name plus an array of felts — into a typed
//! record, using the emitting contract's event schema.
//!
//! ## Responsibilities
//!
//! - Resolve a contract's event schema through the [`SchemaProvider`] port,
//!   cached by contract address in a bounded LRU
//! - Decode each felt per its declared field type: integer, boolean,
//!   address, packed short string, or block-number reference
//! - Resolve block-number references to timestamps, consulting the
//!   [`BlockLookup`] port (LRU cached) only when the referenced block is
//!   not the one being processed
//!
//! ## Failure Semantics
//!
//! An unknown field type or an arity mismatch is a fatal decode error for
//! that event only; the pipeline logs it and moves on. Schemas and
//! historical blocks are immutable, so cached entries never need
//! invalidation.

pub mod decoder;
pub mod ports;
pub mod schema;

pub use decoder::{DecodedEvent, DecodedValue, DecodeError, DecoderConfig, EventDecoder};
pub use ports::{BlockLookup, BlockLookupError, SchemaError, SchemaProvider};
pub use schema::{dao_governance_schema, ContractSchema, EventField, EventSchema, FieldType};
