//! # State Projector Subsystem
//!
//! Routes decoded governance events to their handlers and projects them
//! into the document store as idempotent, field-level mutations.
//!
//! ## Components
//!
//! - **Router** (`router`): static event-name → [`EventKind`] table;
//!   unknown names are a logged data condition, never a type error
//! - **Typed events** (`events`): explicit per-event structs built from a
//!   decoded record, enumerating required fields
//! - **Handlers** (`handlers`): one mutation recipe per event, writing to
//!   the Proposals, Members, and Bank families
//! - **Store port** (`ports`): the Mongo-shaped document store SPI —
//!   `find_one` / `insert_one` / `find_one_and_update` with set, push,
//!   increment, and pull operations
//! - **Memory adapter** (`memory`): in-process store for tests and dev runs
//! - **Pipeline** (`pipeline`): the serial, ordered per-block loop wiring
//!   decoder → router → handlers
//!
//! ## Write Ownership
//!
//! This crate is the only writer of the three entity families. Handlers
//! perform read-modify-write sequences and therefore assume strictly
//! serial execution per store; the pipeline guarantees it.

pub mod events;
pub mod handlers;
pub mod memory;
pub mod pipeline;
pub mod ports;
pub mod router;
pub mod storage;

pub use handlers::{Projector, ProjectorError};
pub use memory::MemoryStore;
pub use pipeline::Pipeline;
pub use ports::{
    Document, DocumentStore, Filter, FindOptions, ReadStore, SortOrder, StoreError, Update,
    UpdateOp,
};
pub use router::EventKind;
