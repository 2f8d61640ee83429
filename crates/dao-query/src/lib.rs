//! # Query Surface
//!
//! Read-only, paginated access to the projected entities, with every
//! derived governance field computed on read. This crate produces the
//! records a transport layer (GraphQL, REST) binds to; it owns none of
//! the serving.
//!
//! ## Shape of a Response
//!
//! List queries return partial data plus a structured error list: a
//! document that fails to deserialize contributes a [`FieldError`] and is
//! dropped from the page, it never fails the whole request. Only invalid
//! caller input (a malformed address, a store outage) is a hard
//! [`QueryError`].
//!
//! Everything in this crate is side-effect-free over committed state and
//! safe to call concurrently.

pub mod bank;
pub mod errors;
pub mod members;
pub mod proposals;
pub mod service;

pub use bank::BankView;
pub use errors::{FieldError, QueryError};
pub use members::MemberView;
pub use proposals::ProposalView;
pub use service::{unix_now, Page, QueryResponse, QueryService};
