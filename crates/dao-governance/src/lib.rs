//! # Governance Engine
//!
//! The read-path brain of the indexer: vote tallies, eligibility, and the
//! proposal lifecycle state machine.
//!
//! Everything here is a pure function over already-committed entity
//! state — no I/O, no clocks, no mutation. Callers pass `now` in, which
//! makes every boundary instant directly testable and the whole crate
//! safe to call concurrently from any number of query requests.

pub mod eligibility;
pub mod lifecycle;
pub mod tally;

pub use eligibility::is_votable;
pub use lifecycle::{
    derive_lifecycle, derive_status, grace_period_ending_at, voting_period_ending_at,
    ProposalLifecycle,
};
pub use tally::VoteTally;
