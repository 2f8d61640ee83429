//! # DAO Indexer Test Suite
//!
//! Unified test crate exercising the full path across crates:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs            # Raw-felt event builders, schema/block mocks
//!     ├── governance_scenario.rs # End-to-end proposal lifecycle
//!     ├── ingestion.rs           # Pipeline error policy
//!     └── treasury.rs            # Bank and balance-ledger flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p dao-tests
//! cargo test -p dao-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;
