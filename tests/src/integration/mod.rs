//! Cross-crate integration tests: raw felt events in, query views out.

pub mod fixtures;
pub mod governance_scenario;
pub mod ingestion;
pub mod treasury;
