//! Query-boundary error types.

use serde::Serialize;
use thiserror::Error;

use dao_types::AddressParseError;

use dao_projector::StoreError;

/// A hard failure of a query request.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Caller-supplied address string rejected at the boundary, never
    /// silently coerced.
    #[error(transparent)]
    InvalidAddress(#[from] AddressParseError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A singleton record the query depends on does not exist yet.
    #[error("no {entity} record exists yet")]
    NotFound { entity: &'static str },
}

/// One per-field resolution failure, reported beside partial data.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    /// Where in the response the failure occurred, e.g. `proposals[3]`.
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl ToString) -> Self {
        Self {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
