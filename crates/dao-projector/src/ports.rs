//! # Store Ports
//!
//! The document-store SPI this core writes through and the read-side SPI
//! the query surface consumes. The store itself is an external
//! collaborator: it owns effective-dating (at most one current version per
//! document), uniqueness, and schema validation. Violations surface
//! verbatim as [`StoreError`]s.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// A stored document: a JSON object with camelCase field names.
pub type Document = serde_json::Map<String, Value>;

/// Errors surfaced by a store implementation.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Persisted-schema violation (type mismatch, uniqueness, required
    /// field), reported by the store as the authority.
    #[error("store schema violation: {0}")]
    Schema(String),

    /// Transport or backend failure.
    #[error("store backend error: {0}")]
    Backend(String),

    /// A value could not be represented as a stored document.
    #[error("store serialization error: {0}")]
    Serialization(String),
}

/// An equality filter over dotted field paths.
///
/// A path that crosses an array (`balances.tokenAddress`) matches a
/// document when *any* element matches, mirroring the store's array query
/// semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-clause equality filter.
    pub fn by(field: &str, value: impl Into<Value>) -> Self {
        Self::new().and(field, value)
    }

    /// Add an equality clause.
    pub fn and(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.clauses.push((field.to_owned(), value.into()));
        self
    }

    pub fn clauses(&self) -> &[(String, Value)] {
        &self.clauses
    }
}

/// One field-level mutation.
///
/// All operations are idempotent at the field level under the store's
/// exactly-once-per-event guarantee: `Set` overwrites by key, `Push` is a
/// monotonic append, `Inc` is applied once per delivered event.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOp {
    /// Overwrite the given top-level fields.
    Set(Document),
    /// Append a value to an array field, creating it when absent.
    Push { field: String, value: Value },
    /// Add a signed amount to a numeric field, creating it at zero when
    /// absent. Supports positional addressing `array.$.field`, resolved
    /// against the `array.key` equality clause of the update's filter.
    Inc { field: String, amount: i64 },
    /// Remove all elements equal to the value from an array field.
    Pull { field: String, value: Value },
}

/// An ordered batch of mutations applied to one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    ops: Vec<UpdateOp>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(doc: Document) -> Self {
        Self::new().and_set(doc)
    }

    pub fn push(field: &str, value: impl Into<Value>) -> Self {
        Self::new().and_push(field, value)
    }

    pub fn pull(field: &str, value: impl Into<Value>) -> Self {
        Self::new().and_pull(field, value)
    }

    pub fn and_set(mut self, doc: Document) -> Self {
        self.ops.push(UpdateOp::Set(doc));
        self
    }

    pub fn and_push(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.ops.push(UpdateOp::Push {
            field: field.to_owned(),
            value: value.into(),
        });
        self
    }

    pub fn and_inc(mut self, field: &str, amount: i64) -> Self {
        self.ops.push(UpdateOp::Inc {
            field: field.to_owned(),
            amount,
        });
        self
    }

    pub fn and_pull(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.ops.push(UpdateOp::Pull {
            field: field.to_owned(),
            value: value.into(),
        });
        self
    }

    pub fn ops(&self) -> &[UpdateOp] {
        &self.ops
    }
}

/// Write-side store port. The projector is its only caller.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError>;

    async fn insert_one(&self, collection: &str, doc: Document) -> Result<(), StoreError>;

    /// Apply an update to the first matching document, returning the
    /// pre-image, or `None` (and no write) when nothing matches.
    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Filter,
        update: Update,
    ) -> Result<Option<Document>, StoreError>;
}

/// Sort direction for read queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Pagination and ordering for read queries.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub skip: usize,
    pub limit: Option<usize>,
    /// Sort by a top-level numeric or string field.
    pub sort: Option<(String, SortOrder)>,
}

impl FindOptions {
    pub fn paginated(skip: usize, limit: usize) -> Self {
        Self {
            skip,
            limit: Some(limit),
            sort: None,
        }
    }

    pub fn sorted_desc(mut self, field: &str) -> Self {
        self.sort = Some((field.to_owned(), SortOrder::Descending));
        self
    }
}

/// Read-side store port used by the query surface. Strictly read-only.
#[async_trait]
pub trait ReadStore: Send + Sync {
    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>, StoreError>;
}
