//! Error taxonomy for the persistence boundary
//!
//! Policy denials are never errors: resolvers return `false` map entries and
//! the evaluator returns tagged decisions. `StoreError` covers genuine
//! infrastructure faults only, and is left to propagate to the caller.

use thiserror::Error;

/// Store result type
pub type StoreResult<T> = Result<T, StoreError>;

/// Infrastructure faults from the persistent store
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A row that must exist is missing
    #[error("not found: {0}")]
    NotFound(String),

    /// A write conflicted with an existing row
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store itself failed
    #[error("storage error: {0}")]
    Storage(String),
}
