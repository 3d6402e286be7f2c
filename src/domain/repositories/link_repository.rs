//! Repository trait for short link data access.

use crate::domain::entities::Link;
use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by a [`LinkRepository`].
///
/// A missing key is not an error: lookups return `Ok(None)` for it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The collection holding the links has never been created.
    #[error("link collection not found")]
    CollectionMissing,

    /// The underlying engine failed (I/O, transaction, flush).
    #[error("storage failure: {0}")]
    Storage(String),

    /// A stored record could not be decoded.
    #[error("corrupted record: {0}")]
    Corrupted(String),
}

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SledLinkRepository`] - embedded `sled` store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists `id -> destination` in a single write transaction.
    ///
    /// Creates the backing collection if it does not exist yet. An existing
    /// mapping with the same `id` is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the transaction or the flush fails.
    async fn put(&self, id: &str, destination: &str) -> Result<(), StoreError>;

    /// Looks up the destination stored for `id`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(destination))` if found
    /// - `Ok(None)` if the key is absent
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CollectionMissing`] if nothing was ever stored,
    /// [`StoreError::Storage`] on engine failures.
    async fn get(&self, id: &str) -> Result<Option<String>, StoreError>;

    /// Counts stored links. Zero when the collection does not exist.
    async fn count(&self) -> Result<usize, StoreError>;

    /// Lists up to `limit` links in key order.
    async fn list(&self, limit: usize) -> Result<Vec<Link>, StoreError>;

    /// Returns true when the store answers reads.
    async fn health_check(&self) -> bool;

    /// Forces buffered writes to disk.
    async fn flush(&self) -> Result<(), StoreError>;
}
