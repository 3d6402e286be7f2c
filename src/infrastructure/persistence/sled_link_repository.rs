//! `sled` implementation of link repository.

use async_trait::async_trait;
use sled::transaction::{ConflictableTransactionError, TransactionError};
use std::convert::Infallible;
use std::path::Path;

use crate::domain::entities::Link;
use crate::domain::repositories::{LinkRepository, StoreError};

impl From<sled::Error> for StoreError {
    fn from(e: sled::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}

/// Link storage backed by one named tree of an embedded `sled` database.
///
/// The tree is not created when the repository is opened, only on the first
/// [`LinkRepository::put`]. Until then lookups report
/// [`StoreError::CollectionMissing`].
///
/// `sled::Db` is a cheap handle over shared state, so the repository can be
/// cloned freely. Writers are serialized by the engine.
#[derive(Clone)]
pub struct SledLinkRepository {
    db: sled::Db,
    collection: String,
}

impl SledLinkRepository {
    /// Opens (or creates) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the files cannot be opened or are
    /// locked by another process.
    pub fn open(path: impl AsRef<Path>, collection: impl Into<String>) -> Result<Self, StoreError> {
        let db = sled::Config::new().path(path).open()?;
        Ok(Self::from_db(db, collection))
    }

    /// Opens a throw-away database removed when the last handle is dropped.
    pub fn temporary(collection: impl Into<String>) -> Result<Self, StoreError> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self::from_db(db, collection))
    }

    /// Wraps an already opened database.
    pub fn from_db(db: sled::Db, collection: impl Into<String>) -> Self {
        Self {
            db,
            collection: collection.into(),
        }
    }

    /// Name of the tree holding the links.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns true once the first link has been stored.
    pub fn collection_exists(&self) -> bool {
        self.db
            .tree_names()
            .iter()
            .any(|name| name.as_ref() == self.collection.as_bytes())
    }

    /// Size of the database files in bytes.
    pub fn size_on_disk(&self) -> Result<u64, StoreError> {
        Ok(self.db.size_on_disk()?)
    }

    fn existing_tree(&self) -> Result<Option<sled::Tree>, StoreError> {
        if !self.collection_exists() {
            return Ok(None);
        }
        Ok(Some(self.db.open_tree(&self.collection)?))
    }
}

fn decode_destination(id: &[u8], value: &[u8]) -> Result<String, StoreError> {
    String::from_utf8(value.to_vec()).map_err(|e| {
        StoreError::Corrupted(format!(
            "destination for {} is not UTF-8: {}",
            String::from_utf8_lossy(id),
            e
        ))
    })
}

#[async_trait]
impl LinkRepository for SledLinkRepository {
    async fn put(&self, id: &str, destination: &str) -> Result<(), StoreError> {
        let tree = self.db.open_tree(&self.collection)?;

        tree.transaction(|tx| {
            tx.insert(id.as_bytes(), destination.as_bytes())?;
            Ok::<_, ConflictableTransactionError<Infallible>>(())
        })
        .map_err(|e: TransactionError<Infallible>| StoreError::Storage(e.to_string()))?;

        self.db.flush_async().await?;

        tracing::debug!(id, collection = %self.collection, "link stored");
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<String>, StoreError> {
        let tree = self
            .existing_tree()?
            .ok_or(StoreError::CollectionMissing)?;

        match tree.get(id.as_bytes())? {
            Some(value) => decode_destination(id.as_bytes(), &value).map(Some),
            None => Ok(None),
        }
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.existing_tree()?.map(|tree| tree.len()).unwrap_or(0))
    }

    async fn list(&self, limit: usize) -> Result<Vec<Link>, StoreError> {
        let Some(tree) = self.existing_tree()? else {
            return Ok(Vec::new());
        };

        let mut links = Vec::new();
        for entry in tree.iter().take(limit) {
            let (key, value) = entry?;
            let id = String::from_utf8(key.to_vec())
                .map_err(|e| StoreError::Corrupted(format!("short id is not UTF-8: {}", e)))?;
            let destination = decode_destination(&key, &value)?;
            links.push(Link::new(id, destination));
        }

        Ok(links)
    }

    async fn health_check(&self) -> bool {
        match self.existing_tree() {
            Ok(Some(tree)) => tree.first().is_ok(),
            Ok(None) => true,
            Err(e) => {
                tracing::warn!("Store health check failed: {}", e);
                false
            }
        }
    }

    async fn flush(&self) -> Result<(), StoreError> {
        self.db.flush_async().await?;
        Ok(())
    }
}
