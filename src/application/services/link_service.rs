//! Link creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::{LinkRepository, StoreError};
use crate::error::AppError;
use crate::utils::id_generator::{DEFAULT_ID_LENGTH_BYTES, generate_id};

/// Service for creating and resolving short links.
///
/// Holds the single store handle opened at startup. Generated IDs are not
/// checked against existing ones: on a collision the newer destination wins.
#[derive(Clone)]
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    id_length_bytes: usize,
}

impl LinkService {
    /// Creates a new link service generating IDs of `id_length_bytes` random bytes.
    pub fn new(link_repository: Arc<dyn LinkRepository>, id_length_bytes: usize) -> Self {
        Self {
            link_repository,
            id_length_bytes,
        }
    }

    /// Creates a link service with the default 4-byte IDs.
    pub fn with_default_id_length(link_repository: Arc<dyn LinkRepository>) -> Self {
        Self::new(link_repository, DEFAULT_ID_LENGTH_BYTES)
    }

    /// Number of random bytes behind each generated ID.
    pub fn id_length_bytes(&self) -> usize {
        self.id_length_bytes
    }

    /// Underlying repository, for health checks and shutdown.
    pub fn repository(&self) -> &Arc<dyn LinkRepository> {
        &self.link_repository
    }

    /// Generates a fresh ID and stores `destination` under it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::IdGeneration`] if the randomness source fails and
    /// [`AppError::Storage`] if the write transaction fails. Nothing is stored
    /// in either case.
    pub async fn create_link(&self, destination: String) -> Result<Link, AppError> {
        let id = generate_id(self.id_length_bytes)
            .map_err(|e| AppError::IdGeneration(e.to_string()))?;

        // The write runs to completion even if this future is dropped.
        let repository = Arc::clone(&self.link_repository);
        let (stored_id, stored_destination) = (id.clone(), destination.clone());
        tokio::spawn(async move { repository.put(&stored_id, &stored_destination).await })
            .await
            .map_err(|e| AppError::Storage(format!("write task failed: {}", e)))??;

        tracing::info!(id = %id, "Short link created");
        Ok(Link::new(id, destination))
    }

    /// Returns the destination stored for `id`.
    ///
    /// # Errors
    ///
    /// - [`AppError::CollectionMissing`] if no link was ever stored
    /// - [`AppError::NotFound`] if the ID is unknown or maps to an empty value
    /// - [`AppError::Internal`] on read failures
    pub async fn resolve(&self, id: &str) -> Result<String, AppError> {
        let destination = self.link_repository.get(id).await.map_err(|e| match e {
            StoreError::CollectionMissing => AppError::CollectionMissing,
            StoreError::Storage(reason) | StoreError::Corrupted(reason) => {
                AppError::Internal(reason)
            }
        })?;

        match destination {
            Some(destination) if !destination.is_empty() => Ok(destination),
            _ => Err(AppError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::id_generator::decode_id;

    fn service(mock: MockLinkRepository) -> LinkService {
        LinkService::with_default_id_length(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_create_link_success() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_put()
            .withf(|id, destination| id.len() == 8 && destination == "https://example.com")
            .times(1)
            .returning(|_, _| Ok(()));

        let link = service(mock_link_repo)
            .create_link("https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(link.destination, "https://example.com");
        assert_eq!(decode_id(&link.id).unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_create_link_uses_configured_length() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_put()
            .times(1)
            .returning(|_, _| Ok(()));

        let service = LinkService::new(Arc::new(mock_link_repo), 12);
        let link = service
            .create_link("https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(link.id.len(), 16);
        assert_eq!(decode_id(&link.id).unwrap().len(), 12);
    }

    #[tokio::test]
    async fn test_create_link_storage_failure() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_put()
            .times(1)
            .returning(|_, _| Err(StoreError::Storage("disk full".to_string())));

        let result = service(mock_link_repo)
            .create_link("https://example.com".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Storage(_)));
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_get()
            .withf(|id| id == "abcd1234")
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let destination = service(mock_link_repo).resolve("abcd1234").await.unwrap();

        assert_eq!(destination, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_unknown_id() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_get()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(mock_link_repo).resolve("missing").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn test_resolve_empty_destination_is_not_found() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_get()
            .times(1)
            .returning(|_| Ok(Some(String::new())));

        let result = service(mock_link_repo).resolve("empty").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn test_resolve_missing_collection() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_get()
            .times(1)
            .returning(|_| Err(StoreError::CollectionMissing));

        let result = service(mock_link_repo).resolve("anything").await;

        assert!(matches!(result.unwrap_err(), AppError::CollectionMissing));
    }

    #[tokio::test]
    async fn test_resolve_read_failure_is_internal() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_get()
            .times(1)
            .returning(|_| Err(StoreError::Storage("io error".to_string())));

        let result = service(mock_link_repo).resolve("anything").await;

        assert!(matches!(result.unwrap_err(), AppError::Internal(_)));
    }
}
