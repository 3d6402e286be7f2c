//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// State cloned into each request.
///
/// Carries the one store handle opened at startup; there is no global state.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
}

impl AppState {
    /// Builds the state around an already opened repository.
    pub fn new(link_repository: Arc<dyn LinkRepository>, id_length_bytes: usize) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository, id_length_bytes)),
        }
    }
}
