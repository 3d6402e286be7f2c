#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use boltlink::config::HttpTimeouts;
use boltlink::domain::repositories::LinkRepository;
use boltlink::infrastructure::persistence::SledLinkRepository;
use boltlink::routes::app_router;
use boltlink::state::AppState;
use std::sync::Arc;

pub const COLLECTION: &str = "shorturls";

pub fn create_test_repository() -> Arc<SledLinkRepository> {
    Arc::new(SledLinkRepository::temporary(COLLECTION).unwrap())
}

pub fn create_test_state(repository: Arc<SledLinkRepository>) -> AppState {
    let repository: Arc<dyn LinkRepository> = repository;
    AppState::new(repository, 4)
}

pub fn create_test_app(repository: Arc<SledLinkRepository>) -> Router {
    app_router(create_test_state(repository), HttpTimeouts::default())
}

/// Full application on an in-memory transport plus a handle on its store.
pub fn create_test_server() -> (TestServer, Arc<SledLinkRepository>) {
    let repository = create_test_repository();
    let server = TestServer::new(create_test_app(repository.clone())).unwrap();
    (server, repository)
}

pub async fn create_test_link(repository: &SledLinkRepository, id: &str, destination: &str) {
    repository.put(id, destination).await.unwrap();
}
