//! # boltlink
//!
//! A small URL shortening service built with Axum and an embedded `sled` store.
//!
//! ## Architecture
//!
//! The crate keeps the usual layer separation even though the core is tiny:
//!
//! - **Domain Layer** ([`domain`]) - The short link entity and the store contract
//! - **Application Layer** ([`application`]) - Link creation and resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - `sled`-backed persistence
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs and middleware
//!
//! ## HTTP API
//!
//! - `POST /` with `{"destination": "https://example.com"}` returns `201` and
//!   `{"id": "...", "destination": "..."}`
//! - `GET /{id}` answers `301 Moved Permanently` to the stored destination
//! - `GET /health` reports store health
//!
//! ## Quick Start
//!
//! ```bash
//! export DB_PATH="urlshortner.db"   # Optional
//! export LISTEN="0.0.0.0:8080"      # Optional
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::Link;
    pub use crate::domain::repositories::{LinkRepository, StoreError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::SledLinkRepository;
    pub use crate::state::AppState;
}
