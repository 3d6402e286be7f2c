//! Embedded key-value repository implementations.
//!
//! # Repositories
//!
//! - [`SledLinkRepository`] - Link storage in a named `sled` tree

pub mod sled_link_repository;

pub use sled_link_repository::SledLinkRepository;
