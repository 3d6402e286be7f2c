//! Core domain entities.
//!
//! - [`Link`] - A short ID to destination mapping

pub mod link;

pub use link::Link;
