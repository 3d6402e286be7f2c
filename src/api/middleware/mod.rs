//! HTTP middleware for request processing.
//!
//! Provides observability and connection timeout layers.

pub mod timeout;
pub mod tracing;
