//! Request timeout middleware.
//!
//! The idle (keep-alive) timeout is not a layer: it is applied per
//! connection in [`crate::server`].

use axum::http::StatusCode;
use std::time::Duration;
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};

/// Limits how long the client may take to send the request body.
///
/// A body that is not fully received in time fails to buffer and the body
/// extractor rejects the request with `400 Bad Request`.
pub fn read_layer(read_timeout: Duration) -> RequestBodyTimeoutLayer {
    RequestBodyTimeoutLayer::new(read_timeout)
}

/// Limits how long a handler may take to produce its response.
///
/// Answers `408 Request Timeout` when exceeded. The handler future is
/// dropped at that point, but a store write already started keeps running on
/// its own task, so the link may still be committed after a `408`.
pub fn write_layer(write_timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, write_timeout)
}
