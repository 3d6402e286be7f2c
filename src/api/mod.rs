//! HTTP layer for request/response handling.
//!
//! Translates HTTP requests into service calls and formats responses.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Tracing and timeout layers

pub mod dto;
pub mod handlers;
pub mod middleware;
