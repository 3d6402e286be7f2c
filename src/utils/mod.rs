//! Utility functions shared across layers.
//!
//! - [`id_generator`] - Short ID generation and decoding

pub mod id_generator;
