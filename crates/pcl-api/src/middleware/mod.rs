//! # HTTP Middleware
//!
//! - `tracing_layer`: per-request spans via `tower-http`.

pub mod tracing_layer;
