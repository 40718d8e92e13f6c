//! HTTP request/response types and the axum integration.

mod types;

pub use types::*;

pub mod axum;
