//! HTTP client functionality for optisam smoke tests
//!
//! This crate provides the [`ProbeClient`] seam used by the runner, and a
//! reqwest-backed implementation configured from `smoke-config`.

pub mod client;
pub mod config;
pub mod errors;
pub mod types;

// Re-export main types for convenience
pub use client::{FormResponse, HttpManager, ProbeClient, ProbeRequest, ProbeResponse};
pub use config::HttpConfig;
pub use errors::HttpError;
pub use types::HttpMethod;
