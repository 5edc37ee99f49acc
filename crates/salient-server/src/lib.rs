//! Salient Server - HTTP prediction and explanation API
//!
//! This crate exposes the pretrained sales regression model and its
//! additive explainer over HTTP: a plain prediction endpoint, a cached
//! and an uncached explanation endpoint, a cache reset, and an in-process
//! performance comparison across the three serving modes.

/// Version of the salient-server crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::SalientServer;
