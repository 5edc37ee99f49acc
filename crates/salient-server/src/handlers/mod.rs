//! HTTP request handlers

pub mod cache;
pub mod health;
pub mod performance;
pub mod predict;

// Re-export handler modules for convenience
pub use cache::*;
pub use health::*;
pub use performance::*;
pub use predict::*;
