//! API module
//!
//! Contains HTTP request handlers for the health probe and managed files

pub mod files;
pub mod health;

// Re-export handlers for convenience (used by the router)
pub use files::*;
pub use health::health_check;
