//! Local File Server Library
//!
//! HTTPS service exposing create, read, update, delete and list operations
//! over `.txt` files in a single storage directory.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod services;
/// Application state shared with request handlers
pub mod state;
pub mod tls;
