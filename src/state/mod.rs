// State management module
// Holds the immutable per-process state handed to request handlers

pub mod app_state;

pub use app_state::AppState;
