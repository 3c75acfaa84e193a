//! Service layer for business logic
//!
//! This module contains service abstractions that separate filesystem work
//! from HTTP handlers, making the code more modular and testable.

pub mod files;
