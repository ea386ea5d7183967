//! avimosh Common Utilities
//!
//! Shared infrastructure for all avimosh crates:
//! - Error types and result aliases
//! - Per-run configuration and persisted user defaults
//! - Tracing/logging initialization

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
