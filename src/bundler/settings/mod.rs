//! Configuration structures for bundle assembly.
//!
//! Provides the settings type consumed by the pipeline and the builder used
//! to construct it from CLI or library input.

mod builder;
mod core;

// Re-export all public types
pub use builder::{DEFAULT_BUILD_PATH, SettingsBuilder};
pub use core::{BUILD_MODE, Settings};
