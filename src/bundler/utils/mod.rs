//! Shared utilities for bundle assembly.

pub mod fs;
