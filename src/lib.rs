//! macOS application bundle assembler
//!
//! This library assembles a launchable `.app` bundle from a SwiftPM build:
//! - builds the product and lays out the bundle directory skeleton
//! - compiles the asset catalog with actool
//! - generates `Info.plist` from baseline, identity and actool metadata
//! - copies the Swift runtime libraries the sources import
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
