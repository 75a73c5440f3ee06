//! Bundle assembly for macOS applications.
//!
//! Turns a compiled SwiftPM product into a launchable `<Name>.app`: builds
//! the product, lays out the bundle skeleton, compiles the asset catalog,
//! writes `Info.plist`, and copies the Swift runtime libraries the sources
//! import. The whole sequence is driven by [`Pipeline`].

#![warn(missing_docs)]

pub mod assets;
pub mod error;
pub mod imports;
pub mod layout;
pub mod libraries;
pub mod manifest;
pub mod pipeline;
pub mod settings;
pub mod swift;
pub mod toolchain;
pub(crate) mod utils;

pub use error::{Context, Error, ErrorExt, Result};
pub use imports::ImportSet;
pub use manifest::ManifestBaseline;
pub use pipeline::{BundledApp, Pipeline, PipelineState};
pub use settings::{Settings, SettingsBuilder};
pub use toolchain::ToolchainPaths;
