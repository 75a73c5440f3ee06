//! Core Settings struct and implementations.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::bundler::error::{Error, Result};

/// Build mode subdirectory used by the Swift build tool.
///
/// Release-mode assembly is not supported; every artifact lands under
/// `debug`.
pub const BUILD_MODE: &str = "debug";

/// Architecture half of the target triple handed to the build tool.
const TRIPLE_PREFIX: &str = "x86_64-apple-macosx";

/// Deployment targets are plain MAJOR.MINOR version strings.
static DEPLOYMENT_TARGET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+$").expect("deployment target pattern is valid"));

/// Main settings for a bundle assembly run.
///
/// Central configuration constructed via [`SettingsBuilder`], immutable for
/// the duration of the run.
///
/// # Examples
///
/// ```no_run
/// use macbundle::bundler::SettingsBuilder;
///
/// # fn example() -> macbundle::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .product_name("Viewer")
///     .bundle_identifier("com.example.viewer")
///     .copyright("© 2018 Example")
///     .deployment_target("10.13")
///     .sources(vec!["Sources".into()])
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Product name; also the executable and bundle base name.
    product_name: String,

    /// Reverse-DNS bundle identifier.
    bundle_identifier: String,

    /// Human readable copyright string.
    copyright: String,

    /// Minimum macOS version, MAJOR.MINOR.
    deployment_target: String,

    /// Swift source roots scanned for import declarations.
    sources: Vec<PathBuf>,

    /// Framework names to link.
    ///
    /// Accepted and recorded; nothing consumes them beyond that yet.
    frameworks: Vec<String>,

    /// Build tool scratch/output directory.
    build_path: PathBuf,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Returns the bundle identifier.
    pub fn bundle_identifier(&self) -> &str {
        &self.bundle_identifier
    }

    /// Returns the copyright string.
    pub fn copyright(&self) -> &str {
        &self.copyright
    }

    /// Returns the deployment target.
    pub fn deployment_target(&self) -> &str {
        &self.deployment_target
    }

    /// Returns the Swift source roots.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Returns the framework names.
    pub fn frameworks(&self) -> &[String] {
        &self.frameworks
    }

    /// Returns the build directory.
    pub fn build_path(&self) -> &Path {
        &self.build_path
    }

    /// Returns the directory holding the build mode's products.
    ///
    /// This is where the compiled executable and the bundle itself live,
    /// `<build>/debug`.
    pub fn mode_path(&self) -> PathBuf {
        self.build_path.join(BUILD_MODE)
    }

    /// Returns the target triple handed to the Swift build tool.
    ///
    /// The deployment target is baked into the triple, e.g.
    /// `x86_64-apple-macosx10.13`.
    pub fn target_triple(&self) -> String {
        format!("{TRIPLE_PREFIX}{}", self.deployment_target)
    }

    /// Validates the settings before any external process runs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the deployment target is not a
    /// MAJOR.MINOR version string or any source path does not exist.
    pub fn validate(&self) -> Result<()> {
        if !DEPLOYMENT_TARGET_RE.is_match(&self.deployment_target) {
            return Err(Error::InvalidConfiguration(format!(
                "deployment target {:?} does not match MAJOR.MINOR",
                self.deployment_target
            )));
        }

        for source in &self.sources {
            if !source.exists() {
                return Err(Error::InvalidConfiguration(format!(
                    "source path {} does not exist",
                    source.display()
                )));
            }
        }

        Ok(())
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        product_name: String,
        bundle_identifier: String,
        copyright: String,
        deployment_target: String,
        sources: Vec<PathBuf>,
        frameworks: Vec<String>,
        build_path: PathBuf,
    ) -> Self {
        Self {
            product_name,
            bundle_identifier,
            copyright,
            deployment_target,
            sources,
            frameworks,
            build_path,
        }
    }
}
