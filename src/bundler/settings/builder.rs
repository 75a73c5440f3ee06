//! Builder for constructing Settings.

use super::Settings;
use crate::bail;
use crate::bundler::error::{Context, Result};
use std::path::{Path, PathBuf};

/// Default build tool scratch directory.
pub const DEFAULT_BUILD_PATH: &str = "_build";

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building assembly settings with validation of
/// required fields.
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
#[derive(Default)]
pub struct SettingsBuilder {
    product_name: Option<String>,
    bundle_identifier: Option<String>,
    copyright: Option<String>,
    deployment_target: Option<String>,
    sources: Vec<PathBuf>,
    frameworks: Vec<String>,
    build_path: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the product name.
    ///
    /// # Required
    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    /// Sets the bundle identifier.
    ///
    /// # Required
    pub fn bundle_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.bundle_identifier = Some(identifier.into());
        self
    }

    /// Sets the copyright string.
    ///
    /// # Required
    pub fn copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = Some(copyright.into());
        self
    }

    /// Sets the minimum macOS version, MAJOR.MINOR.
    ///
    /// # Required
    pub fn deployment_target(mut self, target: impl Into<String>) -> Self {
        self.deployment_target = Some(target.into());
        self
    }

    /// Sets the Swift source roots to scan.
    ///
    /// # Required
    ///
    /// At least one source is required for building.
    pub fn sources(mut self, sources: Vec<PathBuf>) -> Self {
        self.sources = sources;
        self
    }

    /// Sets framework names to link.
    ///
    /// Default: empty
    pub fn frameworks(mut self, frameworks: Vec<String>) -> Self {
        self.frameworks = frameworks;
        self
    }

    /// Sets the build tool scratch directory.
    ///
    /// Default: `_build`
    pub fn build_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing:
    /// - `product_name`
    /// - `bundle_identifier`
    /// - `copyright`
    /// - `deployment_target`
    /// - at least one source
    pub fn build(self) -> Result<Settings> {
        let build_path = self
            .build_path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_PATH));

        if self.sources.is_empty() {
            bail!("at least one source path is required");
        }

        Ok(Settings::new(
            self.product_name.context("product_name is required")?,
            self.bundle_identifier
                .context("bundle_identifier is required")?,
            self.copyright.context("copyright is required")?,
            self.deployment_target
                .context("deployment_target is required")?,
            self.sources,
            self.frameworks,
            build_path,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_missing_required_fields() {
        let err = SettingsBuilder::new()
            .bundle_identifier("com.example.viewer")
            .copyright("© 2018 Example")
            .deployment_target("10.13")
            .sources(vec!["Sources".into()])
            .build()
            .expect_err("product name missing");
        assert!(err.to_string().contains("product_name"));
    }

    #[test]
    fn requires_at_least_one_source() {
        let err = SettingsBuilder::new()
            .product_name("Viewer")
            .bundle_identifier("com.example.viewer")
            .copyright("© 2018 Example")
            .deployment_target("10.13")
            .build()
            .expect_err("sources missing");
        assert!(err.to_string().contains("source"));
    }

    #[test]
    fn defaults_the_build_path() {
        let settings = SettingsBuilder::new()
            .product_name("Viewer")
            .bundle_identifier("com.example.viewer")
            .copyright("© 2018 Example")
            .deployment_target("10.13")
            .sources(vec!["Sources".into()])
            .build()
            .expect("settings build");
        assert_eq!(settings.build_path(), Path::new(DEFAULT_BUILD_PATH));
    }
}
