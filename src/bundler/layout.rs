//! Bundle directory layout.
//!
//! A macOS application bundle is a fixed directory skeleton under
//! `<Name>.app/Contents`. All paths are derived up front from the settings;
//! creation is idempotent so re-running over a previous bundle is safe.

use std::path::{Path, PathBuf};

#[cfg(unix)]
use crate::bundler::error::ErrorExt;
use crate::bundler::error::{Error, Result};
use crate::bundler::settings::Settings;
use crate::bundler::utils::fs;

/// Filesystem locations of one application bundle.
#[derive(Debug, Clone)]
pub struct BundleLayout {
    bundle_dir: PathBuf,
    contents_dir: PathBuf,
    frameworks_dir: PathBuf,
    macos_dir: PathBuf,
    resources_dir: PathBuf,
    executable_src: PathBuf,
    executable_dst: PathBuf,
}

impl BundleLayout {
    /// Derives the layout for the configured product.
    pub fn new(settings: &Settings) -> Self {
        let mode_dir = settings.mode_path();
        let bundle_dir = mode_dir.join(format!("{}.app", settings.product_name()));
        let contents_dir = bundle_dir.join("Contents");
        let frameworks_dir = contents_dir.join("Frameworks");
        let macos_dir = contents_dir.join("MacOS");
        let resources_dir = contents_dir.join("Resources");
        let executable_src = mode_dir.join(settings.product_name());
        let executable_dst = macos_dir.join(settings.product_name());

        Self {
            bundle_dir,
            contents_dir,
            frameworks_dir,
            macos_dir,
            resources_dir,
            executable_src,
            executable_dst,
        }
    }

    /// Returns the `<Name>.app` directory.
    pub fn bundle_dir(&self) -> &Path {
        &self.bundle_dir
    }

    /// Returns the `Contents` directory.
    #[allow(dead_code)] // Public API - preserved for external consumers
    pub fn contents_dir(&self) -> &Path {
        &self.contents_dir
    }

    /// Returns the `Contents/Frameworks` directory.
    pub fn frameworks_dir(&self) -> &Path {
        &self.frameworks_dir
    }

    /// Returns the `Contents/MacOS` directory.
    #[allow(dead_code)] // Public API - preserved for external consumers
    pub fn macos_dir(&self) -> &Path {
        &self.macos_dir
    }

    /// Returns the `Contents/Resources` directory.
    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    /// Returns the in-bundle executable path.
    pub fn executable_dst(&self) -> &Path {
        &self.executable_dst
    }

    /// Returns where `Info.plist` belongs.
    pub fn manifest_path(&self) -> PathBuf {
        self.contents_dir.join("Info.plist")
    }

    /// Creates the bundle directory skeleton.
    ///
    /// Safe to call over an existing bundle.
    pub async fn create_directories(&self) -> Result<()> {
        let dirs = [
            &self.bundle_dir,
            &self.contents_dir,
            &self.frameworks_dir,
            &self.macos_dir,
            &self.resources_dir,
        ];
        for dir in dirs {
            fs::create_dir_all(dir).await?;
        }
        Ok(())
    }

    /// Copies the built executable into `Contents/MacOS`.
    ///
    /// # Errors
    ///
    /// Returns `MissingExecutable` when the build output is absent, which
    /// usually means the product name does not match the package manifest.
    pub async fn copy_executable(&self) -> Result<()> {
        if !self.executable_src.is_file() {
            return Err(Error::MissingExecutable {
                path: self.executable_src.clone(),
            });
        }
        fs::copy_file(&self.executable_src, &self.executable_dst).await?;

        #[cfg(unix)]
        {
            // Set executable permissions on the launched binary
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(
                &self.executable_dst,
                std::fs::Permissions::from_mode(0o755),
            )
            .await
            .fs_context("setting executable permissions", &self.executable_dst)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::SettingsBuilder;

    #[test]
    fn derives_the_bundle_skeleton_paths() {
        let settings = SettingsBuilder::default()
            .product_name("Viewer")
            .bundle_identifier("com.example.viewer")
            .copyright("© 2026 Example")
            .deployment_target("10.13")
            .sources(vec![PathBuf::from("Sources")])
            .build_path("out")
            .build()
            .unwrap();

        let layout = BundleLayout::new(&settings);

        assert_eq!(layout.bundle_dir(), Path::new("out/debug/Viewer.app"));
        assert_eq!(
            layout.frameworks_dir(),
            Path::new("out/debug/Viewer.app/Contents/Frameworks")
        );
        assert_eq!(
            layout.executable_dst(),
            Path::new("out/debug/Viewer.app/Contents/MacOS/Viewer")
        );
        assert_eq!(
            layout.manifest_path(),
            Path::new("out/debug/Viewer.app/Contents/Info.plist")
        );
        assert_eq!(layout.executable_src, Path::new("out/debug/Viewer"));
    }
}
