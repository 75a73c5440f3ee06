//! Xcode developer directory discovery.
//!
//! Everything the pipeline needs from the host toolchain hangs off the
//! directory reported by `xcode-select --print-path`: the macOS SDK and the
//! directory holding the Swift runtime dylibs.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio::process::Command;

use crate::bundler::error::{Error, Result};

/// Location of xcode-select, resolved once per process.
///
/// Cached result to avoid repeated PATH lookups during assembly.
static XCODE_SELECT: LazyLock<Option<PathBuf>> =
    LazyLock::new(|| match which::which("xcode-select") {
        Ok(path) => {
            log::debug!("Found xcode-select at: {}", path.display());
            Some(path)
        }
        Err(e) => {
            log::debug!("xcode-select not found in PATH: {}", e);
            None
        }
    });

/// Paths derived from the active developer directory.
///
/// Computed once per run; read-only afterwards.
#[derive(Debug, Clone)]
pub struct ToolchainPaths {
    /// Active developer directory.
    developer_dir: PathBuf,
    /// macOS SDK root.
    sdk_dir: PathBuf,
    /// Directory holding the Swift runtime dylibs for macOS.
    swift_libs_dir: PathBuf,
}

impl ToolchainPaths {
    /// Derives all toolchain paths from a developer directory.
    pub fn from_developer_dir(developer_dir: impl Into<PathBuf>) -> Self {
        let developer_dir = developer_dir.into();
        // The versioned SDK directory is a symlink to this unversioned one
        let sdk_dir =
            developer_dir.join("Platforms/MacOSX.platform/Developer/SDKs/MacOSX.sdk");
        let swift_libs_dir =
            developer_dir.join("Toolchains/XcodeDefault.xctoolchain/usr/lib/swift/macosx");

        Self {
            developer_dir,
            sdk_dir,
            swift_libs_dir,
        }
    }

    /// Returns the active developer directory.
    pub fn developer_dir(&self) -> &Path {
        &self.developer_dir
    }

    /// Returns the macOS SDK root.
    pub fn sdk_dir(&self) -> &Path {
        &self.sdk_dir
    }

    /// Returns the directory holding the Swift runtime dylibs.
    pub fn swift_libs_dir(&self) -> &Path {
        &self.swift_libs_dir
    }
}

/// Locates the active developer directory and derives toolchain paths.
///
/// Runs `xcode-select --print-path` and strips trailing whitespace from its
/// stdout before any path concatenation.
///
/// # Errors
///
/// Returns `ToolchainNotFound` if xcode-select is missing from PATH or
/// exits with a failure status.
pub async fn locate() -> Result<ToolchainPaths> {
    let xcode_select = XCODE_SELECT
        .as_deref()
        .ok_or_else(|| Error::ToolchainNotFound {
            reason: "xcode-select not found in PATH".into(),
        })?;

    let output = Command::new(xcode_select)
        .arg("--print-path")
        .output()
        .await
        .map_err(|error| Error::CommandFailed {
            command: "xcode-select --print-path".into(),
            error,
        })?;

    if !output.status.success() {
        return Err(Error::ToolchainNotFound {
            reason: format!("`xcode-select --print-path` exited with {}", output.status),
        });
    }

    let developer_dir = String::from_utf8_lossy(&output.stdout)
        .trim_end()
        .to_string();

    let paths = ToolchainPaths::from_developer_dir(developer_dir);
    log::debug!("Developer directory: {}", paths.developer_dir().display());
    log::debug!("macOS SDK: {}", paths.sdk_dir().display());
    log::debug!("Swift runtime libraries: {}", paths.swift_libs_dir().display());

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_sdk_and_runtime_directories() {
        let paths =
            ToolchainPaths::from_developer_dir("/Applications/Xcode.app/Contents/Developer");

        assert_eq!(
            paths.sdk_dir(),
            Path::new(
                "/Applications/Xcode.app/Contents/Developer/Platforms/MacOSX.platform/Developer/SDKs/MacOSX.sdk"
            )
        );
        assert_eq!(
            paths.swift_libs_dir(),
            Path::new(
                "/Applications/Xcode.app/Contents/Developer/Toolchains/XcodeDefault.xctoolchain/usr/lib/swift/macosx"
            )
        );
    }
}
