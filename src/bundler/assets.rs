//! Asset catalog compilation through actool.
//!
//! The catalog is compiled straight into the bundle's Resources directory.
//! actool also writes two scratch files into the mode directory: a
//! dependency info file and a partial Info.plist carrying the icon keys,
//! which the manifest generator merges in later.

use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::bundler::error::{Error, ErrorExt, Result};
use crate::bundler::settings::Settings;

/// Asset catalog path, relative to the invocation directory.
pub const ASSET_CATALOG: &str = "images.xcassets";

/// Icon set name inside the catalog.
pub const APP_ICON_NAME: &str = "AppIcon";

const DEPENDENCY_INFO_FILE: &str = "image-deps.txt";
const PARTIAL_MANIFEST_FILE: &str = "icon.plist";

/// File outputs of an actool run.
#[derive(Debug, Clone)]
pub struct CompiledAssets {
    /// Raw contents of the dependency info file.
    pub dependency_info: String,
    /// Keys actool contributes to the manifest, such as the icon name.
    pub partial_manifest: plist::Dictionary,
}

fn dependency_info_path(settings: &Settings) -> PathBuf {
    settings.mode_path().join(DEPENDENCY_INFO_FILE)
}

fn partial_manifest_path(settings: &Settings) -> PathBuf {
    settings.mode_path().join(PARTIAL_MANIFEST_FILE)
}

/// Compiles the asset catalog into the given Resources directory.
///
/// actool prints a textual report to stdout; that report is discarded and
/// the two files written to the mode directory are the real contract.
///
/// # Errors
///
/// Returns `ProcessFailed` when actool exits with a failure status, and
/// I/O or plist errors when its file outputs cannot be read back.
pub async fn compile_assets(settings: &Settings, resources_dir: &Path) -> Result<CompiledAssets> {
    log::info!("Compiling {} into {}", ASSET_CATALOG, resources_dir.display());

    let deps_path = dependency_info_path(settings);
    let partial_path = partial_manifest_path(settings);

    let output = Command::new("xcrun")
        .arg("actool")
        .args(["--output-format", "human-readable-text"])
        .arg("--warnings")
        .arg("--export-dependency-info")
        .arg(&deps_path)
        .arg("--output-partial-info-plist")
        .arg(&partial_path)
        .args(["--app-icon", APP_ICON_NAME])
        .args(["--enable-on-demand-resources", "NO"])
        .args(["--target-device", "mac"])
        .arg("--minimum-deployment-target")
        .arg(settings.deployment_target())
        .args(["--platform", "macosx"])
        .args(["--product-type", "com.apple.product-type.application"])
        .arg("--compile")
        .arg(resources_dir)
        .arg(ASSET_CATALOG)
        .output()
        .await
        .map_err(|error| Error::CommandFailed {
            command: "xcrun actool".into(),
            error,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim_end();
        if !stderr.is_empty() {
            log::error!("actool reported:\n{}", stderr);
        }
        return Err(Error::ProcessFailed {
            command: "xcrun actool".into(),
            status: output.status,
        });
    }

    // The dependency info file mixes paths with control bytes, so a lossy
    // conversion is the right reading
    let bytes = tokio::fs::read(&deps_path)
        .await
        .fs_context("reading dependency info", &deps_path)?;
    let dependency_info = String::from_utf8_lossy(&bytes).into_owned();
    let partial_manifest = read_partial_manifest(&partial_path)?;

    Ok(CompiledAssets {
        dependency_info,
        partial_manifest,
    })
}

fn read_partial_manifest(path: &Path) -> Result<plist::Dictionary> {
    let value = plist::Value::from_file(path)?;
    value.into_dictionary().ok_or_else(|| {
        Error::GenericError(format!(
            "partial manifest {} is not a dictionary",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::SettingsBuilder;

    fn settings() -> Settings {
        SettingsBuilder::default()
            .product_name("Viewer")
            .bundle_identifier("com.example.viewer")
            .copyright("© 2026 Example")
            .deployment_target("10.13")
            .sources(vec![PathBuf::from("Sources")])
            .build_path("out")
            .build()
            .unwrap()
    }

    #[test]
    fn scratch_files_live_in_the_mode_directory() {
        let settings = settings();

        assert_eq!(
            dependency_info_path(&settings),
            Path::new("out/debug/image-deps.txt")
        );
        assert_eq!(
            partial_manifest_path(&settings),
            Path::new("out/debug/icon.plist")
        );
    }

    #[test]
    fn reads_a_partial_manifest_back_as_a_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.plist");
        let mut dict = plist::Dictionary::new();
        dict.insert("CFBundleIconFile".into(), "AppIcon".into());
        plist::Value::Dictionary(dict.clone())
            .to_file_xml(&path)
            .unwrap();

        assert_eq!(read_partial_manifest(&path).unwrap(), dict);
    }

    #[test]
    fn rejects_a_partial_manifest_that_is_not_a_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.plist");
        plist::Value::String("AppIcon".into())
            .to_file_xml(&path)
            .unwrap();

        assert!(matches!(
            read_partial_manifest(&path),
            Err(Error::GenericError(_))
        ));
    }
}
