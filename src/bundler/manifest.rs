//! Info.plist generation.
//!
//! The manifest is assembled from three layers: a static baseline, the
//! caller's identity fields, and the partial plist actool emits for the
//! icon. Later layers win when a key collides.

use std::path::Path;

use crate::bail;
use crate::bundler::error::Result;
use crate::bundler::settings::Settings;

/// Keys that must be present and non-empty in the merged manifest.
const REQUIRED_KEYS: &[&str] = &["CFBundleExecutable", "CFBundleIdentifier", "CFBundleName"];

/// Static manifest keys describing the toolchain that nominally produced
/// the bundle.
///
/// The defaults reproduce a known-good Xcode 9 profile. Callers can
/// override any field before assembly.
#[derive(Debug, Clone)]
pub struct ManifestBaseline {
    /// `BuildMachineOSBuild`
    pub build_machine_os_build: String,
    /// `CFBundleDevelopmentRegion`
    pub development_region: String,
    /// `CFBundleInfoDictionaryVersion`
    pub info_dictionary_version: String,
    /// `CFBundlePackageType`
    pub package_type: String,
    /// `CFBundleShortVersionString`
    pub short_version: String,
    /// `CFBundleSignature`
    pub signature: String,
    /// `CFBundleSupportedPlatforms`
    pub supported_platforms: Vec<String>,
    /// `CFBundleVersion`
    pub bundle_version: String,
    /// `DTCompiler`
    pub compiler: String,
    /// `DTPlatformBuild`
    pub platform_build: String,
    /// `DTPlatformVersion`
    pub platform_version: String,
    /// `DTSDKBuild`
    pub sdk_build: String,
    /// `DTSDKName`
    pub sdk_name: String,
    /// `DTXcode`
    pub xcode_version: String,
    /// `DTXcodeBuild`
    pub xcode_build: String,
    /// `NSPrincipalClass`
    pub principal_class: String,
}

impl Default for ManifestBaseline {
    fn default() -> Self {
        Self {
            build_machine_os_build: "17A362a".into(),
            development_region: "en".into(),
            info_dictionary_version: "6.0".into(),
            package_type: "APPL".into(),
            short_version: "1.0".into(),
            signature: "????".into(),
            supported_platforms: vec!["MacOSX".into()],
            bundle_version: "1".into(),
            compiler: "com.apple.compilers.llvm.clang.1_0".into(),
            platform_build: "9A235".into(),
            platform_version: "GM".into(),
            sdk_build: "17A360".into(),
            sdk_name: "macosx10.13".into(),
            xcode_version: "0900".into(),
            xcode_build: "9A235".into(),
            principal_class: "NSApplication".into(),
        }
    }
}

impl ManifestBaseline {
    fn to_dictionary(&self) -> plist::Dictionary {
        let mut dict = plist::Dictionary::new();
        dict.insert(
            "BuildMachineOSBuild".into(),
            self.build_machine_os_build.clone().into(),
        );
        dict.insert(
            "CFBundleDevelopmentRegion".into(),
            self.development_region.clone().into(),
        );
        dict.insert(
            "CFBundleInfoDictionaryVersion".into(),
            self.info_dictionary_version.clone().into(),
        );
        dict.insert("CFBundlePackageType".into(), self.package_type.clone().into());
        dict.insert(
            "CFBundleShortVersionString".into(),
            self.short_version.clone().into(),
        );
        dict.insert("CFBundleSignature".into(), self.signature.clone().into());
        dict.insert(
            "CFBundleSupportedPlatforms".into(),
            plist::Value::Array(
                self.supported_platforms
                    .iter()
                    .cloned()
                    .map(plist::Value::from)
                    .collect(),
            ),
        );
        dict.insert("CFBundleVersion".into(), self.bundle_version.clone().into());
        dict.insert("DTCompiler".into(), self.compiler.clone().into());
        dict.insert("DTPlatformBuild".into(), self.platform_build.clone().into());
        dict.insert("DTPlatformVersion".into(), self.platform_version.clone().into());
        dict.insert("DTSDKBuild".into(), self.sdk_build.clone().into());
        dict.insert("DTSDKName".into(), self.sdk_name.clone().into());
        dict.insert("DTXcode".into(), self.xcode_version.clone().into());
        dict.insert("DTXcodeBuild".into(), self.xcode_build.clone().into());
        dict.insert("NSPrincipalClass".into(), self.principal_class.clone().into());
        dict
    }
}

/// Merges the baseline, the caller identity and actool's partial manifest.
///
/// # Errors
///
/// Fails when a required key ends up missing or empty after the merge.
pub fn generate_manifest(
    settings: &Settings,
    baseline: &ManifestBaseline,
    partial: &plist::Dictionary,
) -> Result<plist::Dictionary> {
    let mut dict = baseline.to_dictionary();

    dict.insert("CFBundleExecutable".into(), settings.product_name().into());
    dict.insert(
        "CFBundleIdentifier".into(),
        settings.bundle_identifier().into(),
    );
    dict.insert("CFBundleName".into(), settings.product_name().into());
    dict.insert(
        "LSMinimumSystemVersion".into(),
        settings.deployment_target().into(),
    );
    dict.insert(
        "NSHumanReadableCopyright".into(),
        settings.copyright().into(),
    );

    for (key, value) in partial {
        dict.insert(key.clone(), value.clone());
    }

    verify_required_keys(&dict)?;
    Ok(dict)
}

fn verify_required_keys(dict: &plist::Dictionary) -> Result<()> {
    for key in REQUIRED_KEYS {
        let present = dict
            .get(key)
            .and_then(plist::Value::as_string)
            .is_some_and(|value| !value.is_empty());
        if !present {
            bail!("manifest key {} is missing or empty after merge", key);
        }
    }
    Ok(())
}

/// Serializes the manifest as an XML plist.
pub fn write_manifest(manifest: plist::Dictionary, path: &Path) -> Result<()> {
    plist::Value::Dictionary(manifest).to_file_xml(path)?;
    log::debug!("Manifest written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::error::Error;
    use crate::bundler::settings::SettingsBuilder;
    use std::path::PathBuf;

    fn settings() -> Settings {
        SettingsBuilder::default()
            .product_name("Viewer")
            .bundle_identifier("com.example.viewer")
            .copyright("© 2026 Example")
            .deployment_target("10.13")
            .sources(vec![PathBuf::from("Sources")])
            .build()
            .unwrap()
    }

    #[test]
    fn defaults_reproduce_the_reference_profile() {
        let baseline = ManifestBaseline::default();

        assert_eq!(baseline.build_machine_os_build, "17A362a");
        assert_eq!(baseline.supported_platforms, vec!["MacOSX".to_string()]);
        assert_eq!(baseline.sdk_name, "macosx10.13");
        assert_eq!(baseline.xcode_version, "0900");
        assert_eq!(baseline.principal_class, "NSApplication");
    }

    #[test]
    fn caller_identity_lands_in_the_manifest() {
        let dict = generate_manifest(
            &settings(),
            &ManifestBaseline::default(),
            &plist::Dictionary::new(),
        )
        .unwrap();

        assert_eq!(
            dict.get("CFBundleExecutable").and_then(plist::Value::as_string),
            Some("Viewer")
        );
        assert_eq!(
            dict.get("CFBundleIdentifier").and_then(plist::Value::as_string),
            Some("com.example.viewer")
        );
        assert_eq!(
            dict.get("LSMinimumSystemVersion").and_then(plist::Value::as_string),
            Some("10.13")
        );
    }

    #[test]
    fn partial_manifest_wins_over_earlier_layers() {
        let mut partial = plist::Dictionary::new();
        partial.insert("CFBundleShortVersionString".into(), "2.0".into());
        partial.insert("CFBundleName".into(), "Renamed".into());

        let dict =
            generate_manifest(&settings(), &ManifestBaseline::default(), &partial).unwrap();

        assert_eq!(
            dict.get("CFBundleShortVersionString").and_then(plist::Value::as_string),
            Some("2.0")
        );
        assert_eq!(
            dict.get("CFBundleName").and_then(plist::Value::as_string),
            Some("Renamed")
        );
    }

    #[test]
    fn rejects_a_merge_that_blanks_a_required_key() {
        let mut partial = plist::Dictionary::new();
        partial.insert("CFBundleName".into(), "".into());

        let result = generate_manifest(&settings(), &ManifestBaseline::default(), &partial);

        assert!(matches!(result, Err(Error::GenericError(_))));
    }

    #[test]
    fn written_manifest_round_trips_through_the_parser() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Info.plist");
        let dict = generate_manifest(
            &settings(),
            &ManifestBaseline::default(),
            &plist::Dictionary::new(),
        )
        .unwrap();

        write_manifest(dict.clone(), &path).unwrap();

        let read_back = plist::Value::from_file(&path)
            .unwrap()
            .into_dictionary()
            .unwrap();
        assert_eq!(read_back, dict);
    }
}
