//! Swift runtime library resolution.
//!
//! Swift programs built outside Xcode link against runtime dylibs that ship
//! with the toolchain rather than the OS. Each imported system module maps
//! to a `libswift<Module>.dylib` that must travel inside the bundle.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::bundler::error::Result;
use crate::bundler::imports::ImportSet;
use crate::bundler::utils::fs;

/// System modules with a corresponding Swift runtime dylib.
///
/// Imports outside this list are project-local modules and carry no
/// runtime library of their own.
pub const SYSTEM_FRAMEWORKS: &[&str] = &[
    "AVFoundation",
    "Accelerate",
    "AppKit",
    "CloudKit",
    "Contacts",
    "Core",
    "CoreAudio",
    "CoreData",
    "CoreFoundation",
    "CoreGraphics",
    "CoreImage",
    "CoreLocation",
    "CoreMedia",
    "CryptoTokenKit",
    "Darwin",
    "Dispatch",
    "Foundation",
    "GLKit",
    "GameplayKit",
    "IOKit",
    "Intents",
    "MapKit",
    "Metal",
    "MetalKit",
    "ModelIO",
    "ObjectiveC",
    "OpenCL",
    "QuartzCore",
    "RemoteMirror",
    "SafariServices",
    "SceneKit",
    "SpriteKit",
    "SwiftOnoneSupport",
    "Vision",
    "XCTest",
    "XPC",
    "os",
    "simd",
];

/// Modules every Swift program depends on whether imported or not.
const REQUIRED_LIBS: &[&str] = &["ObjectiveC", "os"];

/// Modules the compiler links into debug builds.
const DEBUG_LIBS: &[&str] = &["RemoteMirror", "SwiftOnoneSupport"];

/// Returns the dylib file name for a runtime module.
pub fn library_file_name(module: &str) -> String {
    format!("libswift{module}.dylib")
}

/// Runtime library modules grouped by how the dependency arises.
#[derive(Debug, Clone)]
pub struct RuntimeLibrarySet {
    /// Always linked.
    required: BTreeSet<String>,
    /// Linked by debug builds.
    debug: BTreeSet<String>,
    /// Inferred from the program's own import declarations.
    inferred: BTreeSet<String>,
}

impl RuntimeLibrarySet {
    /// Derives the library set from scanned imports.
    ///
    /// The inferred group is the intersection of the imports with
    /// [`SYSTEM_FRAMEWORKS`].
    pub fn from_imports(imports: &ImportSet) -> Self {
        let to_set = |names: &[&str]| names.iter().map(|name| (*name).to_string()).collect();

        Self {
            required: to_set(REQUIRED_LIBS),
            debug: to_set(DEBUG_LIBS),
            inferred: imports
                .iter()
                .filter(|module| SYSTEM_FRAMEWORKS.contains(&module.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Returns the modules inferred from import declarations.
    pub fn inferred(&self) -> &BTreeSet<String> {
        &self.inferred
    }

    /// Returns every module in the set, across all groups.
    pub fn union(&self) -> BTreeSet<String> {
        self.required
            .iter()
            .chain(&self.debug)
            .chain(&self.inferred)
            .cloned()
            .collect()
    }
}

/// Copies the runtime dylibs for recognized imports into the bundle.
///
/// Libraries already present in the frameworks directory are left alone,
/// so a rebuilt bundle keeps its previous copies. Returns the paths copied
/// by this run.
///
/// # Errors
///
/// Fails when a recognized import has no dylib under `swift_libs_dir`.
pub async fn copy_runtime_libraries(
    imports: &ImportSet,
    swift_libs_dir: &Path,
    frameworks_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let set = RuntimeLibrarySet::from_imports(imports);
    log::debug!("Runtime library modules: {:?}", set.union());

    let mut copied = Vec::new();
    for module in imports {
        if !set.inferred().contains(module) {
            log::debug!("No runtime library for import {}", module);
            continue;
        }

        let file_name = library_file_name(module);
        let src = swift_libs_dir.join(&file_name);
        let dst = frameworks_dir.join(&file_name);
        if fs::copy_file_if_absent(&src, &dst).await? {
            log::info!("Copied {}", file_name);
            copied.push(dst);
        } else {
            log::debug!("{} already present", file_name);
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imports_of(names: &[&str]) -> ImportSet {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn union_spans_required_debug_and_inferred_groups() {
        let set = RuntimeLibrarySet::from_imports(&imports_of(&["Foundation", "ViewerKit"]));

        assert_eq!(set.inferred(), &imports_of(&["Foundation"]));
        let union = set.union();
        for module in ["Foundation", "ObjectiveC", "os", "RemoteMirror", "SwiftOnoneSupport"] {
            assert!(union.contains(module), "missing {module}");
        }
        assert!(!union.contains("ViewerKit"));
    }

    #[tokio::test]
    async fn copies_recognized_imports_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let libs = dir.path().join("swift/macosx");
        let frameworks = dir.path().join("Frameworks");
        std::fs::create_dir_all(&libs).unwrap();
        std::fs::create_dir_all(&frameworks).unwrap();
        std::fs::write(libs.join("libswiftFoundation.dylib"), b"foundation").unwrap();
        std::fs::write(libs.join("libswiftAppKit.dylib"), b"appkit").unwrap();

        let imports = imports_of(&["AppKit", "Foundation", "ViewerKit"]);

        let copied = copy_runtime_libraries(&imports, &libs, &frameworks)
            .await
            .unwrap();
        assert_eq!(copied.len(), 2);
        assert_eq!(
            std::fs::read(frameworks.join("libswiftAppKit.dylib")).unwrap(),
            b"appkit"
        );

        let second = copy_runtime_libraries(&imports, &libs, &frameworks)
            .await
            .unwrap();
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn project_local_imports_need_no_library() {
        let dir = tempfile::tempdir().unwrap();

        let copied = copy_runtime_libraries(
            &imports_of(&["ViewerKit"]),
            &dir.path().join("libs"),
            &dir.path().join("Frameworks"),
        )
        .await
        .unwrap();

        assert!(copied.is_empty());
    }

    #[tokio::test]
    async fn missing_dylib_for_recognized_import_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("libs")).unwrap();

        let result = copy_runtime_libraries(
            &imports_of(&["Foundation"]),
            &dir.path().join("libs"),
            &dir.path().join("Frameworks"),
        )
        .await;

        assert!(result.is_err());
    }
}
