//! Import declaration scanning for Swift sources.
//!
//! Walks the configured source roots, reads every `.swift` file and records
//! which modules the program imports. The pipeline later uses the set to
//! decide which Swift runtime libraries belong in the bundle.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::bundler::error::{Error, ErrorExt, Result};

/// Modules imported by the scanned sources, sorted and deduplicated.
pub type ImportSet = BTreeSet<String>;

const SOURCE_EXTENSION: &str = "swift";

/// Matches a line that starts an import declaration, capturing the rest.
static IMPORT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*import\s+(.*)$").expect("import pattern is valid"));

/// Matches the module name at the start of the captured remainder.
static MODULE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+").expect("module name pattern is valid"));

/// Scans all `.swift` files under the given roots for import declarations.
///
/// A root may be a directory or a single file. Files are visited in
/// byte-wise path order, and every module name is recorded exactly once.
///
/// # Errors
///
/// Returns `MalformedImport` for a line that begins an import declaration
/// but carries no module name. Unreadable files and broken directory
/// entries surface as I/O errors.
pub async fn scan_imports(sources: &[PathBuf]) -> Result<ImportSet> {
    let mut imports = ImportSet::new();

    for file in collect_source_files(sources)? {
        let contents = tokio::fs::read_to_string(&file)
            .await
            .fs_context("reading source file", &file)?;
        for line in contents.lines() {
            if let Some(module) = extract_import(line)? {
                imports.insert(module.to_string());
            }
        }
    }

    log::debug!("Found {} imports: {:?}", imports.len(), imports);
    Ok(imports)
}

fn collect_source_files(sources: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in sources {
        for entry in WalkDir::new(root) {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
                files.push(path.to_path_buf());
            }
        }
    }
    // Byte-wise path order keeps the traversal locale-independent
    files.sort();
    files.dedup();
    Ok(files)
}

/// Extracts the module name from a line, if the line is an import declaration.
///
/// Lines that do not start with the `import` keyword are not declarations
/// and yield `None`. Anything after the module name, such as a trailing
/// comment or a submodule path, is ignored.
fn extract_import(line: &str) -> Result<Option<&str>> {
    let Some(captures) = IMPORT_LINE.captures(line) else {
        return Ok(None);
    };
    let rest = captures.get(1).map(|m| m.as_str()).unwrap_or_default();

    match MODULE_NAME.find(rest) {
        Some(module) => Ok(Some(module.as_str())),
        None => Err(Error::MalformedImport { line: line.into() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn extracts_module_names() {
        assert_eq!(extract_import("import Foundation").unwrap(), Some("Foundation"));
        assert_eq!(extract_import("    import Metal").unwrap(), Some("Metal"));
        assert_eq!(extract_import("import Metal // gpu").unwrap(), Some("Metal"));
        assert_eq!(
            extract_import("import Foundation.NSDate").unwrap(),
            Some("Foundation")
        );
    }

    #[test]
    fn ignores_lines_that_are_not_declarations() {
        assert_eq!(extract_import("// import Hidden").unwrap(), None);
        assert_eq!(extract_import("importFoo").unwrap(), None);
        assert_eq!(extract_import("let imports = 3").unwrap(), None);
        assert_eq!(extract_import("").unwrap(), None);
    }

    #[test]
    fn rejects_declarations_without_a_module_name() {
        assert!(matches!(
            extract_import("import "),
            Err(Error::MalformedImport { .. })
        ));
        assert!(matches!(
            extract_import("import // nothing"),
            Err(Error::MalformedImport { .. })
        ));
    }

    #[tokio::test]
    async fn scans_nested_sources_sorted_and_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("Render");
        fs::create_dir(&sub).unwrap();
        fs::write(
            dir.path().join("main.swift"),
            "import Foundation\nimport AppKit\n",
        )
        .unwrap();
        fs::write(sub.join("renderer.swift"), "import Metal\nimport Foundation\n").unwrap();
        fs::write(dir.path().join("notes.md"), "import NotSwift\n").unwrap();

        let imports = scan_imports(&[dir.path().to_path_buf()]).await.unwrap();

        assert_eq!(
            imports,
            ImportSet::from(["AppKit".into(), "Foundation".into(), "Metal".into()])
        );
    }

    #[tokio::test]
    async fn accepts_a_single_file_as_a_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.swift");
        fs::write(&file, "import os\n").unwrap();

        let imports = scan_imports(&[file]).await.unwrap();

        assert_eq!(imports, ImportSet::from(["os".into()]));
    }

    #[tokio::test]
    async fn reports_the_offending_line_for_malformed_declarations() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.swift"), "import \n").unwrap();

        let result = scan_imports(&[dir.path().to_path_buf()]).await;

        assert!(matches!(result, Err(Error::MalformedImport { line }) if line == "import "));
    }

    #[tokio::test]
    async fn scanning_twice_yields_the_same_set() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.swift"), "import AppKit\nimport simd\n").unwrap();
        let roots = [dir.path().to_path_buf()];

        let first = scan_imports(&roots).await.unwrap();
        let second = scan_imports(&roots).await.unwrap();

        assert_eq!(first, second);
    }
}
