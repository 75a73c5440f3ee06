//! Optional TOML configuration file.
//!
//! Anything the command line accepts can also come from a config file.
//! Merging happens in the CLI entry point; command line values win.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

/// Options read from a TOML config file.
///
/// Keys are kebab-case, mirroring the long option names:
///
/// ```toml
/// name = "Viewer"
/// identifier = "com.example.viewer"
/// copyright = "© 2026 Example"
/// deployment-target = "10.13"
/// sources = ["Sources"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FileConfig {
    /// Same as `--name`
    pub name: Option<String>,

    /// Same as `--identifier`
    pub identifier: Option<String>,

    /// Same as `--copyright`
    pub copyright: Option<String>,

    /// Same as `--deployment-target`
    pub deployment_target: Option<String>,

    /// Same as `--sources`
    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// Same as `--frameworks`
    #[serde(default)]
    pub frameworks: Vec<String>,

    /// Same as `--build-path`
    pub build_path: Option<PathBuf>,
}

impl FileConfig {
    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_complete_config() {
        let config: FileConfig = toml::from_str(
            r#"
            name = "Viewer"
            identifier = "com.example.viewer"
            copyright = "© 2026 Example"
            deployment-target = "10.13"
            sources = ["Sources", "Vendor/Sources"]
            frameworks = ["SDL2"]
            build-path = "out"
            "#,
        )
        .unwrap();

        assert_eq!(config.name.as_deref(), Some("Viewer"));
        assert_eq!(config.deployment_target.as_deref(), Some("10.13"));
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.build_path.as_deref(), Some(Path::new("out")));
    }

    #[test]
    fn every_key_is_optional() {
        let config: FileConfig = toml::from_str("name = \"Viewer\"").unwrap();

        assert_eq!(config.name.as_deref(), Some("Viewer"));
        assert!(config.identifier.is_none());
        assert!(config.sources.is_empty());
        assert!(config.frameworks.is_empty());
    }
}
