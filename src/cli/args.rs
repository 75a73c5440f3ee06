//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// macOS application bundle assembler
#[derive(Parser, Debug)]
#[command(
    name = "macbundle",
    version,
    about = "Assemble a macOS .app bundle from a Swift build without Xcode",
    long_about = "Builds a SwiftPM product and assembles it into a launchable .app bundle:
compiles the asset catalog, generates Info.plist, and copies the Swift
runtime libraries the sources import.

Usage:
  macbundle --name Viewer --identifier com.example.viewer \\
      --copyright \"© 2026 Example\" --deployment-target 10.13 \\
      --sources Sources
  macbundle --config bundle.toml --verbose

Every option can also come from a TOML config file; command line values win.

Exit code 0 = the bundle exists and is complete."
)]
pub struct Args {
    /// Product name, matching the SwiftPM product to build
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Bundle identifier in reverse-DNS form
    #[arg(long, value_name = "ID")]
    pub identifier: Option<String>,

    /// Copyright line recorded in Info.plist
    #[arg(long, value_name = "TEXT")]
    pub copyright: Option<String>,

    /// Minimum macOS version, MAJOR.MINOR
    #[arg(long, value_name = "VERSION")]
    pub deployment_target: Option<String>,

    /// Source roots scanned for import declarations
    #[arg(long, value_name = "PATH", num_args = 1..)]
    pub sources: Vec<PathBuf>,

    /// Framework names recorded alongside the bundle
    #[arg(long, value_name = "NAME", num_args = 1..)]
    pub frameworks: Vec<String>,

    /// Build directory shared with the Swift build
    #[arg(long, value_name = "PATH")]
    pub build_path: Option<PathBuf>,

    /// TOML config file supplying defaults for the options above
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    ///
    /// Presence of required values is checked later, after the config file
    /// is merged in. This only rejects values that can never be right.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name
            && name.is_empty()
        {
            return Err("Product name cannot be empty".to_string());
        }

        if let Some(identifier) = &self.identifier
            && identifier.is_empty()
        {
            return Err("Bundle identifier cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.verbose, args.quiet);

        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    #[allow(dead_code)] // Public API - preserved for external consumers
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
