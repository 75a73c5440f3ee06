//! Bundle assembly pipeline.
//!
//! Assembly is a fixed sequence of steps, each of which must finish before
//! the next begins. The sequence is encoded as a state enum with a single
//! successor per state, so the orchestrator cannot reorder or skip work,
//! and every failure is reported with the step it happened in.

use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::bundler::assets::{self, CompiledAssets};
use crate::bundler::error::{Context, Error, Result};
use crate::bundler::imports::{self, ImportSet};
use crate::bundler::layout::BundleLayout;
use crate::bundler::libraries;
use crate::bundler::manifest::{self, ManifestBaseline};
use crate::bundler::settings::Settings;
use crate::bundler::swift;
use crate::bundler::toolchain::{self, ToolchainPaths};

/// Assembly progress, one state per completed step.
///
/// States form a straight line from [`ValidatingInput`] to [`Done`];
/// [`successor`] is the only way to move.
///
/// [`ValidatingInput`]: PipelineState::ValidatingInput
/// [`Done`]: PipelineState::Done
/// [`successor`]: PipelineState::successor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Checking the configuration and locating the toolchain.
    ValidatingInput,
    /// Toolchain paths are known.
    ToolchainResolved,
    /// The product compiled.
    Built,
    /// The bundle directory skeleton exists.
    LayoutCreated,
    /// The executable is in place.
    ExecutableCopied,
    /// The asset catalog is compiled into Resources.
    AssetsCompiled,
    /// `Info.plist` is written.
    ManifestWritten,
    /// Runtime libraries are in the Frameworks directory.
    LibrariesResolved,
    /// The bundle is complete.
    Done,
}

impl PipelineState {
    /// Returns the state that follows this one.
    ///
    /// [`Done`] is terminal and is its own successor.
    ///
    /// [`Done`]: PipelineState::Done
    pub fn successor(self) -> Self {
        match self {
            Self::ValidatingInput => Self::ToolchainResolved,
            Self::ToolchainResolved => Self::Built,
            Self::Built => Self::LayoutCreated,
            Self::LayoutCreated => Self::ExecutableCopied,
            Self::ExecutableCopied => Self::AssetsCompiled,
            Self::AssetsCompiled => Self::ManifestWritten,
            Self::ManifestWritten => Self::LibrariesResolved,
            Self::LibrariesResolved => Self::Done,
            Self::Done => Self::Done,
        }
    }

    /// Describes the work performed when advancing out of this state.
    fn action(self) -> &'static str {
        match self {
            Self::ValidatingInput => "validating configuration and locating the toolchain",
            Self::ToolchainResolved => "building the product",
            Self::Built => "creating the bundle layout",
            Self::LayoutCreated => "copying the executable",
            Self::ExecutableCopied => "compiling the asset catalog",
            Self::AssetsCompiled => "writing the manifest",
            Self::ManifestWritten => "resolving runtime libraries",
            Self::LibrariesResolved => "finishing the bundle",
            Self::Done => "idle",
        }
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ValidatingInput => "validating input",
            Self::ToolchainResolved => "toolchain resolved",
            Self::Built => "built",
            Self::LayoutCreated => "layout created",
            Self::ExecutableCopied => "executable copied",
            Self::AssetsCompiled => "assets compiled",
            Self::ManifestWritten => "manifest written",
            Self::LibrariesResolved => "libraries resolved",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Values produced by earlier steps and consumed by later ones.
#[derive(Default)]
struct StepOutputs {
    toolchain: Option<ToolchainPaths>,
    layout: Option<BundleLayout>,
    imports: Option<ImportSet>,
    assets: Option<CompiledAssets>,
    manifest_path: Option<PathBuf>,
    copied_libraries: Vec<PathBuf>,
}

impl StepOutputs {
    fn toolchain(&self) -> Result<&ToolchainPaths> {
        self.toolchain
            .as_ref()
            .context("toolchain paths are not resolved yet")
    }

    fn layout(&self) -> Result<&BundleLayout> {
        self.layout
            .as_ref()
            .context("bundle layout is not created yet")
    }

    fn assets(&self) -> Result<&CompiledAssets> {
        self.assets.as_ref().context("assets are not compiled yet")
    }
}

/// A fully assembled application bundle.
#[derive(Debug, Clone)]
pub struct BundledApp {
    /// The `<Name>.app` directory.
    pub bundle_path: PathBuf,
    /// The executable inside `Contents/MacOS`.
    pub executable_path: PathBuf,
    /// The written `Info.plist`.
    pub manifest_path: PathBuf,
    /// Runtime libraries copied by this run. Libraries kept from a
    /// previous run are not listed.
    pub copied_libraries: Vec<PathBuf>,
    /// Modules imported by the scanned sources.
    pub imports: ImportSet,
}

/// Drives one bundle assembly from validation through completion.
pub struct Pipeline {
    settings: Settings,
    baseline: ManifestBaseline,
}

impl Pipeline {
    /// Creates a pipeline with the default manifest baseline.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            baseline: ManifestBaseline::default(),
        }
    }

    /// Creates a pipeline with a caller-supplied manifest baseline.
    #[allow(dead_code)] // Public API - preserved for external consumers
    pub fn with_baseline(settings: Settings, baseline: ManifestBaseline) -> Self {
        Self { settings, baseline }
    }

    /// Runs every step in order and returns the finished bundle.
    ///
    /// # Errors
    ///
    /// The first failing step aborts the run. The error names the step
    /// through [`Context`], wrapping the underlying cause.
    pub async fn run(&self) -> Result<BundledApp> {
        let mut outputs = StepOutputs::default();
        let mut state = PipelineState::ValidatingInput;

        while state != PipelineState::Done {
            let next = state.successor();
            log::debug!("Pipeline: {} -> {}", state, next);
            self.advance(state, &mut outputs)
                .await
                .with_context(|| format!("failed while {}", state.action()))?;
            state = next;
        }

        let layout = outputs.layout()?.clone();
        Ok(BundledApp {
            bundle_path: layout.bundle_dir().to_path_buf(),
            executable_path: layout.executable_dst().to_path_buf(),
            manifest_path: outputs
                .manifest_path
                .take()
                .context("pipeline finished without recording the manifest path")?,
            copied_libraries: std::mem::take(&mut outputs.copied_libraries),
            imports: outputs
                .imports
                .take()
                .context("pipeline finished without recording the import set")?,
        })
    }

    /// Performs the work that moves `state` to its successor.
    async fn advance(&self, state: PipelineState, outputs: &mut StepOutputs) -> Result<()> {
        match state {
            PipelineState::ValidatingInput => {
                self.settings.validate()?;
                if !self.settings.frameworks().is_empty() {
                    log::debug!("Frameworks requested: {:?}", self.settings.frameworks());
                }
                outputs.toolchain = Some(toolchain::locate().await?);
            }
            PipelineState::ToolchainResolved => {
                swift::build_product(&self.settings).await?;
            }
            PipelineState::Built => {
                let layout = BundleLayout::new(&self.settings);
                layout.create_directories().await?;
                outputs.layout = Some(layout);
            }
            PipelineState::LayoutCreated => {
                outputs.layout()?.copy_executable().await?;
            }
            PipelineState::ExecutableCopied => {
                let assets =
                    assets::compile_assets(&self.settings, outputs.layout()?.resources_dir())
                        .await?;
                log::debug!("Asset dependency info: {} bytes", assets.dependency_info.len());
                outputs.assets = Some(assets);
            }
            PipelineState::AssetsCompiled => {
                let path = outputs.layout()?.manifest_path();
                let document = manifest::generate_manifest(
                    &self.settings,
                    &self.baseline,
                    &outputs.assets()?.partial_manifest,
                )?;
                manifest::write_manifest(document, &path)?;
                log::info!("Wrote {}", path.display());
                outputs.manifest_path = Some(path);
            }
            PipelineState::ManifestWritten => {
                let imports = imports::scan_imports(self.settings.sources()).await?;
                let swift_libs_dir = outputs.toolchain()?.swift_libs_dir().to_path_buf();
                let frameworks_dir = outputs.layout()?.frameworks_dir().to_path_buf();
                outputs.copied_libraries =
                    libraries::copy_runtime_libraries(&imports, &swift_libs_dir, &frameworks_dir)
                        .await?;
                outputs.imports = Some(imports);
            }
            PipelineState::LibrariesResolved => {
                touch_bundle(outputs.layout()?.bundle_dir()).await?;
            }
            PipelineState::Done => {}
        }
        Ok(())
    }
}

/// Updates the bundle's modification time so Finder notices the rebuild.
///
/// `-c` keeps touch from creating anything if the bundle vanished.
async fn touch_bundle(bundle_dir: &Path) -> Result<()> {
    let output = Command::new("touch")
        .arg("-c")
        .arg(bundle_dir)
        .output()
        .await
        .map_err(|error| Error::CommandFailed {
            command: "touch -c".into(),
            error,
        })?;

    if !output.status.success() {
        return Err(Error::ProcessFailed {
            command: "touch -c".into(),
            status: output.status,
        });
    }

    Ok(())
}
