//! Command line interface for bundle assembly.
//!
//! Parses arguments, merges in the optional config file, and hands a
//! validated [`Settings`] to the pipeline. All user-facing output goes
//! through [`OutputManager`]; diagnostics go through the log.

mod args;
mod config;
mod output;

pub use args::{Args, RuntimeConfig};
pub use config::FileConfig;
pub use output::OutputManager;

use crate::bundler::pipeline::{BundledApp, Pipeline};
use crate::bundler::settings::{Settings, SettingsBuilder};
use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();

    if args.verbose && args.quiet {
        return Err(CliError::ConflictingArguments {
            arguments: vec!["--verbose".to_string(), "--quiet".to_string()],
        }
        .into());
    }

    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(&args);
    let settings = build_settings(&args)?;

    let _ = config.verbose_println(&format!(
        "Build directory: {}",
        settings.build_path().display()
    ));
    let _ = config.progress(&format!("Assembling {}.app", settings.product_name()));

    let app = Pipeline::new(settings).run().await?;
    print_summary(&app, &config);

    Ok(0)
}

/// Merges command line arguments with the optional config file.
///
/// Command line values win over config file values. Required values may
/// come from either side; whatever is still missing after the merge is
/// reported as a missing argument.
fn build_settings(args: &Args) -> Result<Settings> {
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let name = args.name.clone().or(file.name).ok_or(CliError::MissingArgument {
        argument: "name".to_string(),
    })?;
    let identifier =
        args.identifier
            .clone()
            .or(file.identifier)
            .ok_or(CliError::MissingArgument {
                argument: "identifier".to_string(),
            })?;
    let copyright =
        args.copyright
            .clone()
            .or(file.copyright)
            .ok_or(CliError::MissingArgument {
                argument: "copyright".to_string(),
            })?;
    let deployment_target = args
        .deployment_target
        .clone()
        .or(file.deployment_target)
        .ok_or(CliError::MissingArgument {
            argument: "deployment-target".to_string(),
        })?;

    let sources = if args.sources.is_empty() {
        file.sources
    } else {
        args.sources.clone()
    };
    if sources.is_empty() {
        return Err(CliError::MissingArgument {
            argument: "sources".to_string(),
        }
        .into());
    }

    let frameworks = if args.frameworks.is_empty() {
        file.frameworks
    } else {
        args.frameworks.clone()
    };

    let mut builder = SettingsBuilder::default()
        .product_name(name)
        .bundle_identifier(identifier)
        .copyright(copyright)
        .deployment_target(deployment_target)
        .sources(sources)
        .frameworks(frameworks);

    if let Some(build_path) = args.build_path.clone().or(file.build_path) {
        builder = builder.build_path(build_path);
    }

    Ok(builder.build()?)
}

fn print_summary(app: &BundledApp, config: &RuntimeConfig) {
    let _ = config.success(&format!("Created {}", app.bundle_path.display()));
    let _ = config.indent(&format!("executable: {}", app.executable_path.display()));
    let _ = config.indent(&format!("manifest:   {}", app.manifest_path.display()));
    let _ = config.indent(&format!(
        "runtime libraries: {} imports, {} copied this run",
        app.imports.len(),
        app.copied_libraries.len()
    ));

    for library in &app.copied_libraries {
        let _ = config.verbose_println(&format!("copied {}", library.display()));
    }

    if app.imports.is_empty() {
        let _ = config.warn("no import declarations found in the sources");
    }
}
