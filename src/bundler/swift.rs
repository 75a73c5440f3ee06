//! Swift package build invocation.

use tokio::process::Command;

use crate::bundler::error::{Error, Result};
use crate::bundler::settings::Settings;

/// Builds the product with `swift build`.
///
/// The build directory, target triple and product name all come from the
/// settings, so repeated invocations reuse the same build artifacts.
///
/// # Errors
///
/// Returns `ProcessFailed` when the compiler exits with a failure status.
/// Compiler diagnostics go to the log at error level.
pub async fn build_product(settings: &Settings) -> Result<()> {
    log::info!(
        "Building {} for {}",
        settings.product_name(),
        settings.target_triple()
    );

    let output = Command::new("swift")
        .arg("build")
        .arg("--build-path")
        .arg(settings.build_path())
        .arg("--triple")
        .arg(settings.target_triple())
        .arg("--product")
        .arg(settings.product_name())
        .output()
        .await
        .map_err(|error| Error::CommandFailed {
            command: "swift build".into(),
            error,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim_end();
        if !stderr.is_empty() {
            log::error!("swift build reported:\n{}", stderr);
        }
        return Err(Error::ProcessFailed {
            command: "swift build".into(),
            status: output.status,
        });
    }

    Ok(())
}
