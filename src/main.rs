//! macbundle - macOS application bundle assembler.
//!
//! This binary builds a SwiftPM product and assembles it into a `.app`
//! bundle that macOS can launch directly, without Xcode's build system.

mod bundler;
mod cli;
mod error;

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
