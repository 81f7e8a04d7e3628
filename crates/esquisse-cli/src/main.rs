//! Esquisse CLI - extract, validate, and regenerate UML class models

mod cli;
mod colorizer;

use clap::Parser;
use esquisse::core::logging::init_logging;

fn main() {
    // Parse CLI args first so logging flags are available; run() will
    // reinitialize with the flag/environment combination it resolves.
    let cli_args = cli::Cli::parse();

    if let Err(e) = init_logging(None, None) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let app = cli::EsquisseApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
