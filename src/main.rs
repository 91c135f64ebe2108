//! Servir CLI
//!
//! Registry and serving entry point.
//!
//! # Usage
//!
//! ```bash
//! # Register a version produced by a training run
//! servir register house-price --run-id run-8027
//!
//! # Move it through the lifecycle
//! servir stage house-price 1 Staging
//! servir promote house-price
//!
//! # Serve a prediction from the current Production version
//! servir predict house-price MedInc=8.3 HouseAge=41 AveRooms=6.9
//! ```

use clap::Parser;
use servir::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
