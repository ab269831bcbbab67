//! flowgan CLI
//!
//! Trains a WGAN-GP on a CSV of network flows and exports synthetic flows.
//!
//! # Usage
//!
//! ```bash
//! # Train from config
//! flowgan train config.yaml
//!
//! # Train with overrides
//! flowgan train config.yaml --epochs 10 --lr 0.001 --seed 42
//!
//! # Validate config and dataset
//! flowgan validate config.yaml --detailed
//!
//! # Show the encoded layout
//! flowgan info config.yaml
//! ```

use clap::Parser;
use flowgan::cli::{run_command, Cli};
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
