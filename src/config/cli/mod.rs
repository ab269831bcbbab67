//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! flowgan train config.yaml
//! flowgan train config.yaml --epochs 10 --seed 42 --output-dir ./flows
//! flowgan validate config.yaml
//! flowgan info config.yaml --format json
//! ```

mod args;
mod types;

pub use args::{apply_overrides, parse_args, Cli, Command, InfoArgs, TrainArgs, ValidateArgs};
pub use types::OutputFormat;
