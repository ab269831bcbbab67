//! Declarative training configuration
//!
//! A YAML manifest is parsed into a [`TrainSpec`], validated, optionally
//! overridden from the command line, and turned into a
//! [`WganConfig`](crate::gan::WganConfig).

mod cli;
mod loader;
mod schema;
mod validate;

pub use cli::{apply_overrides, parse_args, Cli, Command, InfoArgs, OutputFormat, TrainArgs, ValidateArgs};
pub use loader::load_config;
pub use schema::{DataConfig, ModelSpec, OutputConfig, TrainSpec, TrainingParams};
pub use validate::{validate_config, validate_paths, ValidationError};
