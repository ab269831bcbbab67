//! Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::config::TrainSpec;

/// flowgan: WGAN-GP trainer for synthetic network flows
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "flowgan")]
#[command(version)]
#[command(about = "Train a WGAN-GP on network-flow records and export synthetic flows")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Train from a YAML configuration
    Train(TrainArgs),

    /// Validate a configuration file without training
    Validate(ValidateArgs),

    /// Fit the codec and display the encoded layout
    Info(InfoArgs),
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct TrainArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Override number of epochs
    #[arg(short, long)]
    pub epochs: Option<usize>,

    /// Override batch size
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Override critic updates per generator update
    #[arg(long)]
    pub n_critic: Option<usize>,

    /// Override Gumbel-softmax temperature
    #[arg(long)]
    pub tau: Option<f32>,

    /// Override learning rate
    #[arg(short, long)]
    pub lr: Option<f32>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Dry run (validate config and fit the codec but don't train)
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Also load the dataset and fit the codec
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to a TrainSpec
pub fn apply_overrides(spec: &mut TrainSpec, args: &TrainArgs) {
    if let Some(output_dir) = &args.output_dir {
        spec.output.dir = output_dir.clone();
    }
    if let Some(epochs) = args.epochs {
        spec.training.epochs = epochs;
    }
    if let Some(batch_size) = args.batch_size {
        spec.training.batch_size = batch_size;
    }
    if let Some(n_critic) = args.n_critic {
        spec.training.n_critic = n_critic;
    }
    if let Some(tau) = args.tau {
        spec.model.tau = tau;
    }
    if let Some(lr) = args.lr {
        spec.optimizer.lr = lr;
    }
    if let Some(seed) = args.seed {
        spec.training.seed = Some(seed);
    }
}
