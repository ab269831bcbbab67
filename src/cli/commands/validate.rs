//! Validate command implementation

use super::load_dataset;
use crate::cli::LogLevel;
use crate::config::{load_config, validate_paths, TrainSpec, ValidateArgs};
use crate::error::{Error, Result};

/// Format the training schedule as a string
pub fn format_training_info(spec: &TrainSpec) -> String {
    let t = &spec.training;
    let mut lines = vec![
        format!("  Epochs: {}", t.epochs),
        format!("  Batch size: {}", t.batch_size),
        format!("  Critic updates per epoch: {}", t.n_critic),
        format!("  Sample every {} epochs ({} records)", t.sample_interval, t.sample_size),
        format!("  Gradient penalty weight: {}", t.gradient_penalty_weight),
    ];
    if let Some(seed) = t.seed {
        lines.push(format!("  Seed: {seed}"));
    }
    lines.join("\n")
}

/// Format model and optimizer settings as a string
pub fn format_model_info(spec: &TrainSpec) -> String {
    format!(
        "  Latent dim: {}\n  Temperature: {}\n  Critic activation: {:?}\n  Adam: lr={} beta1={} beta2={}",
        spec.model.latent_dim,
        spec.model.tau,
        spec.model.critic_activation,
        spec.optimizer.lr,
        spec.optimizer.beta1,
        spec.optimizer.beta2
    )
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<()> {
    let spec = load_config(&args.config)?;
    validate_paths(&spec).map_err(|e| Error::Configuration(e.to_string()))?;

    let quiet = level == LogLevel::Quiet;
    if !quiet {
        println!("✓ Configuration is valid: {}", args.config.display());
        println!("  Training data: {}", spec.data.train.display());
        println!("{}", format_model_info(&spec));
        println!("{}", format_training_info(&spec));
    }

    if args.detailed {
        let (table, codec) = load_dataset(&spec)?;
        codec.encode_table(&table)?;
        if !quiet {
            println!("✓ Dataset encodes: {} rows, vector width {}", table.len(), codec.width());
        }
    }
    Ok(())
}
