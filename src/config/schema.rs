//! YAML schema definitions for declarative training configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::gan::{AdamConfig, CriticActivation, CriticConfig, GeneratorConfig, Interpolation, WganConfig};

/// Complete training specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainSpec {
    /// Data configuration
    pub data: DataConfig,

    /// Model configuration
    #[serde(default)]
    pub model: ModelSpec,

    /// Optimizer configuration, shared by the critic and the generator
    #[serde(default)]
    pub optimizer: AdamConfig,

    /// Training hyperparameters
    #[serde(default)]
    pub training: TrainingParams,

    /// Where artifacts are written
    #[serde(default)]
    pub output: OutputConfig,
}

/// Data configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV file with at least the seven flow columns
    pub train: PathBuf,
}

/// Model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSpec {
    /// Dimension of the generator's latent noise
    pub latent_dim: usize,
    /// Gumbel-softmax temperature
    pub tau: f32,
    /// Output activation of the critic
    pub critic_activation: CriticActivation,
}

impl Default for ModelSpec {
    fn default() -> Self {
        let generator = GeneratorConfig::default();
        Self { latent_dim: generator.latent_dim, tau: generator.tau, critic_activation: CriticActivation::default() }
    }
}

/// Training hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingParams {
    pub epochs: usize,
    pub batch_size: usize,
    /// Critic updates per generator update
    pub n_critic: usize,
    /// Export samples every N epochs, starting at epoch 0
    pub sample_interval: usize,
    /// Records per export
    pub sample_size: usize,
    pub gradient_penalty_weight: f32,
    pub interpolation: Interpolation,
    pub halt_on_non_finite: bool,
    /// Random seed for reproducibility
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for TrainingParams {
    fn default() -> Self {
        let run = WganConfig::default();
        Self {
            epochs: run.epochs,
            batch_size: run.batch_size,
            n_critic: run.n_critic,
            sample_interval: run.sample_interval,
            sample_size: run.sample_size,
            gradient_penalty_weight: run.gradient_penalty_weight,
            interpolation: run.interpolation,
            halt_on_non_finite: run.halt_on_non_finite,
            seed: run.seed,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for sample exports, loss history and summary
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from("flows") }
    }
}

impl TrainSpec {
    /// Trainer configuration described by this manifest
    pub fn wgan_config(&self) -> WganConfig {
        WganConfig {
            generator: GeneratorConfig { latent_dim: self.model.latent_dim, tau: self.model.tau },
            critic: CriticConfig { activation: self.model.critic_activation },
            optimizer: self.optimizer,
            epochs: self.training.epochs,
            batch_size: self.training.batch_size,
            n_critic: self.training.n_critic,
            sample_interval: self.training.sample_interval,
            sample_size: self.training.sample_size,
            gradient_penalty_weight: self.training.gradient_penalty_weight,
            interpolation: self.training.interpolation,
            halt_on_non_finite: self.training.halt_on_non_finite,
            seed: self.training.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_spec_uses_defaults() {
        let spec: TrainSpec = serde_yaml::from_str("data:\n  train: myFlow.csv\n").expect("valid yaml");
        assert_eq!(spec.data.train, PathBuf::from("myFlow.csv"));
        assert_eq!(spec.model.latent_dim, 100);
        assert_eq!(spec.training.epochs, 301);
        assert_eq!(spec.training.batch_size, 32);
        assert_eq!(spec.output.dir, PathBuf::from("flows"));
        assert_eq!(spec.wgan_config(), WganConfig::default());
    }

    #[test]
    fn test_full_spec_parses() {
        let yaml = r"
data:
  train: data/flows.csv
model:
  latent_dim: 16
  tau: 0.5
  critic_activation: identity
optimizer:
  lr: 0.001
  beta1: 0.5
  beta2: 0.9
  epsilon: 1.0e-7
training:
  epochs: 10
  batch_size: 8
  n_critic: 5
  sample_interval: 5
  sample_size: 20
  gradient_penalty_weight: 5.0
  interpolation: per_example
  halt_on_non_finite: false
  seed: 42
output:
  dir: out
";
        let spec: TrainSpec = serde_yaml::from_str(yaml).expect("valid yaml");
        let config = spec.wgan_config();
        assert_eq!(config.generator.latent_dim, 16);
        assert_eq!(config.critic.activation, CriticActivation::Identity);
        assert_eq!(config.n_critic, 5);
        assert_eq!(config.interpolation, Interpolation::PerExample);
        assert!(!config.halt_on_non_finite);
        assert_eq!(config.seed, Some(42));
        assert_eq!(spec.output.dir, PathBuf::from("out"));
    }

    #[test]
    fn test_missing_data_section_fails() {
        let result: std::result::Result<TrainSpec, _> = serde_yaml::from_str("model:\n  latent_dim: 4\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_spec_roundtrips_through_yaml() {
        let spec: TrainSpec = serde_yaml::from_str("data:\n  train: a.csv\ntraining:\n  seed: 3\n").expect("valid");
        let yaml = serde_yaml::to_string(&spec).expect("serialize");
        let back: TrainSpec = serde_yaml::from_str(&yaml).expect("reparse");
        assert_eq!(back, spec);
    }
}
