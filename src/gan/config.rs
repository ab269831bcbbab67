//! Configuration types for the flow WGAN

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for the Generator network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Dimension of the latent space
    pub latent_dim: usize,
    /// Gumbel-softmax temperature for categorical heads
    pub tau: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { latent_dim: 100, tau: 2.0 / 3.0 }
    }
}

/// Output activation of the critic's dense layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticActivation {
    /// Bounded score in (-1, 1)
    #[default]
    Tanh,
    /// Unbounded linear score
    Identity,
}

impl CriticActivation {
    pub fn apply(self, a: f32) -> f32 {
        match self {
            CriticActivation::Tanh => a.tanh(),
            CriticActivation::Identity => a,
        }
    }

    /// φ'(a)
    pub fn derivative(self, a: f32) -> f32 {
        match self {
            CriticActivation::Tanh => {
                let t = a.tanh();
                1.0 - t * t
            }
            CriticActivation::Identity => 1.0,
        }
    }

    /// φ''(a)
    pub fn second_derivative(self, a: f32) -> f32 {
        match self {
            CriticActivation::Tanh => {
                let t = a.tanh();
                -2.0 * t * (1.0 - t * t)
            }
            CriticActivation::Identity => 0.0,
        }
    }
}

/// Configuration for the Critic network
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticConfig {
    pub activation: CriticActivation,
}

/// Adam hyperparameters, one instance per network
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdamConfig {
    pub lr: f32,
    pub beta1: f32,
    pub beta2: f32,
    pub epsilon: f32,
}

impl Default for AdamConfig {
    fn default() -> Self {
        Self { lr: 1e-4, beta1: 0.5, beta2: 0.9, epsilon: 1e-7 }
    }
}

/// How gradient-penalty interpolation coefficients are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// One coefficient per vector element
    #[default]
    PerElement,
    /// One coefficient per example, broadcast across the width
    PerExample,
}

/// Configuration for a complete training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WganConfig {
    pub generator: GeneratorConfig,
    pub critic: CriticConfig,
    pub optimizer: AdamConfig,
    /// Number of epochs; each is `n_critic` critic updates then one generator update
    pub epochs: usize,
    pub batch_size: usize,
    pub n_critic: usize,
    /// Checkpoint when `epoch % sample_interval == 0`
    pub sample_interval: usize,
    /// Records exported per checkpoint
    pub sample_size: usize,
    /// λ in `real + fake + λ·penalty`
    pub gradient_penalty_weight: f32,
    pub interpolation: Interpolation,
    /// Abort with an error when a loss turns NaN or infinite
    pub halt_on_non_finite: bool,
    pub seed: Option<u64>,
}

impl Default for WganConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            critic: CriticConfig::default(),
            optimizer: AdamConfig::default(),
            epochs: 301,
            batch_size: 32,
            n_critic: 1,
            sample_interval: 100,
            sample_size: 100,
            gradient_penalty_weight: 10.0,
            interpolation: Interpolation::default(),
            halt_on_non_finite: true,
            seed: None,
        }
    }
}

impl WganConfig {
    /// Reject hyperparameters no run can train with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("latent_dim", self.generator.latent_dim),
            ("epochs", self.epochs),
            ("batch_size", self.batch_size),
            ("n_critic", self.n_critic),
            ("sample_interval", self.sample_interval),
            ("sample_size", self.sample_size),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v == 0) {
            return Err(Error::Configuration(format!("{name} must be positive")));
        }
        let tau = self.generator.tau;
        if !tau.is_finite() || tau <= 0.0 {
            return Err(Error::Configuration(format!("tau must be positive and finite, got {tau}")));
        }
        let lambda = self.gradient_penalty_weight;
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(Error::Configuration(format!("gradient_penalty_weight must be >= 0, got {lambda}")));
        }
        let lr = self.optimizer.lr;
        if !lr.is_finite() || lr <= 0.0 {
            return Err(Error::Configuration(format!("learning rate must be positive, got {lr}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_defaults_match_reference_run() {
        let config = WganConfig::default();
        assert_eq!(config.generator.latent_dim, 100);
        assert_abs_diff_eq!(config.generator.tau, 0.6667, epsilon = 1e-4);
        assert_eq!(config.optimizer.beta1, 0.5);
        assert_eq!(config.epochs, 301);
        assert_eq!(config.gradient_penalty_weight, 10.0);
        assert_eq!(config.interpolation, Interpolation::PerElement);
    }

    #[test]
    fn test_tanh_derivatives_match_finite_difference() {
        let act = CriticActivation::Tanh;
        let h = 1e-3;
        for a in [-1.5f32, -0.2, 0.0, 0.7] {
            let d1 = (act.apply(a + h) - act.apply(a - h)) / (2.0 * h);
            let d2 = (act.derivative(a + h) - act.derivative(a - h)) / (2.0 * h);
            assert_abs_diff_eq!(act.derivative(a), d1, epsilon = 1e-3);
            assert_abs_diff_eq!(act.second_derivative(a), d2, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(WganConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_hyperparameters_rejected() {
        let base = WganConfig::default();
        let invalid = [
            WganConfig { generator: GeneratorConfig { tau: 0.0, ..base.generator.clone() }, ..base.clone() },
            WganConfig { generator: GeneratorConfig { tau: f32::NAN, ..base.generator.clone() }, ..base.clone() },
            WganConfig { generator: GeneratorConfig { latent_dim: 0, ..base.generator.clone() }, ..base.clone() },
            WganConfig { batch_size: 0, ..base.clone() },
            WganConfig { n_critic: 0, ..base.clone() },
            WganConfig { sample_interval: 0, ..base.clone() },
            WganConfig { epochs: 0, ..base.clone() },
            WganConfig { gradient_penalty_weight: -1.0, ..base.clone() },
        ];
        for config in invalid {
            let err = config.validate().unwrap_err();
            assert!(matches!(err, Error::Configuration(_)), "{config:?}");
        }
        let no_penalty = WganConfig { gradient_penalty_weight: 0.0, ..base };
        assert!(no_penalty.validate().is_ok());
    }

    #[test]
    fn test_activation_deserializes_snake_case() {
        let config: CriticConfig = serde_yaml::from_str("activation: identity").expect("valid yaml");
        assert_eq!(config.activation, CriticActivation::Identity);
    }
}
