//! WGAN-GP trainer
//!
//! Drives the critic and generator through a fixed schedule:
//!
//! ```text
//! Idle ─► CriticStep ×n_critic ─► GeneratorStep ─┬─► Checkpoint ─┐
//!              ▲                                 │               │
//!              └──────────── next epoch ◄────────┴───────────────┘
//!                                       after the last epoch ─► Done
//! ```
//!
//! Each network has its own Adam instance. An update only ever steps the
//! parameters of the side being trained, so the other side stays frozen.

mod state;
mod step;
mod train_loop;

pub use state::{CriticLoss, EpochLoss, StepLoss, TrainerPhase, TrainingState, TrainingSummary};
pub use step::UpdateTarget;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::WganConfig;
use super::critic::Critic;
use super::generator::Generator;
use crate::codec::FlowCodec;
use crate::error::{Error, Result};
use crate::optim::Adam;

/// Owns both networks, their optimizers and the encoded training set
pub struct WganTrainer {
    config: WganConfig,
    codec: FlowCodec,
    data: Array2<f32>,
    generator: Generator,
    critic: Critic,
    generator_opt: Adam,
    critic_opt: Adam,
    phase: TrainerPhase,
    rng: StdRng,
}

impl WganTrainer {
    /// Build both networks from the codec's layout
    ///
    /// `data` is the encoded training set, one row per flow.
    pub fn new(config: WganConfig, codec: FlowCodec, data: Array2<f32>) -> Result<Self> {
        let (generator, critic) = match config.seed {
            Some(seed) => (
                Generator::with_seed(config.generator.clone(), codec.layout(), seed)?,
                Critic::with_seed(config.critic.clone(), codec.width(), seed.wrapping_add(1))?,
            ),
            None => (
                Generator::new(config.generator.clone(), codec.layout())?,
                Critic::new(config.critic.clone(), codec.width())?,
            ),
        };
        Self::from_parts(config, codec, data, generator, critic)
    }

    /// Assemble a trainer from prebuilt networks
    ///
    /// Fails with a configuration error if the hyperparameters are unusable
    /// or either network disagrees with the codec's widths, so neither
    /// reaches the training loop.
    pub fn from_parts(
        config: WganConfig,
        codec: FlowCodec,
        data: Array2<f32>,
        generator: Generator,
        critic: Critic,
    ) -> Result<Self> {
        config.validate()?;
        if generator.layout() != codec.layout() {
            return Err(Error::Configuration(format!(
                "generator emits {} columns in its layout, codec expects {}",
                generator.output_width(),
                codec.width()
            )));
        }
        if critic.input_width() != codec.width() {
            return Err(Error::Configuration(format!(
                "critic reads {} columns, codec encodes {}",
                critic.input_width(),
                codec.width()
            )));
        }
        if generator.config.latent_dim != config.generator.latent_dim {
            return Err(Error::Configuration(format!(
                "generator latent_dim {} does not match configured {}",
                generator.config.latent_dim, config.generator.latent_dim
            )));
        }
        if data.ncols() != codec.width() {
            return Err(Error::CodecMismatch { expected: codec.width(), actual: data.ncols() });
        }
        if data.nrows() == 0 {
            return Err(Error::Schema("training set has no rows".into()));
        }

        let opt = config.optimizer;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(2)),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            generator_opt: Adam::new(opt.lr, opt.beta1, opt.beta2, opt.epsilon),
            critic_opt: Adam::new(opt.lr, opt.beta1, opt.beta2, opt.epsilon),
            config,
            codec,
            data,
            generator,
            critic,
            phase: TrainerPhase::Idle,
            rng,
        })
    }

    pub fn config(&self) -> &WganConfig {
        &self.config
    }

    pub fn codec(&self) -> &FlowCodec {
        &self.codec
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn critic(&self) -> &Critic {
        &self.critic
    }

    pub fn phase(&self) -> TrainerPhase {
        self.phase
    }

    /// Number of encoded training rows
    pub fn dataset_len(&self) -> usize {
        self.data.nrows()
    }
}
