//! Training state threaded through every step

use serde::{Deserialize, Serialize};

/// Where the trainer is in its fixed schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainerPhase {
    #[default]
    Idle,
    CriticStep,
    GeneratorStep,
    Checkpoint,
    Done,
}

/// Components of one critic update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticLoss {
    pub real: f32,
    pub fake: f32,
    pub penalty: f32,
    /// `real + fake + λ·penalty`
    pub total: f32,
}

/// Loss produced by a single update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepLoss {
    Critic(CriticLoss),
    Generator(f32),
}

/// Scalar losses recorded for one epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochLoss {
    pub epoch: usize,
    /// Total loss of the epoch's last critic update
    pub critic: f32,
    pub generator: f32,
}

/// Append-only record of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingState {
    history: Vec<EpochLoss>,
    critic_updates: usize,
    generator_updates: usize,
    checkpoints: Vec<usize>,
}

impl TrainingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a finished update
    #[must_use]
    pub fn with_update(mut self, loss: &StepLoss) -> Self {
        match loss {
            StepLoss::Critic(_) => self.critic_updates += 1,
            StepLoss::Generator(_) => self.generator_updates += 1,
        }
        self
    }

    pub fn record_epoch(&mut self, loss: EpochLoss) {
        self.history.push(loss);
    }

    pub fn record_checkpoint(&mut self, epoch: usize) {
        self.checkpoints.push(epoch);
    }

    pub fn history(&self) -> &[EpochLoss] {
        &self.history
    }

    pub fn critic_losses(&self) -> Vec<f32> {
        self.history.iter().map(|l| l.critic).collect()
    }

    pub fn generator_losses(&self) -> Vec<f32> {
        self.history.iter().map(|l| l.generator).collect()
    }

    pub fn last(&self) -> Option<&EpochLoss> {
        self.history.last()
    }

    pub fn critic_updates(&self) -> usize {
        self.critic_updates
    }

    pub fn generator_updates(&self) -> usize {
        self.generator_updates
    }

    /// Epochs at which samples were exported
    pub fn checkpoints(&self) -> &[usize] {
        &self.checkpoints
    }
}

/// Serialized at the end of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub epochs: usize,
    pub batch_size: usize,
    pub n_critic: usize,
    pub latent_dim: usize,
    pub encoded_width: usize,
    pub critic_updates: usize,
    pub generator_updates: usize,
    pub checkpoints: Vec<usize>,
    pub final_critic_loss: Option<f32>,
    pub final_generator_loss: Option<f32>,
    pub seed: Option<u64>,
}
