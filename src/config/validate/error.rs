//! Validation error types
//!
//! Defines all validation error variants for training specifications.

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Training data path is empty")]
    EmptyTrainPath,

    #[error("Training data path does not exist: {0}")]
    TrainDataNotFound(String),

    #[error("Invalid learning rate: {0} (must be > 0.0 and <= 1.0)")]
    InvalidLearningRate(f32),

    #[error("Invalid Adam beta{index}: {value} (must be in [0.0, 1.0))")]
    InvalidBeta { index: u8, value: f32 },

    #[error("Invalid Adam epsilon: {0} (must be > 0.0)")]
    InvalidEpsilon(f32),

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("Invalid n_critic: {0} (must be > 0)")]
    InvalidNCritic(usize),

    #[error("Invalid sample interval: {0} (must be > 0)")]
    InvalidSampleInterval(usize),

    #[error("Invalid sample size: {0} (must be > 0)")]
    InvalidSampleSize(usize),

    #[error("Invalid latent dimension: {0} (must be > 0)")]
    InvalidLatentDim(usize),

    #[error("Invalid Gumbel-softmax temperature: {0} (must be > 0.0)")]
    InvalidTemperature(f32),

    #[error("Invalid gradient penalty weight: {0} (must be >= 0.0)")]
    InvalidPenaltyWeight(f32),
}
