//! Configuration validation logic
//!
//! Validates training specifications for correctness before execution.

use super::error::ValidationError;
use crate::config::schema::TrainSpec;

/// Validate a training specification
///
/// Checks numeric values are in valid ranges. File existence is checked
/// separately by [`validate_paths`] so specs can be validated in isolation.
pub fn validate_config(spec: &TrainSpec) -> Result<(), ValidationError> {
    if spec.data.train.as_os_str().is_empty() {
        return Err(ValidationError::EmptyTrainPath);
    }

    // Model
    if spec.model.latent_dim == 0 {
        return Err(ValidationError::InvalidLatentDim(spec.model.latent_dim));
    }
    if !(spec.model.tau > 0.0) || !spec.model.tau.is_finite() {
        return Err(ValidationError::InvalidTemperature(spec.model.tau));
    }

    // Optimizer
    let opt = &spec.optimizer;
    if !(opt.lr > 0.0 && opt.lr <= 1.0) {
        return Err(ValidationError::InvalidLearningRate(opt.lr));
    }
    for (index, value) in [(1, opt.beta1), (2, opt.beta2)] {
        if !(0.0..1.0).contains(&value) {
            return Err(ValidationError::InvalidBeta { index, value });
        }
    }
    if !(opt.epsilon > 0.0) {
        return Err(ValidationError::InvalidEpsilon(opt.epsilon));
    }

    // Schedule
    let training = &spec.training;
    if training.epochs == 0 {
        return Err(ValidationError::InvalidEpochs(training.epochs));
    }
    if training.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(training.batch_size));
    }
    if training.n_critic == 0 {
        return Err(ValidationError::InvalidNCritic(training.n_critic));
    }
    if training.sample_interval == 0 {
        return Err(ValidationError::InvalidSampleInterval(training.sample_interval));
    }
    if training.sample_size == 0 {
        return Err(ValidationError::InvalidSampleSize(training.sample_size));
    }
    if !(training.gradient_penalty_weight >= 0.0) || !training.gradient_penalty_weight.is_finite() {
        return Err(ValidationError::InvalidPenaltyWeight(training.gradient_penalty_weight));
    }

    Ok(())
}

/// Check that the files a `TrainSpec` refers to exist
pub fn validate_paths(spec: &TrainSpec) -> Result<(), ValidationError> {
    if !spec.data.train.exists() {
        return Err(ValidationError::TrainDataNotFound(spec.data.train.display().to_string()));
    }
    Ok(())
}
