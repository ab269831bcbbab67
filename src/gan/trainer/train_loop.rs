//! Epoch schedule, checkpoints and run completion

use tracing::{debug, info, warn};

use super::state::{EpochLoss, StepLoss, TrainerPhase, TrainingState, TrainingSummary};
use super::step::UpdateTarget;
use super::WganTrainer;
use crate::error::{Error, Result};
use crate::export::SampleSink;
use crate::gan::sampler;

impl WganTrainer {
    /// Whether samples are exported after `epoch`
    pub fn is_checkpoint(&self, epoch: usize) -> bool {
        epoch % self.config.sample_interval == 0
    }

    /// Run every epoch, exporting samples at checkpoints and the loss
    /// history at the end
    ///
    /// Any failed step aborts the run; nothing written before the failure
    /// should be treated as a complete export.
    pub fn train(&mut self, sink: &mut dyn SampleSink) -> Result<TrainingState> {
        info!(
            epochs = self.config.epochs,
            batch_size = self.config.batch_size,
            n_critic = self.config.n_critic,
            rows = self.dataset_len(),
            width = self.codec.width(),
            "starting WGAN-GP training"
        );

        let mut state = TrainingState::new();
        for epoch in 0..self.config.epochs {
            state = self.run_epoch(epoch, state)?;

            if self.is_checkpoint(epoch) {
                self.phase = TrainerPhase::Checkpoint;
                let written = sampler::export(
                    &self.generator,
                    &self.codec,
                    self.config.sample_size,
                    epoch,
                    sink,
                    &mut self.rng,
                )?;
                state.record_checkpoint(epoch);
                if let Some(loss) = state.last() {
                    info!(epoch, d_loss = loss.critic, g_loss = loss.generator, samples = written, "checkpoint");
                }
            }
        }

        self.phase = TrainerPhase::Done;
        sink.write_loss_history(self.config.epochs, self.config.batch_size, &state)?;
        sink.write_summary(&self.summary(&state))?;
        info!(
            critic_updates = state.critic_updates(),
            generator_updates = state.generator_updates(),
            "training finished"
        );
        Ok(state)
    }

    /// `n_critic` critic updates followed by one generator update
    fn run_epoch(&mut self, epoch: usize, mut state: TrainingState) -> Result<TrainingState> {
        let mut critic_loss = 0.0;
        for _ in 0..self.config.n_critic {
            let (next, loss) = self.step(UpdateTarget::Critic, state)?;
            state = next;
            if let StepLoss::Critic(c) = loss {
                critic_loss = c.total;
            }
            self.check_finite(epoch, "critic", critic_loss)?;
        }

        let (next, loss) = self.step(UpdateTarget::Generator, state)?;
        state = next;
        let generator_loss = match loss {
            StepLoss::Generator(g) => g,
            StepLoss::Critic(c) => c.total,
        };
        self.check_finite(epoch, "generator", generator_loss)?;

        debug!(epoch, d_loss = critic_loss, g_loss = generator_loss, "epoch complete");
        state.record_epoch(EpochLoss { epoch, critic: critic_loss, generator: generator_loss });
        Ok(state)
    }

    fn check_finite(&self, epoch: usize, phase: &'static str, value: f32) -> Result<()> {
        if value.is_finite() {
            return Ok(());
        }
        if self.config.halt_on_non_finite {
            return Err(Error::NumericInstability { epoch, phase, value });
        }
        warn!(epoch, phase, value, "non-finite loss");
        Ok(())
    }

    fn summary(&self, state: &TrainingState) -> TrainingSummary {
        TrainingSummary {
            epochs: self.config.epochs,
            batch_size: self.config.batch_size,
            n_critic: self.config.n_critic,
            latent_dim: self.config.generator.latent_dim,
            encoded_width: self.codec.width(),
            critic_updates: state.critic_updates(),
            generator_updates: state.generator_updates(),
            checkpoints: state.checkpoints().to_vec(),
            final_critic_loss: state.last().map(|l| l.critic),
            final_generator_loss: state.last().map(|l| l.generator),
            seed: self.config.seed,
        }
    }
}
