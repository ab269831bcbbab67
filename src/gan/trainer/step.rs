//! Single critic and generator updates

use ndarray::{arr1, Array1};
use rand::Rng;

use super::state::{CriticLoss, StepLoss, TrainerPhase, TrainingState};
use super::WganTrainer;
use crate::autograd::backward;
use crate::error::Result;
use crate::gan::latent::LatentCode;
use crate::gan::loss::{gradient_penalty, interpolate, sample_alpha, wasserstein_loss, FAKE_LABEL, REAL_LABEL};
use crate::optim::Optimizer;

/// Network trained by an update; the other one is frozen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateTarget {
    Critic,
    Generator,
}

impl WganTrainer {
    /// Run one update and thread the training state through it
    pub fn step(&mut self, target: UpdateTarget, state: TrainingState) -> Result<(TrainingState, StepLoss)> {
        self.generator.zero_grad();
        self.critic.zero_grad();

        let loss = match target {
            UpdateTarget::Critic => {
                self.phase = TrainerPhase::CriticStep;
                StepLoss::Critic(self.critic_update())
            }
            UpdateTarget::Generator => {
                self.phase = TrainerPhase::GeneratorStep;
                StepLoss::Generator(self.generator_update())
            }
        };
        Ok((state.with_update(&loss), loss))
    }

    /// Random rows of the training set, drawn with replacement
    fn real_batch(&mut self) -> Vec<Array1<f32>> {
        let n = self.data.nrows();
        (0..self.config.batch_size)
            .map(|_| self.data.row(self.rng.random_range(0..n)).to_owned())
            .collect()
    }

    fn fake_batch(&mut self) -> Vec<Array1<f32>> {
        let latent_dim = self.config.generator.latent_dim;
        (0..self.config.batch_size)
            .map(|_| {
                let z = LatentCode::sample(&mut self.rng, latent_dim);
                self.generator.generate(&z, &mut self.rng)
            })
            .collect()
    }

    /// Backprop `-label * mean(score)` into the critic, returning the loss
    fn accumulate_critic_loss(&self, label: f32, batch: &[Array1<f32>]) -> f32 {
        let seed = -label / batch.len() as f32;
        let scores: Vec<f32> = batch
            .iter()
            .map(|x| {
                let mut score = self.critic.score_tensor(x);
                let value = score.data()[0];
                backward(&mut score, Some(arr1(&[seed])));
                value
            })
            .collect();
        wasserstein_loss(label, &scores)
    }

    fn critic_update(&mut self) -> CriticLoss {
        let real = self.real_batch();
        let fake = self.fake_batch();

        let real_loss = self.accumulate_critic_loss(REAL_LABEL, &real);
        let fake_loss = self.accumulate_critic_loss(FAKE_LABEL, &fake);

        let width = self.codec.width();
        let mode = self.config.interpolation;
        let points: Vec<Array1<f32>> = real
            .iter()
            .zip(&fake)
            .map(|(r, f)| {
                let alpha = sample_alpha(mode, width, &mut self.rng);
                interpolate(r.view(), f.view(), alpha.view())
            })
            .collect();

        let lambda = self.config.gradient_penalty_weight;
        let penalty = gradient_penalty(&self.critic, &points);
        self.critic.weight().accumulate_grad(penalty.grad_weight * lambda);
        self.critic.bias().accumulate_grad(arr1(&[penalty.grad_bias * lambda]));

        self.critic_opt.step_refs(&mut self.critic.parameters_mut());

        CriticLoss {
            real: real_loss,
            fake: fake_loss,
            penalty: penalty.value,
            total: real_loss + fake_loss + lambda * penalty.value,
        }
    }

    /// Push generated samples towards the real label through a frozen critic
    ///
    /// The critic's input gradient is evaluated directly and fed to the
    /// generator graph as the output seed, so no critic gradient is touched.
    fn generator_update(&mut self) -> f32 {
        let batch = self.config.batch_size;
        let latent_dim = self.config.generator.latent_dim;
        let seed_scale = -REAL_LABEL / batch as f32;

        let mut scores = Vec::with_capacity(batch);
        for _ in 0..batch {
            let z = LatentCode::sample(&mut self.rng, latent_dim);
            let mut out = self.generator.forward(&z, &mut self.rng);
            scores.push(self.critic.score(out.data().view()));
            let seed = self.critic.input_gradient(out.data().view()) * seed_scale;
            backward(&mut out, Some(seed));
        }

        self.generator_opt.step_refs(&mut self.generator.parameters_mut());
        wasserstein_loss(REAL_LABEL, &scores)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{small_config, trainer};
    use super::*;
    use crate::gan::config::{CriticActivation, WganConfig};

    #[test]
    fn test_critic_step_leaves_generator_untouched() {
        let mut trainer = trainer(small_config());
        let before: Vec<Array1<f32>> = trainer.generator().parameters().map(|p| p.data().clone()).collect();
        let critic_before = trainer.critic().weight().data().clone();

        let (state, loss) = trainer.step(UpdateTarget::Critic, TrainingState::new()).expect("step");
        assert!(matches!(loss, StepLoss::Critic(_)));
        assert_eq!(state.critic_updates(), 1);
        assert_eq!(trainer.phase(), TrainerPhase::CriticStep);

        let after: Vec<Array1<f32>> = trainer.generator().parameters().map(|p| p.data().clone()).collect();
        assert_eq!(before, after);
        assert_ne!(&critic_before, trainer.critic().weight().data());
    }

    #[test]
    fn test_generator_step_leaves_critic_untouched() {
        let mut trainer = trainer(small_config());
        let critic_before = trainer.critic().weight().data().clone();
        let bias_before = trainer.critic().bias().data().clone();
        let gen_before: Vec<Array1<f32>> = trainer.generator().parameters().map(|p| p.data().clone()).collect();

        let (state, loss) = trainer.step(UpdateTarget::Generator, TrainingState::new()).expect("step");
        assert!(matches!(loss, StepLoss::Generator(_)));
        assert_eq!(state.generator_updates(), 1);

        assert_eq!(&critic_before, trainer.critic().weight().data());
        assert_eq!(&bias_before, trainer.critic().bias().data());
        let gen_after: Vec<Array1<f32>> = trainer.generator().parameters().map(|p| p.data().clone()).collect();
        assert_ne!(gen_before, gen_after);
    }

    #[test]
    fn test_critic_loss_components_add_up() {
        let mut trainer = trainer(small_config());
        let (_, loss) = trainer.step(UpdateTarget::Critic, TrainingState::new()).expect("step");
        let StepLoss::Critic(loss) = loss else {
            panic!("expected a critic loss");
        };
        let lambda = trainer.config().gradient_penalty_weight;
        assert!((loss.total - (loss.real + loss.fake + lambda * loss.penalty)).abs() < 1e-5);
        assert!(loss.penalty >= 0.0);
        // tanh scores are bounded
        assert!(loss.real.abs() <= 1.0 && loss.fake.abs() <= 1.0);
    }

    #[test]
    fn test_identity_critic_generator_step() {
        let config = WganConfig {
            critic: crate::gan::config::CriticConfig { activation: CriticActivation::Identity },
            ..small_config()
        };
        let mut trainer = trainer(config);
        let (_, loss) = trainer.step(UpdateTarget::Generator, TrainingState::new()).expect("step");
        let StepLoss::Generator(value) = loss else {
            panic!("expected a generator loss");
        };
        assert!(value.is_finite());
    }

    #[test]
    fn test_repeated_steps_keep_gradients_fresh() {
        let mut trainer = trainer(small_config());
        let mut state = TrainingState::new();
        for _ in 0..3 {
            (state, _) = trainer.step(UpdateTarget::Critic, state).expect("critic step");
            (state, _) = trainer.step(UpdateTarget::Generator, state).expect("generator step");
        }
        assert_eq!(state.critic_updates(), 3);
        assert_eq!(state.generator_updates(), 3);
        assert!(trainer.critic().weight().data().iter().all(|w| w.is_finite()));
    }
}
