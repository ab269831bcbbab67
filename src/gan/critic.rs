//! Critic network: realism score for an encoded flow vector.

use ndarray::{Array1, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::{CriticActivation, CriticConfig};
use super::latent::standard_normal;
use crate::autograd::{add, mul, sum, tanh};
use crate::error::{Error, Result};
use crate::Tensor;

/// Single dense unit `score = φ(w·x + b)`
///
/// The score is a Wasserstein critic value, not a probability. With the
/// tanh activation it is bounded to (-1, 1).
#[derive(Debug)]
pub struct Critic {
    /// Configuration
    pub config: CriticConfig,
    weight: Tensor,
    bias: Tensor,
}

impl Critic {
    /// Create a new critic with random initialization
    pub fn new(config: CriticConfig, input_width: usize) -> Result<Self> {
        Self::build(config, input_width, &mut StdRng::from_os_rng())
    }

    /// Create a new critic with a seed for reproducibility
    pub fn with_seed(config: CriticConfig, input_width: usize, seed: u64) -> Result<Self> {
        Self::build(config, input_width, &mut StdRng::seed_from_u64(seed))
    }

    fn build<R: Rng>(config: CriticConfig, input_width: usize, rng: &mut R) -> Result<Self> {
        if input_width == 0 {
            return Err(Error::Configuration("critic input width must be positive".into()));
        }
        let std = (2.0 / (input_width + 1) as f64).sqrt();
        let weight = (0..input_width).map(|_| (standard_normal(rng) * std) as f32).collect();
        Ok(Self {
            config,
            weight: Tensor::from_vec(weight, true),
            bias: Tensor::zeros(1, true),
        })
    }

    /// Build a critic with fixed parameters
    pub fn from_weights(config: CriticConfig, weight: Vec<f32>, bias: f32) -> Result<Self> {
        if weight.is_empty() {
            return Err(Error::Configuration("critic input width must be positive".into()));
        }
        Ok(Self {
            config,
            weight: Tensor::from_vec(weight, true),
            bias: Tensor::from_vec(vec![bias], true),
        })
    }

    pub fn input_width(&self) -> usize {
        self.weight.len()
    }

    pub fn activation(&self) -> CriticActivation {
        self.config.activation
    }

    pub fn weight(&self) -> &Tensor {
        &self.weight
    }

    pub fn bias(&self) -> &Tensor {
        &self.bias
    }

    /// `w·x + b`
    pub fn preactivation(&self, x: ArrayView1<'_, f32>) -> f32 {
        self.weight.data().dot(&x) + self.bias.data()[0]
    }

    /// Score without recording a graph
    pub fn score(&self, x: ArrayView1<'_, f32>) -> f32 {
        self.activation().apply(self.preactivation(x))
    }

    /// Score as a one-element tensor whose graph reaches `w` and `b`
    ///
    /// The input is treated as a constant.
    pub fn score_tensor(&self, x: &Array1<f32>) -> Tensor {
        let input = Tensor::new(x.clone(), false);
        let a = add(&sum(&mul(&self.weight, &input)), &self.bias);
        match self.activation() {
            CriticActivation::Tanh => tanh(&a),
            CriticActivation::Identity => a,
        }
    }

    /// ∇ₓ score(x) = φ'(w·x + b) · w
    pub fn input_gradient(&self, x: ArrayView1<'_, f32>) -> Array1<f32> {
        let slope = self.activation().derivative(self.preactivation(x));
        self.weight.data() * slope
    }

    pub fn parameters(&self) -> [&Tensor; 2] {
        [&self.weight, &self.bias]
    }

    pub fn parameters_mut(&mut self) -> Vec<&mut Tensor> {
        vec![&mut self.weight, &mut self.bias]
    }

    pub fn zero_grad(&self) {
        self.parameters().into_iter().for_each(Tensor::zero_grad);
    }

    #[must_use]
    pub fn num_parameters(&self) -> usize {
        self.weight.len() + 1
    }
}
