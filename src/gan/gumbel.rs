//! Gumbel-softmax relaxation of categorical sampling

use crate::autograd::{add, scale, softmax};
use crate::Tensor;
use ndarray::Array1;
use rand::Rng;

/// Keeps both logarithms finite when `U` is 0
const GUMBEL_EPS: f64 = 1e-20;

/// Draw `len` samples of standard Gumbel noise `-ln(-ln(U + ε) + ε)`
pub fn gumbel_noise<R: Rng>(rng: &mut R, len: usize) -> Array1<f32> {
    Array1::from_iter((0..len).map(|_| {
        let u: f64 = rng.random();
        (-(-(u + GUMBEL_EPS).ln() + GUMBEL_EPS).ln()) as f32
    }))
}

/// `softmax((logits + g) / τ)` with fresh Gumbel noise `g`
///
/// The noise enters as a constant, so gradients reach the logits through
/// the scaled softmax only. Lower `τ` pushes the output towards one-hot.
pub fn gumbel_softmax<R: Rng>(logits: &Tensor, tau: f32, rng: &mut R) -> Tensor {
    let noise = Tensor::new(gumbel_noise(rng, logits.len()), false);
    softmax(&scale(&add(logits, &noise), 1.0 / tau))
}
