//! Wasserstein loss and gradient penalty
//!
//! The critic is a single dense unit, so the penalty and its parameter
//! gradients are evaluated in closed form instead of through a second
//! backward pass. For `score = φ(a)`, `a = w·x + b`:
//!
//! ```text
//! ‖∇ₓ score‖ = n = φ'(a)‖w‖
//! ∂n/∂w      = ‖w‖ φ''(a) x + φ'(a) w / ‖w‖
//! ∂n/∂b      = ‖w‖ φ''(a)
//! ∂(n - 1)²  = 2 (n - 1) ∂n
//! ```

use ndarray::{Array1, ArrayView1};
use rand::Rng;

use super::config::Interpolation;
use super::critic::Critic;

/// Target label for real samples
pub const REAL_LABEL: f32 = -1.0;
/// Target label for generated samples
pub const FAKE_LABEL: f32 = 1.0;

/// `-mean(label * score)` for a batch sharing one label
pub fn wasserstein_loss(label: f32, scores: &[f32]) -> f32 {
    if scores.is_empty() {
        return 0.0;
    }
    -label * scores.iter().sum::<f32>() / scores.len() as f32
}

/// Draw interpolation coefficients in [0, 1) for one example
pub fn sample_alpha<R: Rng>(mode: Interpolation, width: usize, rng: &mut R) -> Array1<f32> {
    match mode {
        Interpolation::PerElement => Array1::from_iter((0..width).map(|_| rng.random::<f32>())),
        Interpolation::PerExample => Array1::from_elem(width, rng.random::<f32>()),
    }
}

/// `α ⊙ real + (1 - α) ⊙ fake`
pub fn interpolate(real: ArrayView1<'_, f32>, fake: ArrayView1<'_, f32>, alpha: ArrayView1<'_, f32>) -> Array1<f32> {
    let mut out = Array1::zeros(real.len());
    ndarray::Zip::from(&mut out)
        .and(&real)
        .and(&fake)
        .and(&alpha)
        .for_each(|o, &r, &f, &a| *o = a * r + (1.0 - a) * f);
    out
}

/// Penalty value with its gradients w.r.t. the critic parameters
#[derive(Debug, Clone)]
pub struct GradientPenalty {
    /// `mean((‖∇ₓ score(x̂)‖₂ - 1)²)`
    pub value: f32,
    pub grad_weight: Array1<f32>,
    pub grad_bias: f32,
}

/// Evaluate the penalty over a batch of interpolated points
pub fn gradient_penalty(critic: &Critic, points: &[Array1<f32>]) -> GradientPenalty {
    let w = critic.weight().data();
    let w_norm = w.dot(w).sqrt();
    let activation = critic.activation();

    let mut value = 0.0;
    let mut grad_weight = Array1::zeros(w.len());
    let mut grad_bias = 0.0;
    if points.is_empty() {
        return GradientPenalty { value, grad_weight, grad_bias };
    }

    for x in points {
        let a = critic.preactivation(x.view());
        let d1 = activation.derivative(a);
        let d2 = activation.second_derivative(a);
        let n = d1 * w_norm;
        let outer = 2.0 * (n - 1.0);

        value += (n - 1.0).powi(2);
        grad_weight.scaled_add(outer * w_norm * d2, x);
        if w_norm > 0.0 {
            grad_weight.scaled_add(outer * d1 / w_norm, w);
        }
        grad_bias += outer * w_norm * d2;
    }

    let scale = 1.0 / points.len() as f32;
    GradientPenalty { value: value * scale, grad_weight: grad_weight * scale, grad_bias: grad_bias * scale }
}
