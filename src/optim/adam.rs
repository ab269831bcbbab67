//! Adam optimizer

use super::Optimizer;
use crate::Tensor;
use ndarray::Array1;

/// Adam with bias correction
///
/// m_t = β1 m_{t-1} + (1 - β1) g
/// v_t = β2 v_{t-1} + (1 - β2) g²
/// θ_t = θ_{t-1} - lr_t m_t / (√v_t + ε),  lr_t = lr √(1 - β2^t) / (1 - β1^t)
pub struct Adam {
    lr: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    t: u64,
    m: Vec<Option<Array1<f32>>>,
    v: Vec<Option<Array1<f32>>>,
}

impl Adam {
    /// Create a new Adam optimizer
    pub fn new(lr: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self { lr, beta1, beta2, epsilon, t: 0, m: Vec::new(), v: Vec::new() }
    }

    /// Adam with the usual defaults (β1 = 0.9, β2 = 0.999, ε = 1e-8)
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.9, 0.999, 1e-8)
    }

    /// Number of steps taken so far
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.t
    }
}

impl Optimizer for Adam {
    fn step_refs(&mut self, params: &mut [&mut Tensor]) {
        if self.m.len() < params.len() {
            self.m.resize(params.len(), None);
            self.v.resize(params.len(), None);
        }
        self.t += 1;

        let t = self.t as i32;
        let lr_t =
            self.lr * ((1.0 - self.beta2.powi(t)).sqrt() / (1.0 - self.beta1.powi(t)));

        for (i, param) in params.iter_mut().enumerate() {
            let Some(grad) = param.grad() else {
                continue;
            };

            let m_t = match &self.m[i] {
                Some(m) => m * self.beta1 + &grad * (1.0 - self.beta1),
                None => &grad * (1.0 - self.beta1),
            };
            let grad_sq = &grad * &grad;
            let v_t = match &self.v[i] {
                Some(v) => v * self.beta2 + &grad_sq * (1.0 - self.beta2),
                None => &grad_sq * (1.0 - self.beta2),
            };

            let update = &m_t / &(v_t.mapv(f32::sqrt) + self.epsilon) * lr_t;
            *param.data_mut() -= &update;

            self.m[i] = Some(m_t);
            self.v[i] = Some(v_t);
        }
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }
}
