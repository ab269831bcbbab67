//! Optimizer trait

use crate::Tensor;

/// Trait for optimization algorithms
///
/// Parameters are passed by reference on every call so the caller decides
/// which tensors an update touches. The WGAN trainer relies on this to keep
/// one network frozen while the other one steps.
pub trait Optimizer {
    /// Update the referenced parameters from their accumulated gradients
    ///
    /// The slot order must be stable across calls: per-parameter state is
    /// indexed by position.
    fn step_refs(&mut self, params: &mut [&mut Tensor]);

    /// Update an owned parameter list
    fn step(&mut self, params: &mut [Tensor]) {
        let mut refs: Vec<&mut Tensor> = params.iter_mut().collect();
        self.step_refs(&mut refs);
    }

    /// Zero gradients on referenced parameters
    fn zero_grad_refs(&mut self, params: &mut [&mut Tensor]) {
        for param in params.iter_mut() {
            param.zero_grad();
        }
    }

    /// Get learning rate
    fn lr(&self) -> f32;

    /// Set learning rate
    fn set_lr(&mut self, lr: f32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    /// Plain gradient descent, enough to exercise the default methods
    struct TestOptimizer {
        learning_rate: f32,
    }

    impl Optimizer for TestOptimizer {
        fn step_refs(&mut self, params: &mut [&mut Tensor]) {
            for param in params.iter_mut() {
                if let Some(grad) = param.grad() {
                    let lr = self.learning_rate;
                    param.data_mut().zip_mut_with(&grad, |d, g| *d -= lr * g);
                }
            }
        }

        fn lr(&self) -> f32 {
            self.learning_rate
        }

        fn set_lr(&mut self, lr: f32) {
            self.learning_rate = lr;
        }
    }

    #[test]
    fn test_step_delegates_to_step_refs() {
        let mut opt = TestOptimizer { learning_rate: 0.1 };
        let mut params = vec![Tensor::from_vec(vec![1.0, 2.0], true)];
        params[0].set_grad(arr1(&[0.5, 1.0]));

        opt.step(&mut params);

        let data = params[0].data();
        assert!((data[0] - 0.95).abs() < 1e-6);
        assert!((data[1] - 1.9).abs() < 1e-6);
    }

    #[test]
    fn test_zero_grad_refs() {
        let mut opt = TestOptimizer { learning_rate: 0.1 };
        let mut param = Tensor::from_vec(vec![1.0], true);
        param.set_grad(arr1(&[3.0]));

        opt.zero_grad_refs(&mut [&mut param]);
        assert!(param.grad().is_none());
    }

    #[test]
    fn test_set_lr() {
        let mut opt = TestOptimizer { learning_rate: 0.1 };
        opt.set_lr(0.01);
        assert_eq!(opt.lr(), 0.01);
    }
}
