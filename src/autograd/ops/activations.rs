//! Activation ops: sigmoid, tanh, softmax

use super::basic::propagate;
use crate::autograd::{BackwardOp, GradCell, Tensor};
use std::rc::Rc;

/// Logistic sigmoid, 1 / (1 + e^(-x))
pub fn sigmoid(a: &Tensor) -> Tensor {
    let data = a.data().mapv(|x| 1.0 / (1.0 + (-x).exp()));
    let mut result = Tensor::new(data, a.requires_grad());

    if a.requires_grad() {
        let output = result.detach();
        result.set_backward_op(Rc::new(SigmoidBackward {
            a: a.clone(),
            output,
            result_grad: result.grad_cell(),
        }));
    }

    result
}

struct SigmoidBackward {
    a: Tensor,
    output: Tensor,
    result_grad: GradCell,
}

impl BackwardOp for SigmoidBackward {
    fn backward(&self) {
        let Some(grad) = self.result_grad.borrow().clone() else {
            return;
        };
        // σ'(x) = σ(x)(1 - σ(x))
        let y = self.output.data();
        let local = y * &y.mapv(|v| 1.0 - v);
        self.a.accumulate_grad(grad * local);
        propagate(&self.a);
    }
}

/// Hyperbolic tangent
pub fn tanh(a: &Tensor) -> Tensor {
    let data = a.data().mapv(f32::tanh);
    let mut result = Tensor::new(data, a.requires_grad());

    if a.requires_grad() {
        let output = result.detach();
        result.set_backward_op(Rc::new(TanhBackward {
            a: a.clone(),
            output,
            result_grad: result.grad_cell(),
        }));
    }

    result
}

struct TanhBackward {
    a: Tensor,
    output: Tensor,
    result_grad: GradCell,
}

impl BackwardOp for TanhBackward {
    fn backward(&self) {
        let Some(grad) = self.result_grad.borrow().clone() else {
            return;
        };
        // tanh'(x) = 1 - tanh²(x)
        let local = self.output.data().mapv(|t| 1.0 - t * t);
        self.a.accumulate_grad(grad * local);
        propagate(&self.a);
    }
}

/// Softmax over the whole tensor (max-shifted for stability)
pub fn softmax(a: &Tensor) -> Tensor {
    let max_val = a.data().iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exp_vals = a.data().mapv(|x| (x - max_val).exp());
    let sum_exp = exp_vals.sum();
    let mut result = Tensor::new(exp_vals / sum_exp, a.requires_grad());

    if a.requires_grad() {
        let output = result.detach();
        result.set_backward_op(Rc::new(SoftmaxBackward {
            a: a.clone(),
            output,
            result_grad: result.grad_cell(),
        }));
    }

    result
}

struct SoftmaxBackward {
    a: Tensor,
    output: Tensor,
    result_grad: GradCell,
}

impl BackwardOp for SoftmaxBackward {
    fn backward(&self) {
        let Some(grad) = self.result_grad.borrow().clone() else {
            return;
        };
        // ∂L/∂x = y ⊙ (∂L/∂y - (y · ∂L/∂y))
        let y = self.output.data();
        let dot = (y * &grad).sum();
        self.a.accumulate_grad(y * &(grad - dot));
        propagate(&self.a);
    }
}
