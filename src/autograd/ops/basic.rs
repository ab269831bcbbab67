//! Elementwise and reduction ops: add, mul, scale, sum

use crate::autograd::{BackwardOp, GradCell, Tensor};
use ndarray::Array1;
use std::rc::Rc;

/// Continue the backward walk into an input's producer, if it has one
pub(super) fn propagate(input: &Tensor) {
    if let Some(op) = input.backward_op() {
        op.backward();
    }
}

/// Elementwise sum of two equal-length tensors
pub fn add(a: &Tensor, b: &Tensor) -> Tensor {
    assert_eq!(a.len(), b.len(), "add: length mismatch");
    let requires_grad = a.requires_grad() || b.requires_grad();
    let mut result = Tensor::new(a.data() + b.data(), requires_grad);

    if requires_grad {
        result.set_backward_op(Rc::new(AddBackward {
            a: a.clone(),
            b: b.clone(),
            result_grad: result.grad_cell(),
        }));
    }

    result
}

struct AddBackward {
    a: Tensor,
    b: Tensor,
    result_grad: GradCell,
}

impl BackwardOp for AddBackward {
    fn backward(&self) {
        let Some(grad) = self.result_grad.borrow().clone() else {
            return;
        };
        for input in [&self.a, &self.b] {
            if input.requires_grad() {
                input.accumulate_grad(grad.clone());
            }
        }
        propagate(&self.a);
        propagate(&self.b);
    }
}

/// Elementwise product of two equal-length tensors
pub fn mul(a: &Tensor, b: &Tensor) -> Tensor {
    assert_eq!(a.len(), b.len(), "mul: length mismatch");
    let requires_grad = a.requires_grad() || b.requires_grad();
    let mut result = Tensor::new(a.data() * b.data(), requires_grad);

    if requires_grad {
        result.set_backward_op(Rc::new(MulBackward {
            a: a.clone(),
            b: b.clone(),
            result_grad: result.grad_cell(),
        }));
    }

    result
}

struct MulBackward {
    a: Tensor,
    b: Tensor,
    result_grad: GradCell,
}

impl BackwardOp for MulBackward {
    fn backward(&self) {
        let Some(grad) = self.result_grad.borrow().clone() else {
            return;
        };
        // ∂(a⊙b)/∂a = b, ∂(a⊙b)/∂b = a
        if self.a.requires_grad() {
            self.a.accumulate_grad(&grad * self.b.data());
        }
        if self.b.requires_grad() {
            self.b.accumulate_grad(&grad * self.a.data());
        }
        propagate(&self.a);
        propagate(&self.b);
    }
}

/// Multiply every element by a constant
pub fn scale(a: &Tensor, factor: f32) -> Tensor {
    let mut result = Tensor::new(a.data() * factor, a.requires_grad());

    if a.requires_grad() {
        result.set_backward_op(Rc::new(ScaleBackward {
            a: a.clone(),
            factor,
            result_grad: result.grad_cell(),
        }));
    }

    result
}

struct ScaleBackward {
    a: Tensor,
    factor: f32,
    result_grad: GradCell,
}

impl BackwardOp for ScaleBackward {
    fn backward(&self) {
        let Some(grad) = self.result_grad.borrow().clone() else {
            return;
        };
        self.a.accumulate_grad(grad * self.factor);
        propagate(&self.a);
    }
}

/// Sum of all elements, as a one-element tensor
pub fn sum(a: &Tensor) -> Tensor {
    let data = Array1::from(vec![a.data().sum()]);
    let mut result = Tensor::new(data, a.requires_grad());

    if a.requires_grad() {
        result.set_backward_op(Rc::new(SumBackward {
            a: a.clone(),
            result_grad: result.grad_cell(),
        }));
    }

    result
}

struct SumBackward {
    a: Tensor,
    result_grad: GradCell,
}

impl BackwardOp for SumBackward {
    fn backward(&self) {
        let Some(grad) = self.result_grad.borrow().clone() else {
            return;
        };
        // broadcast the scalar gradient
        self.a.accumulate_grad(Array1::from_elem(self.a.len(), grad[0]));
        propagate(&self.a);
    }
}
