//! Concatenation of tensors into one contiguous vector

use super::basic::propagate;
use crate::autograd::{BackwardOp, GradCell, Tensor};
use ndarray::{s, Array1};
use std::rc::Rc;

/// Concatenate tensors end to end
///
/// The backward pass hands each input the slice of the output gradient
/// that lines up with its position.
pub fn concat(parts: &[Tensor]) -> Tensor {
    let total: usize = parts.iter().map(Tensor::len).sum();
    let mut data = Array1::zeros(total);
    let mut offset = 0;
    for part in parts {
        data.slice_mut(s![offset..offset + part.len()]).assign(part.data());
        offset += part.len();
    }

    let requires_grad = parts.iter().any(Tensor::requires_grad);
    let mut result = Tensor::new(data, requires_grad);

    if requires_grad {
        result.set_backward_op(Rc::new(ConcatBackward {
            parts: parts.to_vec(),
            result_grad: result.grad_cell(),
        }));
    }

    result
}

struct ConcatBackward {
    parts: Vec<Tensor>,
    result_grad: GradCell,
}

impl BackwardOp for ConcatBackward {
    fn backward(&self) {
        let Some(grad) = self.result_grad.borrow().clone() else {
            return;
        };
        let mut offset = 0;
        for part in &self.parts {
            let end = offset + part.len();
            if part.requires_grad() {
                part.accumulate_grad(grad.slice(s![offset..end]).to_owned());
            }
            offset = end;
        }
        for part in &self.parts {
            propagate(part);
        }
    }
}
