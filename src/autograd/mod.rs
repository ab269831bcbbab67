//! Tape-based autograd engine
//!
//! Each differentiable op records a [`BackwardOp`] on its result. Calling
//! [`backward`] on an output seeds its gradient and walks the recorded ops
//! back to the leaves, accumulating gradients into every tensor created
//! with `requires_grad = true`.
//!
//! The graph is walked as a tree: an intermediate tensor feeding more than
//! one op would have its gradient propagated once per consumer. The models
//! in this crate only share leaves (parameters and constants), which
//! accumulate correctly.

mod backward;
mod ops;
mod tensor;

#[cfg(test)]
mod tests;

pub use backward::BackwardOp;
pub use ops::*;
pub use tensor::{GradCell, Tensor};

/// Perform backward pass on a tensor
pub fn backward(tensor: &mut Tensor, grad_output: Option<ndarray::Array1<f32>>) {
    if let Some(grad) = grad_output {
        tensor.set_grad(grad);
    } else {
        // Initialize with ones for scalar loss
        let ones = ndarray::Array1::ones(tensor.data().len());
        tensor.set_grad(ones);
    }

    if let Some(op) = tensor.backward_op() {
        op.backward();
    }
}
