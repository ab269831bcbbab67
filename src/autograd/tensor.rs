//! Tensor type with gradient tracking

use super::BackwardOp;
use ndarray::Array1;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared gradient slot, written by backward ops and read by optimizers
pub type GradCell = Rc<RefCell<Option<Array1<f32>>>>;

/// 1-D tensor with optional gradient tracking
///
/// Clones share the gradient cell, so a clone captured by a backward op
/// accumulates into the same gradient the owner's optimizer reads.
#[derive(Clone)]
pub struct Tensor {
    data: Array1<f32>,
    grad: GradCell,
    backward_op: Option<Rc<dyn BackwardOp>>,
    requires_grad: bool,
}

impl Tensor {
    /// Create a tensor from an array
    pub fn new(data: Array1<f32>, requires_grad: bool) -> Self {
        Self {
            data,
            grad: Rc::new(RefCell::new(None)),
            backward_op: None,
            requires_grad,
        }
    }

    /// Create a tensor from a vector
    pub fn from_vec(data: Vec<f32>, requires_grad: bool) -> Self {
        Self::new(Array1::from(data), requires_grad)
    }

    /// Create a zero-filled tensor
    pub fn zeros(len: usize, requires_grad: bool) -> Self {
        Self::new(Array1::zeros(len), requires_grad)
    }

    /// Underlying data
    pub fn data(&self) -> &Array1<f32> {
        &self.data
    }

    /// Mutable underlying data
    pub fn data_mut(&mut self) -> &mut Array1<f32> {
        &mut self.data
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the tensor has no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether gradients flow into this tensor
    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    /// Current gradient, if any has been accumulated
    pub fn grad(&self) -> Option<Array1<f32>> {
        self.grad.borrow().clone()
    }

    /// Overwrite the gradient
    pub fn set_grad(&self, grad: Array1<f32>) {
        *self.grad.borrow_mut() = Some(grad);
    }

    /// Add to the gradient, initializing it on first use
    pub fn accumulate_grad(&self, grad: Array1<f32>) {
        let mut cell = self.grad.borrow_mut();
        match cell.as_mut() {
            Some(existing) => *existing += &grad,
            None => *cell = Some(grad),
        }
    }

    /// Clear the gradient
    pub fn zero_grad(&self) {
        *self.grad.borrow_mut() = None;
    }

    /// Handle to the gradient cell, captured by backward ops of results
    pub fn grad_cell(&self) -> GradCell {
        Rc::clone(&self.grad)
    }

    /// Op that produced this tensor
    pub fn backward_op(&self) -> Option<Rc<dyn BackwardOp>> {
        self.backward_op.clone()
    }

    /// Attach the op that produced this tensor
    pub fn set_backward_op(&mut self, op: Rc<dyn BackwardOp>) {
        self.backward_op = Some(op);
    }

    /// Copy of the data with no gradient tracking and no history
    #[must_use]
    pub fn detach(&self) -> Self {
        Self::new(self.data.clone(), false)
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("data", &self.data)
            .field("requires_grad", &self.requires_grad)
            .field("has_grad", &self.grad.borrow().is_some())
            .finish()
    }
}
