//! Autograd operations with backward passes
//!
//! This module provides differentiable operations for automatic differentiation.

mod activations;
mod basic;
mod concat;
mod matmul;

// Re-export all public operations
pub use activations::{sigmoid, softmax, tanh};
pub use basic::{add, mul, scale, sum};
pub use concat::concat;
pub use matmul::{matmul, matmul_compute};
