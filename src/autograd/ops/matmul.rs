//! Matrix multiplication over row-major flattened tensors

use super::basic::propagate;
use crate::autograd::{BackwardOp, GradCell, Tensor};
use ndarray::{Array1, ArrayView2};

fn view(data: &[f32], rows: usize, cols: usize) -> ArrayView2<'_, f32> {
    ArrayView2::from_shape((rows, cols), data).expect("matrix shape checked by caller")
}

/// Compute C = A @ B on raw row-major slices
///
/// A is m×k, B is k×n, the result is m×n.
pub fn matmul_compute(a: &[f32], b: &[f32], m: usize, k: usize, n: usize) -> Vec<f32> {
    let c = view(a, m, k).dot(&view(b, k, n));
    c.into_iter().collect()
}

/// Matrix multiplication
///
/// Computes C = A @ B where:
/// - A is m×k (flattened to length m*k)
/// - B is k×n (flattened to length k*n)
/// - C is m×n (flattened to length m*n)
pub fn matmul(a: &Tensor, b: &Tensor, m: usize, k: usize, n: usize) -> Tensor {
    assert_eq!(a.len(), m * k, "Matrix A size mismatch");
    assert_eq!(b.len(), k * n, "Matrix B size mismatch");

    let a_data = a.data().to_vec();
    let b_data = b.data().to_vec();
    let result_data = matmul_compute(&a_data, &b_data, m, k, n);

    let requires_grad = a.requires_grad() || b.requires_grad();
    let mut result = Tensor::new(Array1::from(result_data), requires_grad);

    if requires_grad {
        result.set_backward_op(std::rc::Rc::new(MatmulBackward {
            a: a.clone(),
            b: b.clone(),
            m,
            k,
            n,
            result_grad: result.grad_cell(),
        }));
    }

    result
}

struct MatmulBackward {
    a: Tensor,
    b: Tensor,
    m: usize,
    k: usize,
    n: usize,
    result_grad: GradCell,
}

impl BackwardOp for MatmulBackward {
    fn backward(&self) {
        let Some(grad) = self.result_grad.borrow().clone() else {
            return;
        };
        let grad_c = grad.to_vec();
        let grad_c = view(&grad_c, self.m, self.n);

        if self.a.requires_grad() {
            // ∂L/∂A = ∂L/∂C @ Bᵀ  (m×n)(n×k)
            let b_data = self.b.data().to_vec();
            let grad_a = grad_c.dot(&view(&b_data, self.k, self.n).t());
            self.a.accumulate_grad(grad_a.into_iter().collect());
        }

        if self.b.requires_grad() {
            // ∂L/∂B = Aᵀ @ ∂L/∂C  (k×m)(m×n)
            let a_data = self.a.data().to_vec();
            let grad_b = view(&a_data, self.m, self.k).t().dot(&grad_c);
            self.b.accumulate_grad(grad_b.into_iter().collect());
        }

        propagate(&self.a);
        propagate(&self.b);
    }
}
