//! Unit tests for autograd operations (forward and backward)

use crate::autograd::{
    add, backward, concat, matmul, mul, scale, sigmoid, softmax, sum, tanh, Tensor,
};
use approx::assert_abs_diff_eq;
use ndarray::arr1;

#[test]
fn test_tensor_grad_accumulation() {
    let t = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);

    t.accumulate_grad(arr1(&[1.0, 1.0, 1.0]));
    t.accumulate_grad(arr1(&[1.0, 1.0, 1.0]));

    let grad = t.grad().expect("gradient should be available");
    assert_eq!(grad[0], 2.0);
}

#[test]
fn test_add_backward() {
    let a = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);
    let b = Tensor::from_vec(vec![4.0, 5.0, 6.0], false);
    let mut c = add(&a, &b);
    assert_abs_diff_eq!(c.data()[2], 9.0);

    backward(&mut c, Some(arr1(&[1.0, 2.0, 3.0])));

    let grad_a = a.grad().expect("gradient should be available");
    assert_abs_diff_eq!(grad_a[1], 2.0);
    assert!(b.grad().is_none());
}

#[test]
fn test_mul_backward() {
    let a = Tensor::from_vec(vec![2.0, 3.0], true);
    let b = Tensor::from_vec(vec![5.0, 7.0], true);
    let mut c = mul(&a, &b);

    backward(&mut c, None);

    let grad_a = a.grad().expect("gradient should be available");
    let grad_b = b.grad().expect("gradient should be available");
    assert_abs_diff_eq!(grad_a[1], 7.0);
    assert_abs_diff_eq!(grad_b[0], 2.0);
}

#[test]
fn test_scale_then_sum_backward() {
    let a = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);
    let mut s = sum(&scale(&a, -0.5));
    assert_abs_diff_eq!(s.data()[0], -3.0);

    backward(&mut s, None);

    let grad_a = a.grad().expect("gradient should be available");
    for g in grad_a.iter() {
        assert_abs_diff_eq!(*g, -0.5);
    }
}

#[test]
fn test_sigmoid_forward_midpoint() {
    let a = Tensor::from_vec(vec![0.0, 100.0, -100.0], false);
    let y = sigmoid(&a);
    assert_abs_diff_eq!(y.data()[0], 0.5);
    assert_abs_diff_eq!(y.data()[1], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(y.data()[2], 0.0, epsilon = 1e-6);
}

#[test]
fn test_sigmoid_backward_at_zero() {
    let a = Tensor::from_vec(vec![0.0], true);
    let mut y = sigmoid(&a);
    backward(&mut y, None);
    assert_abs_diff_eq!(a.grad().expect("gradient should be available")[0], 0.25);
}

#[test]
fn test_tanh_backward_at_zero() {
    let a = Tensor::from_vec(vec![0.0, 1.0], true);
    let mut y = tanh(&a);
    backward(&mut y, None);
    let grad = a.grad().expect("gradient should be available");
    assert_abs_diff_eq!(grad[0], 1.0);
    assert_abs_diff_eq!(grad[1], 1.0 - 1.0f32.tanh().powi(2), epsilon = 1e-6);
}

#[test]
fn test_softmax_uniform_input() {
    let a = Tensor::from_vec(vec![3.0; 4], false);
    let y = softmax(&a);
    for v in y.data().iter() {
        assert_abs_diff_eq!(*v, 0.25, epsilon = 1e-6);
    }
}

#[test]
fn test_softmax_large_logits_stay_finite() {
    let a = Tensor::from_vec(vec![1000.0, 0.0, -1000.0], false);
    let y = softmax(&a);
    assert!(y.data().iter().all(|v| v.is_finite()));
    assert_abs_diff_eq!(y.data()[0], 1.0, epsilon = 1e-6);
}

#[test]
fn test_concat_forward_and_backward_split() {
    let a = Tensor::from_vec(vec![1.0, 2.0], true);
    let b = Tensor::from_vec(vec![3.0], false);
    let c = Tensor::from_vec(vec![4.0, 5.0, 6.0], true);
    let mut out = concat(&[a.clone(), b.clone(), c.clone()]);

    assert_eq!(out.data().to_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

    backward(&mut out, Some(arr1(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0])));

    assert_eq!(a.grad().expect("gradient should be available").to_vec(), vec![10.0, 20.0]);
    assert!(b.grad().is_none());
    assert_eq!(
        c.grad().expect("gradient should be available").to_vec(),
        vec![40.0, 50.0, 60.0]
    );
}

#[test]
fn test_dense_head_chain_reaches_weights() {
    // z @ W + b through sigmoid, the shape of a continuous generator head
    let z = Tensor::from_vec(vec![1.0, 2.0], false);
    let w = Tensor::from_vec(vec![0.5, -0.5], true);
    let b = Tensor::from_vec(vec![0.0], true);
    let mut y = sigmoid(&add(&matmul(&z, &w, 1, 2, 1), &b));

    backward(&mut y, None);

    // pre-activation is -0.5
    let s = 1.0 / (1.0 + 0.5f32.exp());
    let local = s * (1.0 - s);
    let grad_w = w.grad().expect("gradient should be available");
    assert_abs_diff_eq!(grad_w[0], local * 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(grad_w[1], local * 2.0, epsilon = 1e-6);
    assert_abs_diff_eq!(
        b.grad().expect("gradient should be available")[0],
        local,
        epsilon = 1e-6
    );
}
