//! Property-based gradient check for matmul

use super::test_utils::finite_difference;
use crate::autograd::{backward, matmul, Tensor};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_matmul_gradient_check_both_sides(
        (m, k, n, a_data, b_data) in (1usize..4, 1usize..5, 1usize..5).prop_flat_map(|(m, k, n)| (
            Just(m),
            Just(k),
            Just(n),
            prop::collection::vec(-2.0f32..2.0, m * k),
            prop::collection::vec(-2.0f32..2.0, k * n),
        ))
    ) {
        let a = Tensor::from_vec(a_data.clone(), true);
        let b = Tensor::from_vec(b_data.clone(), true);
        let mut c = matmul(&a, &b, m, k, n);
        backward(&mut c, Some(ndarray::Array1::ones(m * n)));

        let grad_a = a.grad().expect("gradient should be available");
        let grad_b = b.grad().expect("gradient should be available");

        let numerical_a = finite_difference(
            |probe| {
                let t = Tensor::from_vec(probe.to_vec(), false);
                matmul(&t, &Tensor::from_vec(b_data.clone(), false), m, k, n).data().sum()
            },
            &a_data,
            1e-2,
        );
        let numerical_b = finite_difference(
            |probe| {
                let t = Tensor::from_vec(probe.to_vec(), false);
                matmul(&Tensor::from_vec(a_data.clone(), false), &t, m, k, n).data().sum()
            },
            &b_data,
            1e-2,
        );

        for i in 0..a_data.len() {
            prop_assert!((grad_a[i] - numerical_a[i]).abs() < 0.05);
        }
        for i in 0..b_data.len() {
            prop_assert!((grad_b[i] - numerical_b[i]).abs() < 0.05);
        }
    }
}
