//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use crate::gan::AdamConfig;
use proptest::prelude::*;
use std::path::PathBuf;

fn arb_valid_spec() -> impl Strategy<Value = TrainSpec> {
    (
        1usize..256,  // batch_size
        1e-6f32..1.0, // lr
        1usize..500,  // epochs
        1usize..10,   // n_critic
        0.05f32..5.0, // tau
        0.0f32..0.99, // beta1
    )
        .prop_map(|(batch_size, lr, epochs, n_critic, tau, beta1)| TrainSpec {
            data: DataConfig { train: PathBuf::from("myFlow.csv") },
            model: ModelSpec { tau, ..Default::default() },
            optimizer: AdamConfig { lr, beta1, ..Default::default() },
            training: TrainingParams { epochs, batch_size, n_critic, ..Default::default() },
            output: OutputConfig::default(),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        prop_assert!(validate_config(&spec).is_ok());
    }

    #[test]
    fn prop_zero_batch_size_fails(spec in arb_valid_spec()) {
        let mut spec = spec;
        spec.training.batch_size = 0;
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn prop_non_positive_tau_fails(spec in arb_valid_spec(), tau in -5.0f32..=0.0) {
        let mut spec = spec;
        spec.model.tau = tau;
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidTemperature(_))
        ));
    }
}
