//! Latent noise fed to the generator.

use crate::Tensor;
use rand::Rng;

/// Latent code representation (vector in latent space)
#[derive(Debug, Clone, PartialEq)]
pub struct LatentCode {
    /// The latent vector
    pub vector: Vec<f32>,
}

impl LatentCode {
    #[must_use]
    pub fn new(vector: Vec<f32>) -> Self {
        Self { vector }
    }

    /// Sample from standard normal distribution using Box-Muller transform
    pub fn sample<R: Rng>(rng: &mut R, dim: usize) -> Self {
        let vector = (0..dim).map(|_| standard_normal(rng) as f32).collect();
        Self { vector }
    }

    /// Draw a batch of independent codes
    pub fn sample_batch<R: Rng>(rng: &mut R, dim: usize, count: usize) -> Vec<Self> {
        (0..count).map(|_| Self::sample(rng, dim)).collect()
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.vector.len()
    }

    /// Constant tensor view of the code; gradients never flow into noise
    pub fn to_tensor(&self) -> Tensor {
        Tensor::from_vec(self.vector.clone(), false)
    }
}

/// One draw from N(0, 1)
pub(crate) fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-10);
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_latent_code_sample() {
        let mut rng = StdRng::seed_from_u64(42);
        let code = LatentCode::sample(&mut rng, 128);
        assert_eq!(code.dim(), 128);
    }

    #[test]
    fn test_same_seed_same_codes() {
        let a = LatentCode::sample_batch(&mut StdRng::seed_from_u64(7), 16, 4);
        let b = LatentCode::sample_batch(&mut StdRng::seed_from_u64(7), 16, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_moments_are_roughly_standard() {
        let mut rng = StdRng::seed_from_u64(3);
        let code = LatentCode::sample(&mut rng, 20_000);
        let n = code.dim() as f32;
        let mean = code.vector.iter().sum::<f32>() / n;
        let var = code.vector.iter().map(|x| (x - mean).powi(2)).sum::<f32>() / n;
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var - 1.0).abs() < 0.05, "variance {var}");
    }

    #[test]
    fn test_to_tensor_is_constant() {
        let tensor = LatentCode::new(vec![1.0, -2.0]).to_tensor();
        assert!(!tensor.requires_grad());
        assert_eq!(tensor.data().to_vec(), vec![1.0, -2.0]);
    }

    proptest! {
        #[test]
        fn prop_samples_are_finite(seed in 0u64..10_000, dim in 1usize..64) {
            let code = LatentCode::sample(&mut StdRng::seed_from_u64(seed), dim);
            prop_assert!(code.vector.iter().all(|x| x.is_finite()));
        }
    }
}
