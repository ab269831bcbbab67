//! Generator network: latent noise to an encoded flow vector.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::GeneratorConfig;
use super::gumbel::gumbel_softmax;
use super::latent::{standard_normal, LatentCode};
use crate::autograd::{add, concat, matmul, sigmoid};
use crate::codec::{FieldLayout, Segment};
use crate::dataset::FieldKind;
use crate::error::{Error, Result};
use crate::Tensor;

/// One linear projection from the latent code to a field segment
#[derive(Debug)]
struct Head {
    segment: Segment,
    /// `latent_dim × width`, row-major
    weight: Tensor,
    bias: Tensor,
}

/// Generator network: one independent head per field over a shared noise input
///
/// Categorical heads emit Gumbel-softmax samples of their segment width.
/// Continuous heads emit a single sigmoid unit, which covers the scaled
/// range the codec encodes into.
#[derive(Debug)]
pub struct Generator {
    /// Configuration
    pub config: GeneratorConfig,
    layout: FieldLayout,
    heads: Vec<Head>,
}

impl Generator {
    /// Create a new generator with random initialization
    pub fn new(config: GeneratorConfig, layout: &FieldLayout) -> Result<Self> {
        Self::build(config, layout, &mut StdRng::from_os_rng())
    }

    /// Create a new generator with a seed for reproducibility
    pub fn with_seed(config: GeneratorConfig, layout: &FieldLayout, seed: u64) -> Result<Self> {
        Self::build(config, layout, &mut StdRng::seed_from_u64(seed))
    }

    fn build<R: Rng>(config: GeneratorConfig, layout: &FieldLayout, rng: &mut R) -> Result<Self> {
        if config.latent_dim == 0 {
            return Err(Error::Configuration("generator latent_dim must be positive".into()));
        }
        if let Some(empty) = layout.segments().iter().find(|s| s.width == 0) {
            return Err(Error::Configuration(format!("{} segment has zero width", empty.field)));
        }
        let heads = layout
            .segments()
            .iter()
            .map(|&segment| Self::init_head(config.latent_dim, segment, rng))
            .collect();
        Ok(Self { config, layout: layout.clone(), heads })
    }

    fn init_head<R: Rng>(latent_dim: usize, segment: Segment, rng: &mut R) -> Head {
        // Xavier initialization
        let std = (2.0 / (latent_dim + segment.width) as f64).sqrt();
        let weight = (0..latent_dim * segment.width)
            .map(|_| (standard_normal(rng) * std) as f32)
            .collect();
        Head {
            segment,
            weight: Tensor::from_vec(weight, true),
            bias: Tensor::zeros(segment.width, true),
        }
    }

    /// Layout the generator emits, identical to the codec it was built for
    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// Width of a generated vector
    pub fn output_width(&self) -> usize {
        self.layout.width()
    }

    /// Differentiable forward pass
    ///
    /// The returned tensor carries the graph back to every head parameter.
    /// `rng` supplies the Gumbel noise for categorical heads.
    pub fn forward<R: Rng>(&self, latent: &LatentCode, rng: &mut R) -> Tensor {
        assert_eq!(latent.dim(), self.config.latent_dim, "latent dimension mismatch");
        let z = latent.to_tensor();

        let parts: Vec<Tensor> = self
            .heads
            .iter()
            .map(|head| {
                let width = head.segment.width;
                let logits = add(&matmul(&z, &head.weight, 1, self.config.latent_dim, width), &head.bias);
                match head.segment.field.kind() {
                    FieldKind::Categorical => gumbel_softmax(&logits, self.config.tau, rng),
                    FieldKind::Continuous => sigmoid(&logits),
                }
            })
            .collect();

        concat(&parts)
    }

    /// Generate an encoded vector without keeping the graph
    pub fn generate<R: Rng>(&self, latent: &LatentCode, rng: &mut R) -> Array1<f32> {
        self.forward(latent, rng).data().clone()
    }

    /// Trainable parameters in a stable order
    pub fn parameters(&self) -> impl Iterator<Item = &Tensor> {
        self.heads.iter().flat_map(|h| [&h.weight, &h.bias])
    }

    /// Mutable references to the trainable parameters, same order as [`parameters`](Self::parameters)
    pub fn parameters_mut(&mut self) -> Vec<&mut Tensor> {
        self.heads.iter_mut().flat_map(|h| [&mut h.weight, &mut h.bias]).collect()
    }

    pub fn zero_grad(&self) {
        self.parameters().for_each(Tensor::zero_grad);
    }

    /// Get number of parameters
    #[must_use]
    pub fn num_parameters(&self) -> usize {
        self.parameters().map(Tensor::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::backward;
    use crate::dataset::FlowField;
    use approx::assert_abs_diff_eq;
    use ndarray::s;
    use proptest::prelude::*;

    fn layout() -> FieldLayout {
        FieldLayout::from_widths([
            (FlowField::SrcAddr, 3),
            (FlowField::DstAddr, 2),
            (FlowField::Sport, 1),
            (FlowField::Dport, 4),
            (FlowField::Proto, 2),
            (FlowField::Rate, 1),
            (FlowField::Load, 1),
        ])
    }

    fn config() -> GeneratorConfig {
        GeneratorConfig { latent_dim: 8, tau: 2.0 / 3.0 }
    }

    #[test]
    fn test_output_width_matches_layout() {
        let gen = Generator::with_seed(config(), &layout(), 42).expect("valid generator");
        let z = LatentCode::sample(&mut StdRng::seed_from_u64(1), 8);
        let out = gen.generate(&z, &mut StdRng::seed_from_u64(2));
        assert_eq!(out.len(), 14);
        assert_eq!(gen.output_width(), layout().width());
        assert_eq!(gen.num_parameters(), 8 * 14 + 14);
    }

    #[test]
    fn test_segments_have_expected_ranges() {
        let gen = Generator::with_seed(config(), &layout(), 42).expect("valid generator");
        let z = LatentCode::sample(&mut StdRng::seed_from_u64(1), 8);
        let out = gen.generate(&z, &mut StdRng::seed_from_u64(2));
        for segment in gen.layout().segments() {
            let slot = out.slice(s![segment.range()]);
            if segment.field.is_categorical() {
                assert_abs_diff_eq!(slot.sum(), 1.0, epsilon = 1e-5);
            } else {
                assert!(slot[0] > 0.0 && slot[0] < 1.0);
            }
        }
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let gen = Generator::with_seed(config(), &layout(), 42).expect("valid generator");
        let z = LatentCode::new(vec![0.5; 8]);
        let a = gen.generate(&z, &mut StdRng::seed_from_u64(11));
        let b = gen.generate(&z, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_width_segment_rejected() {
        let bad = FieldLayout::from_widths([(FlowField::SrcAddr, 0)]);
        assert!(matches!(Generator::with_seed(config(), &bad, 1), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_backward_reaches_every_head() {
        let gen = Generator::with_seed(config(), &layout(), 42).expect("valid generator");
        let z = LatentCode::sample(&mut StdRng::seed_from_u64(1), 8);
        let mut out = gen.forward(&z, &mut StdRng::seed_from_u64(2));
        let seed = Array1::from_iter((0..out.len()).map(|i| if i % 2 == 0 { 1.0 } else { -0.5 }));
        backward(&mut out, Some(seed));
        for param in gen.parameters() {
            assert!(param.grad().is_some());
        }
        gen.zero_grad();
        assert!(gen.parameters().all(|p| p.grad().is_none()));
    }

    proptest! {
        #[test]
        fn prop_generated_values_finite(seed in 0u64..1000) {
            let gen = Generator::with_seed(config(), &layout(), seed).expect("valid generator");
            let mut rng = StdRng::seed_from_u64(seed);
            let z = LatentCode::sample(&mut rng, 8);
            let out = gen.generate(&z, &mut rng);
            prop_assert!(out.iter().all(|x| x.is_finite()));
        }
    }
}
