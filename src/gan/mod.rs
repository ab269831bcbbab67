//! Wasserstein GAN with gradient penalty for flow records
//!
//! # Architecture
//!
//! ```text
//! Latent z ~ N(0, I) ─┬─► head(SrcAddr) ─► Gumbel-softmax ─┐
//!                     ├─► head(DstAddr) ─► Gumbel-softmax ─┤
//!                     ├─► head(Sport)   ─► sigmoid ────────┤
//!                     ├─► head(Dport)   ─► Gumbel-softmax ─┼─► concat ─► Critic ─► score
//!                     ├─► head(Proto)   ─► Gumbel-softmax ─┤                ▲
//!                     ├─► head(Rate)    ─► sigmoid ────────┤                │
//!                     └─► head(Load)    ─► sigmoid ────────┘   encoded real flows
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use flowgan::codec::FlowCodec;
//! use flowgan::dataset::FlowTable;
//! use flowgan::export::CsvSampleSink;
//! use flowgan::gan::{WganConfig, WganTrainer};
//!
//! # fn main() -> flowgan::Result<()> {
//! let table = FlowTable::from_csv("myFlow.csv")?;
//! let codec = FlowCodec::fit(&table)?;
//! let data = codec.encode_table(&table)?;
//!
//! let mut trainer = WganTrainer::new(WganConfig::default(), codec, data)?;
//! let mut sink = CsvSampleSink::create("flows")?;
//! let state = trainer.train(&mut sink)?;
//! println!("{} generator updates", state.generator_updates());
//! # Ok(())
//! # }
//! ```

mod config;
mod critic;
mod generator;
mod gumbel;
mod latent;
mod loss;
pub mod sampler;
mod trainer;

pub use config::{AdamConfig, CriticActivation, CriticConfig, GeneratorConfig, Interpolation, WganConfig};
pub use critic::Critic;
pub use generator::Generator;
pub use gumbel::{gumbel_noise, gumbel_softmax};
pub use latent::LatentCode;
pub use loss::{gradient_penalty, interpolate, sample_alpha, wasserstein_loss, GradientPenalty, FAKE_LABEL, REAL_LABEL};
pub use trainer::{
    CriticLoss, EpochLoss, StepLoss, TrainerPhase, TrainingState, TrainingSummary, UpdateTarget, WganTrainer,
};
