//! # flowgan
//!
//! Synthetic network-flow generation with a Wasserstein GAN and gradient
//! penalty, built on a small tape-based autograd engine.
//!
//! ## Modules
//!
//! - [`dataset`]: flow records and the CSV tables they are read from
//! - [`codec`]: flow records to fixed-width vectors and back
//! - [`autograd`]: tensors with reverse-mode gradients
//! - [`optim`]: Adam
//! - [`gan`]: generator, critic, losses and the training loop
//! - [`export`]: sinks for sampled flows, loss history and run summaries
//! - [`config`]: YAML training specs, validation and CLI arguments
//! - [`cli`]: command implementations behind the `flowgan` binary
//!
//! ## Example
//!
//! ```rust,no_run
//! use flowgan::codec::FlowCodec;
//! use flowgan::dataset::FlowTable;
//! use flowgan::export::MemorySink;
//! use flowgan::gan::{WganConfig, WganTrainer};
//!
//! # fn main() -> flowgan::Result<()> {
//! let table = FlowTable::from_csv("myFlow.csv")?;
//! let codec = FlowCodec::fit(&table)?;
//! let data = codec.encode_table(&table)?;
//!
//! let config = WganConfig { epochs: 10, seed: Some(7), ..WganConfig::default() };
//! let mut trainer = WganTrainer::new(config, codec, data)?;
//! let mut sink = MemorySink::default();
//! trainer.train(&mut sink)?;
//! # Ok(())
//! # }
//! ```

pub mod autograd;
pub mod cli;
pub mod codec;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod gan;
pub mod optim;

pub use autograd::Tensor;
pub use error::{Error, Result};
