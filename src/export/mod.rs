//! Destinations for generated flows and run artifacts

mod csv_sink;
mod memory;

pub use csv_sink::CsvSampleSink;
pub use memory::MemorySink;

use crate::dataset::FlowRecord;
use crate::error::Result;
use crate::gan::{TrainingState, TrainingSummary};

/// Receives everything a training run persists
pub trait SampleSink {
    /// Records generated at a checkpoint
    fn write_samples(&mut self, epoch: usize, records: &[FlowRecord]) -> Result<()>;

    /// Full per-epoch loss history, keyed by run shape
    fn write_loss_history(&mut self, epochs: usize, batch_size: usize, state: &TrainingState) -> Result<()>;

    /// Run summary written once training completes
    fn write_summary(&mut self, summary: &TrainingSummary) -> Result<()>;
}
