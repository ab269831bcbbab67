//! In-memory sink

use super::SampleSink;
use crate::dataset::FlowRecord;
use crate::error::Result;
use crate::gan::{EpochLoss, TrainingState, TrainingSummary};

/// Keeps every artifact in memory; useful for tests and embedding
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    /// `(epoch, records)` in the order they were written
    pub samples: Vec<(usize, Vec<FlowRecord>)>,
    /// `(epochs, batch_size, history)`
    pub loss_history: Option<(usize, usize, Vec<EpochLoss>)>,
    pub summary: Option<TrainingSummary>,
}

impl SampleSink for MemorySink {
    fn write_samples(&mut self, epoch: usize, records: &[FlowRecord]) -> Result<()> {
        self.samples.push((epoch, records.to_vec()));
        Ok(())
    }

    fn write_loss_history(&mut self, epochs: usize, batch_size: usize, state: &TrainingState) -> Result<()> {
        self.loss_history = Some((epochs, batch_size, state.history().to_vec()));
        Ok(())
    }

    fn write_summary(&mut self, summary: &TrainingSummary) -> Result<()> {
        self.summary = Some(summary.clone());
        Ok(())
    }
}
