//! Directory of CSV and JSON files
//!
//! Layout of an output directory after a run:
//!
//! ```text
//! flows/
//! ├── flow_0.csv          one file per checkpoint
//! ├── flow_100.csv
//! ├── loss_301_32.csv     epoch,d_loss,g_loss
//! └── summary.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::debug;

use super::SampleSink;
use crate::dataset::{FlowField, FlowRecord};
use crate::error::{Error, Result};
use crate::gan::{TrainingState, TrainingSummary};

/// Writes checkpoint samples, loss history and the run summary to a directory
#[derive(Debug, Clone)]
pub struct CsvSampleSink {
    dir: PathBuf,
}

impl CsvSampleSink {
    /// Use `dir` as the output directory, creating it if needed
    pub fn create<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| Error::io(format!("creating {}", dir.display()), e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn samples_path(&self, epoch: usize) -> PathBuf {
        self.dir.join(format!("flow_{epoch}.csv"))
    }

    pub fn loss_history_path(&self, epochs: usize, batch_size: usize) -> PathBuf {
        self.dir.join(format!("loss_{epochs}_{batch_size}.csv"))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.dir.join("summary.json")
    }
}

/// One exported row: index column, then the flow fields
fn sample_row(index: usize, record: &FlowRecord) -> [String; 8] {
    [
        index.to_string(),
        record.src_addr.clone(),
        record.dst_addr.clone(),
        format!("{}", record.sport.trunc() as i64),
        record.dport.clone(),
        record.proto.clone(),
        record.rate.to_string(),
        record.load.to_string(),
    ]
}

impl SampleSink for CsvSampleSink {
    fn write_samples(&mut self, epoch: usize, records: &[FlowRecord]) -> Result<()> {
        let path = self.samples_path(epoch);
        let mut writer = Writer::from_path(&path).map_err(|e| Error::csv(&path, e))?;

        let mut header = vec![""];
        header.extend(FlowField::ALL.iter().map(|f| f.column()));
        writer.write_record(&header).map_err(|e| Error::csv(&path, e))?;
        for (i, record) in records.iter().enumerate() {
            writer.write_record(sample_row(i, record)).map_err(|e| Error::csv(&path, e))?;
        }
        writer.flush().map_err(|e| Error::io(format!("flushing {}", path.display()), e))?;

        debug!(path = %path.display(), records = records.len(), "wrote samples");
        Ok(())
    }

    fn write_loss_history(&mut self, epochs: usize, batch_size: usize, state: &TrainingState) -> Result<()> {
        let path = self.loss_history_path(epochs, batch_size);
        let mut writer = Writer::from_path(&path).map_err(|e| Error::csv(&path, e))?;
        writer.write_record(["epoch", "d_loss", "g_loss"]).map_err(|e| Error::csv(&path, e))?;
        for loss in state.history() {
            writer
                .write_record([loss.epoch.to_string(), loss.critic.to_string(), loss.generator.to_string()])
                .map_err(|e| Error::csv(&path, e))?;
        }
        writer.flush().map_err(|e| Error::io(format!("flushing {}", path.display()), e))?;
        Ok(())
    }

    fn write_summary(&mut self, summary: &TrainingSummary) -> Result<()> {
        let path = self.summary_path();
        let json = serde_json::to_string_pretty(summary)?;
        fs::write(&path, json).map_err(|e| Error::io(format!("writing {}", path.display()), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::FlowTable;
    use crate::gan::EpochLoss;

    fn record() -> FlowRecord {
        FlowRecord {
            src_addr: "10.0.0.1".into(),
            dst_addr: "10.0.0.2".into(),
            sport: 50123.6,
            dport: "443".into(),
            proto: "tcp".into(),
            rate: 1.5,
            load: 900.25,
        }
    }

    #[test]
    fn test_samples_file_reloads_as_flow_table() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut sink = CsvSampleSink::create(dir.path().join("flows")).expect("sink");
        sink.write_samples(100, &[record(), record()]).expect("write");

        let path = sink.samples_path(100);
        assert!(path.ends_with("flow_100.csv"));
        let table = FlowTable::from_csv(&path).expect("reload");
        assert_eq!(table.len(), 2);
        let records = table.records().expect("parse");
        assert_eq!(records[0].sport, 50123.0);
        assert_eq!(records[1].dport, "443");
        assert_eq!(records[0].load, 900.25);
    }

    #[test]
    fn test_sport_truncates_toward_zero() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut sink = CsvSampleSink::create(dir.path()).expect("sink");
        let negative = FlowRecord { sport: -3.7, ..record() };
        let high = FlowRecord { sport: 1027.99, ..record() };
        sink.write_samples(0, &[negative, high]).expect("write");

        let contents = fs::read_to_string(sink.samples_path(0)).expect("read samples");
        let sports: Vec<&str> = contents.lines().skip(1).map(|l| l.split(',').nth(3).expect("sport cell")).collect();
        assert_eq!(sports, vec!["-3", "1027"]);
    }

    #[test]
    fn test_loss_history_and_summary_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut sink = CsvSampleSink::create(dir.path()).expect("sink");

        let mut state = TrainingState::new();
        state.record_epoch(EpochLoss { epoch: 0, critic: 1.5, generator: -0.25 });
        state.record_epoch(EpochLoss { epoch: 1, critic: 1.25, generator: -0.5 });
        sink.write_loss_history(2, 32, &state).expect("write history");

        let contents = fs::read_to_string(sink.loss_history_path(2, 32)).expect("read history");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["epoch,d_loss,g_loss", "0,1.5,-0.25", "1,1.25,-0.5"]);

        let summary = TrainingSummary {
            epochs: 2,
            batch_size: 32,
            n_critic: 1,
            latent_dim: 100,
            encoded_width: 12,
            critic_updates: 2,
            generator_updates: 2,
            checkpoints: vec![0],
            final_critic_loss: Some(1.25),
            final_generator_loss: Some(-0.5),
            seed: Some(7),
        };
        sink.write_summary(&summary).expect("write summary");
        let json = fs::read_to_string(sink.summary_path()).expect("read summary");
        let parsed: TrainingSummary = serde_json::from_str(&json).expect("valid json");
        assert_eq!(parsed, summary);
    }

    #[test]
    fn test_unwritable_directory_is_io_error() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let err = CsvSampleSink::create(file.path().join("nested")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
