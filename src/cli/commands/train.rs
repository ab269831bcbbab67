//! Train command implementation

use tracing::info;

use super::load_dataset;
use crate::cli::LogLevel;
use crate::config::{apply_overrides, load_config, validate_config, TrainArgs};
use crate::error::{Error, Result};
use crate::export::CsvSampleSink;
use crate::gan::WganTrainer;

pub fn run_train(args: TrainArgs, level: LogLevel) -> Result<()> {
    info!(config = %args.config.display(), "flowgan: training");

    let mut spec = load_config(&args.config)?;
    apply_overrides(&mut spec, &args);
    validate_config(&spec).map_err(|e| Error::Configuration(format!("Invalid override: {e}")))?;

    let (table, codec) = load_dataset(&spec)?;
    let data = codec.encode_table(&table)?;
    info!(rows = data.nrows(), width = codec.width(), "dataset encoded");

    if args.dry_run {
        info!("dry run: config and dataset are valid, skipping training");
        return Ok(());
    }

    let mut trainer = WganTrainer::new(spec.wgan_config(), codec, data)?;
    let mut sink = CsvSampleSink::create(&spec.output.dir)?;
    let state = trainer.train(&mut sink)?;

    if level != LogLevel::Quiet {
        println!(
            "Training complete: {} epochs, {} checkpoints written to {}",
            state.history().len(),
            state.checkpoints().len(),
            sink.dir().display()
        );
    }
    Ok(())
}
