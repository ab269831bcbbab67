//! CLI command implementations

mod info;
mod train;
mod validate;


use crate::cli::logging::{self, LogLevel};
use crate::codec::FlowCodec;
use crate::config::{validate_paths, Cli, Command, TrainSpec};
use crate::dataset::FlowTable;
use crate::error::{Error, Result};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<()> {
    let level = LogLevel::from_flags(cli.quiet, cli.verbose);
    logging::init(level);

    match cli.command {
        Command::Train(args) => train::run_train(args, level),
        Command::Validate(args) => validate::run_validate(args, level),
        Command::Info(args) => info::run_info(args),
    }
}

/// Load the training table named in the manifest and fit a codec on it
fn load_dataset(spec: &TrainSpec) -> Result<(FlowTable, FlowCodec)> {
    validate_paths(spec).map_err(|e| Error::Configuration(e.to_string()))?;
    let table = FlowTable::from_csv(&spec.data.train)?;
    let codec = FlowCodec::fit(&table)?;
    Ok((table, codec))
}
