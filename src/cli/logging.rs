//! Logging setup for the CLI

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Errors only
    Quiet,
    /// `RUST_LOG`, or info when unset
    Normal,
    /// Debug output including per-epoch losses
    Verbose,
}

impl LogLevel {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            LogLevel::Quiet
        } else if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }

    fn filter(self) -> EnvFilter {
        match self {
            LogLevel::Quiet => EnvFilter::new("error"),
            LogLevel::Verbose => EnvFilter::new("flowgan=debug,info"),
            LogLevel::Normal => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        }
    }
}

/// Install the global subscriber; later calls are ignored
pub fn init(level: LogLevel) {
    // try_init fails only if a subscriber is already set
    let _ = tracing_subscriber::registry()
        .with(level.filter())
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}
