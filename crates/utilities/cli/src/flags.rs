//! Logging flags shared by facet binaries.

use crate::LogFormat;
use clap::{ArgAction, Parser};

/// Logging arguments.
#[derive(Parser, Default, Clone, Debug, PartialEq, Eq)]
pub struct LogArgs {
    /// Increase logging verbosity (0=WARN, 1=INFO, 2=DEBUG, 3=TRACE).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub level: u8,

    /// Suppress log output.
    #[arg(long = "log.quiet", short = 'q', env = "FACET_LOG_QUIET")]
    pub quiet: bool,

    /// Log format.
    #[arg(long = "log.format", default_value = "full", env = "FACET_LOG_FORMAT")]
    pub format: LogFormat,
}
