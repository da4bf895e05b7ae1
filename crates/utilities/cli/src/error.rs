//! Error types for CLI utilities.

use thiserror::Error;
use tracing_subscriber::{filter::FromEnvError, util::TryInitError};

/// Errors that can occur in CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// The `RUST_LOG` filter could not be parsed.
    #[error("Invalid log filter: {0}")]
    InvalidFilter(#[from] FromEnvError),

    /// The global tracing subscriber could not be installed.
    #[error("Failed to initialize tracing: {0}")]
    TracingInitialization(#[from] TryInitError),
}

/// Type alias for CLI results.
pub type CliResult<T> = Result<T, CliError>;
