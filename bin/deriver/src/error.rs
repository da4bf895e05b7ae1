//! Error types for the deriver binary.

use facet_derive::IntegrityError;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors that can occur in the deriver binary.
#[derive(Error, Debug)]
pub(crate) enum DeriverError {
    /// CLI error from facet-cli utilities.
    #[error(transparent)]
    Cli(#[from] facet_cli::CliError),

    /// An input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// An input file is not valid JSON of the expected shape.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },

    /// An input file holds a JSON-RPC error response.
    #[error("{} holds an RPC error ({code}): {message}", path.display())]
    Rpc {
        /// The file.
        path: PathBuf,
        /// The JSON-RPC error code.
        code: i64,
        /// The JSON-RPC error message.
        message: String,
    },

    /// An input file holds a JSON-RPC response with a null result.
    #[error("{} holds an empty RPC result", .0.display())]
    EmptyResult(PathBuf),

    /// The block and receipts are inconsistent.
    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    /// A derived transaction could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("Failed to write output: {0}")]
    Write(#[from] io::Error),
}

/// Type alias for deriver results.
pub(crate) type DeriverResult<T> = Result<T, DeriverError>;
