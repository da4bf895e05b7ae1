//! Shared CLI utilities for facet binaries: logging flags and tracing subscriber setup.

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod error;
pub use error::{CliError, CliResult};

mod flags;
pub use flags::LogArgs;

mod log;
pub use log::{LogConfig, LogFormat, init_test_tracing};
