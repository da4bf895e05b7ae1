//! [`tracing_subscriber`] setup.

use crate::{CliResult, LogArgs};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// The format of the logs.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
#[clap(rename_all = "lowercase")]
pub enum LogFormat {
    /// Full format (default).
    #[default]
    Full,
    /// JSON format.
    Json,
    /// Pretty format.
    Pretty,
    /// Compact format.
    Compact,
}

/// Logging configuration.
///
/// Logs are written to stderr. Stdout is left to the binary's own output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    /// Level used when `RUST_LOG` does not say otherwise.
    pub global_level: LevelFilter,
    /// Output format, [None] to disable logging.
    pub format: Option<LogFormat>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { global_level: LevelFilter::WARN, format: Some(LogFormat::Full) }
    }
}

impl From<LogArgs> for LogConfig {
    fn from(args: LogArgs) -> Self {
        Self::new(&args)
    }
}

impl LogConfig {
    /// Creates a new [`LogConfig`] from [`LogArgs`].
    pub const fn new(args: &LogArgs) -> Self {
        let global_level = match args.level {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        let format = if args.quiet { None } else { Some(args.format) };
        Self { global_level, format }
    }

    /// Builds the [`EnvFilter`] for this config.
    ///
    /// Directives in `RUST_LOG` take precedence over the global level.
    pub fn env_filter(&self) -> CliResult<EnvFilter> {
        Ok(EnvFilter::builder().with_default_directive(self.global_level.into()).from_env()?)
    }

    /// Installs the global tracing subscriber.
    ///
    /// Uses `env_filter` if given, otherwise [`Self::env_filter`].
    pub fn init_tracing_subscriber(&self, env_filter: Option<EnvFilter>) -> CliResult<()> {
        let env_filter = match env_filter {
            Some(filter) => filter,
            None => self.env_filter()?,
        };

        let layer = self.format.map(|format| {
            let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            match format {
                LogFormat::Full => layer.boxed(),
                LogFormat::Json => layer.json().boxed(),
                LogFormat::Pretty => layer.pretty().boxed(),
                LogFormat::Compact => layer.compact().boxed(),
            }
        });

        tracing_subscriber::registry().with(env_filter).with(layer).try_init()?;
        Ok(())
    }
}

/// Installs a debug-level subscriber, ignoring failures.
///
/// Meant for tests, where several may race to install one.
pub fn init_test_tracing() {
    let _ = LogConfig::default().init_tracing_subscriber(Some(EnvFilter::new("debug")));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::warn(0, LevelFilter::WARN)]
    #[case::info(1, LevelFilter::INFO)]
    #[case::debug(2, LevelFilter::DEBUG)]
    #[case::trace(3, LevelFilter::TRACE)]
    #[case::saturates(9, LevelFilter::TRACE)]
    fn test_log_config_level(#[case] level: u8, #[case] expected: LevelFilter) {
        let config = LogConfig::new(&LogArgs { level, ..Default::default() });
        assert_eq!(config.global_level, expected);
    }

    #[test]
    fn test_log_config_quiet_disables_output() {
        let config = LogConfig::from(LogArgs { quiet: true, ..Default::default() });
        assert_eq!(config.format, None);
    }

    #[test]
    fn test_log_config_keeps_format() {
        let config = LogConfig::from(LogArgs { format: LogFormat::Json, ..Default::default() });
        assert_eq!(config.format, Some(LogFormat::Json));
    }

    #[test]
    fn test_init_test_tracing_is_idempotent() {
        init_test_tracing();
        init_test_tracing();
        tracing::debug!(target: "cli", "tracing initialized");
    }
}
