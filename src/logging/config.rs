use super::format::LoggingFormat;
use crate::defaults::LOG_LEVEL_ENV_VAR;
use serde::Deserialize;
use std::fmt::Debug;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::PrettyFields;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

/// An enum representing possible errors during the logging initialization.
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("init logging error: `{0}`")]
    TryInitError(String),
}

/// Logging configuration, read from the optional `log` section of a descriptor.
///
/// ```yaml
/// log:
///   level: debug
///   format:
///     target: true
///     timestamp: "%H:%M:%S"
/// ```
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default)]
    pub(crate) format: LoggingFormat,
    #[serde(default)]
    pub(crate) level: LogLevel,
}

impl LoggingConfig {
    /// Attempts to initialize the global logging subscriber with the inner configuration.
    ///
    /// Events are written to stderr, stdout is left to the command output.
    pub fn try_init(&self) -> Result<(), LoggingError> {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(self.format.target)
            .with_timer(ChronoLocal::new(self.format.timestamp.0.clone()))
            .fmt_fields(PrettyFields::new())
            .with_env_filter(self.logging_filter())
            .try_init()
            .map_err(|_| {
                LoggingError::TryInitError("unable to set global logging subscriber".to_string())
            })?;

        debug!("Logging initialized successfully");
        Ok(())
    }

    fn logging_filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(self.crate_directive())
            .with_env_var(LOG_LEVEL_ENV_VAR)
            .from_env_lossy()
    }

    fn crate_directive(&self) -> Directive {
        let level = self.level.as_level().to_string().to_lowercase();
        // a level parsed by serde always yields a valid directive
        format!("{}={}", env!("CARGO_CRATE_NAME"), level)
            .parse::<Directive>()
            .unwrap_or_else(|_| LevelFilter::from_level(self.level.as_level()).into())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub(crate) struct LogLevel(Level);

impl LogLevel {
    fn as_level(&self) -> Level {
        self.0
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self(Level::INFO)
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value_str = String::deserialize(deserializer)?;
        Level::from_str(&value_str)
            .map(LogLevel)
            .map_err(serde::de::Error::custom)
    }
}
