//! Environment configuration for the cart binary.

use std::time::Duration;

use crate::error::AppError;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Human-readable, multi-field lines.
    Pretty,
}

/// Settings read once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Output format for the tracing subscriber.
    pub log_format: LogFormat,
    /// Simulated latency of the asynchronous search indexer.
    pub search_index_delay: Duration,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Json,
            search_index_delay: Duration::from_millis(250),
        }
    }
}

impl CartConfig {
    /// Reads `LOG_FORMAT` and `SEARCH_INDEX_DELAY_MS` from the environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Unset keys fall
    /// back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a value cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "LOG_FORMAT must be `json` or `pretty`, got `{other}`"
                )));
            }
        };

        let search_index_delay = match lookup("SEARCH_INDEX_DELAY_MS") {
            None => defaults.search_index_delay,
            Some(raw) => raw.parse().map(Duration::from_millis).map_err(|e| {
                AppError::Config(format!("SEARCH_INDEX_DELAY_MS must be a valid u64: {e}"))
            })?,
        };

        Ok(Self {
            log_format,
            search_index_delay,
        })
    }
}
