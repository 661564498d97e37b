use thiserror::Error;

/// Failures while reading or checking `KpiSettings`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from file: {0}")]
    LoadError(#[from] config::ConfigError),

    /// A zero-length window, a rate outside `(0, 1]`, non-positive hours per
    /// asset, or an inverted OEE change range.
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}
