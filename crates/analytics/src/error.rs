use configuration::error::ConfigError;
use thiserror::Error;

/// Errors raised while setting up a calculation. The metrics themselves
/// never fail; they fall back to zero defaults instead.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid calculator settings: {0}")]
    InvalidSettings(#[from] ConfigError),
}
