//! Error types.

/// A precondition on a distribution parameter was violated.
///
/// Raised before any output is built; there are no partial results.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid parameter `{name}` = {value}: {constraint}")]
pub struct InvalidParameter {
    /// Name of the offending parameter.
    pub name: &'static str,
    /// The rejected value, widened to `f64`.
    pub value: f64,
    /// Human-readable form of the violated constraint.
    pub constraint: &'static str,
}

impl InvalidParameter {
    pub fn new(name: &'static str, value: f64, constraint: &'static str) -> Self {
        Self {
            name,
            value,
            constraint,
        }
    }
}

/// Errors that can occur when loading, saving, or checking an axis config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),

    /// The config parsed but holds out-of-range parameters.
    #[error(transparent)]
    Invalid(#[from] InvalidParameter),
}
