//! Error types for sortviz.
//!
//! All fallible library operations return `Result<T, VizError>` instead of
//! panicking. The two run-control conditions are recoverable: the session is
//! always left in a consistent state after either is returned.

use thiserror::Error;

/// Result type alias for sortviz operations.
pub type VizResult<T> = Result<T, VizError>;

/// Unified error type for all sortviz operations.
#[derive(Debug, Error)]
pub enum VizError {
    // ===== Run Control =====
    /// A run or regeneration was requested while an algorithm is running.
    #[error("an algorithm is already running")]
    AlreadyRunning,

    /// A run was driven after the session had already returned to Idle.
    #[error("no algorithm is running")]
    NotRunning,

    /// The trigger name does not match any algorithm.
    #[error("unknown algorithm '{name}' (expected one of: {expected})")]
    UnknownAlgorithm {
        /// The name that was requested.
        name: String,
        /// Comma-separated list of accepted names.
        expected: String,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl VizError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an unknown-algorithm error listing the accepted names.
    #[must_use]
    pub fn unknown_algorithm(name: impl Into<String>) -> Self {
        let expected = crate::algorithms::Algorithm::ALL
            .iter()
            .map(|a| a.name())
            .collect::<Vec<_>>()
            .join(", ");
        Self::UnknownAlgorithm {
            name: name.into(),
            expected,
        }
    }

    /// Check if this error is a run-control condition the caller can simply
    /// ignore and retry later.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::AlreadyRunning | Self::UnknownAlgorithm { .. })
    }
}

impl From<serde_json::Error> for VizError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_control_errors_are_recoverable() {
        assert!(VizError::AlreadyRunning.is_recoverable());
        assert!(VizError::unknown_algorithm("Bogo").is_recoverable());
        assert!(!VizError::config("bad").is_recoverable());
        assert!(!VizError::serialization("bad").is_recoverable());
        assert!(!VizError::NotRunning.is_recoverable());
    }

    #[test]
    fn test_unknown_algorithm_lists_names() {
        let msg = VizError::unknown_algorithm("Bogo").to_string();
        assert!(msg.contains("Bogo"));
        assert!(msg.contains("Bubble"));
        assert!(msg.contains("Binary"));
    }

    #[test]
    fn test_error_config() {
        let err = VizError::config("invalid parameter");
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("invalid parameter"));
    }

    #[test]
    fn test_error_already_running_display() {
        assert_eq!(
            VizError::AlreadyRunning.to_string(),
            "an algorithm is already running"
        );
    }

    #[test]
    fn test_error_not_running_is_not_a_config_error() {
        let err = VizError::NotRunning;
        assert_eq!(err.to_string(), "no algorithm is running");
        assert!(!matches!(err, VizError::Config { .. }));
    }

    #[test]
    fn test_error_from_io() {
        let err: VizError = std::io::Error::other("disk gone").into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: VizError = json_err.into();
        assert!(matches!(err, VizError::Serialization(_)));
    }
}
