//! Error handling for the jitter buffer
//!
//! Packet loss and late arrival are not errors; they surface as
//! [`JitterOutput`](crate::JitterOutput) variants. Errors are reserved for
//! arguments and configurations the buffer cannot work with.

use std::fmt;
use thiserror::Error;

/// Result type alias for jitter buffer operations
pub type Result<T> = std::result::Result<T, JitterError>;

/// Error type for jitter buffer operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JitterError {
    /// A call argument outside its valid range
    #[error("Invalid argument {name}: {value}")]
    InvalidArgument {
        /// Argument name
        name: &'static str,
        /// Rejected value
        value: i64,
    },

    /// Inconsistent buffer configuration
    #[error("Invalid jitter buffer configuration: {details}")]
    InvalidConfig {
        /// What is wrong
        details: String,
    },
}

impl JitterError {
    /// Create a new invalid argument error
    pub fn invalid_argument(name: &'static str, value: impl Into<i64>) -> Self {
        Self::InvalidArgument {
            name,
            value: value.into(),
        }
    }

    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Check if this error is recoverable
    ///
    /// A rejected call leaves the buffer untouched, so the caller can retry
    /// with a valid argument. A bad configuration never produces a buffer.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidArgument { .. } => true,
            Self::InvalidConfig { .. } => false,
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } => ErrorCategory::Usage,
            Self::InvalidConfig { .. } => ErrorCategory::Configuration,
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration and parameter errors
    Configuration,
    /// Misuse of the buffer API
    Usage,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Usage => write!(f, "Usage"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = JitterError::invalid_argument("desired_span", 0);
        assert_eq!(
            err,
            JitterError::InvalidArgument {
                name: "desired_span",
                value: 0
            }
        );
        assert_eq!(err.category(), ErrorCategory::Usage);
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_config_error() {
        let err = JitterError::invalid_config("step size must be positive");
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(!err.is_recoverable());
        assert!(format!("{}", err).contains("step size"));
    }
}
