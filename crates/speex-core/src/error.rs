//! Error handling for the Speex codec
//!
//! Encoding never fails on well-formed PCM of the right length, so most
//! variants describe configuration mistakes or structurally invalid
//! bitstreams handed to the decoder.

#![allow(missing_docs)]

use std::fmt;
use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Error type for codec operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Invalid codec configuration
    #[error("Invalid codec configuration: {details}")]
    InvalidConfig { details: String },

    /// Unknown mode identifier
    #[error("Invalid mode id: {mode} (supported: 0-2)")]
    InvalidMode { mode: i32 },

    /// Quality outside 0..=10
    #[error("Invalid quality: {quality} (range: 0-10)")]
    InvalidQuality { quality: i32 },

    /// Complexity outside 1..=10
    #[error("Invalid complexity: {complexity} (range: 1-10)")]
    InvalidComplexity { complexity: i32 },

    /// Input frame has the wrong number of samples
    #[error("Invalid frame size: expected {expected}, got {actual}")]
    InvalidFrameSize { expected: usize, actual: usize },

    /// Output buffer cannot hold a decoded frame
    #[error("Buffer too small: need {needed} samples, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Structurally invalid bitstream
    #[error("Corrupted stream: {reason}")]
    CorruptedStream { reason: String },

    /// Malformed stream header
    #[error("Invalid header: {details}")]
    InvalidHeader { details: String },
}

impl CodecError {
    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Create a new corrupted stream error
    pub fn corrupted(reason: impl Into<String>) -> Self {
        Self::CorruptedStream {
            reason: reason.into(),
        }
    }

    /// Create a new invalid header error
    pub fn invalid_header(details: impl Into<String>) -> Self {
        Self::InvalidHeader {
            details: details.into(),
        }
    }

    /// Check if this error is recoverable
    ///
    /// A corrupted packet only spoils that packet; the decoder keeps its
    /// state and can accept the next one.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidConfig { .. }
            | Self::InvalidMode { .. }
            | Self::InvalidQuality { .. }
            | Self::InvalidComplexity { .. }
            | Self::InvalidHeader { .. } => false,

            Self::InvalidFrameSize { .. }
            | Self::BufferTooSmall { .. }
            | Self::CorruptedStream { .. } => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfig { .. }
            | Self::InvalidMode { .. }
            | Self::InvalidQuality { .. }
            | Self::InvalidComplexity { .. } => ErrorCategory::Configuration,

            Self::InvalidFrameSize { .. } | Self::CorruptedStream { .. } => {
                ErrorCategory::Processing
            }

            Self::BufferTooSmall { .. } => ErrorCategory::Memory,

            Self::InvalidHeader { .. } => ErrorCategory::Format,
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration and parameter errors
    Configuration,
    /// Audio processing errors
    Processing,
    /// Buffer sizing errors
    Memory,
    /// Container/header format errors
    Format,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Processing => write!(f, "Processing"),
            Self::Memory => write!(f, "Memory"),
            Self::Format => write!(f, "Format"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CodecError::invalid_config("test message");
        assert!(matches!(err, CodecError::InvalidConfig { .. }));
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_error_recoverability() {
        assert!(CodecError::corrupted("bad submode").is_recoverable());
        assert!(!CodecError::InvalidMode { mode: 7 }.is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            CodecError::corrupted("x").category(),
            ErrorCategory::Processing
        );
        assert_eq!(
            CodecError::BufferTooSmall { needed: 160, actual: 80 }.category(),
            ErrorCategory::Memory
        );
        assert_eq!(
            CodecError::invalid_header("short").category(),
            ErrorCategory::Format
        );
    }

    #[test]
    fn test_error_display() {
        let err = CodecError::InvalidFrameSize {
            expected: 160,
            actual: 80,
        };
        let display = format!("{}", err);
        assert!(display.contains("expected 160"));
        assert!(display.contains("got 80"));
    }
}
