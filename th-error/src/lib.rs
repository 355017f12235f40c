//! Unified error handling for the thermometer reader
//!
//! A single error type shared by the library and the `temperature` binary.
//! Device-level failures (missing sensor, malformed payload) are retryable;
//! everything else is terminal.

use std::io;
use std::path::PathBuf;

/// Result type alias using ThermometerError
pub type Result<T> = std::result::Result<T, ThermometerError>;

/// Unified error type for all thermometer operations
#[derive(thiserror::Error, Debug)]
pub enum ThermometerError {
    // ============================================================================
    // Device Errors (retryable)
    // ============================================================================
    #[error("No one-wire temperature sensor found in {}", folder.display())]
    DeviceNotFound {
        folder: PathBuf,
    },

    #[error("Unexpected device data: {reason}\n\n{payload}")]
    UnexpectedDeviceData {
        reason: String,
        payload: String,
    },

    // ============================================================================
    // Consistency Errors
    // ============================================================================
    #[error("Inconsistent temperature after {attempts} attempt(s): {detail}")]
    InconsistentTemperature {
        attempts: u64,
        detail: String,
    },

    // ============================================================================
    // Argument and Configuration Errors
    // ============================================================================
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to write file {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        source: io::Error,
    },
}

impl ThermometerError {
    /// Create an unexpected-device-data error carrying the offending payload
    pub fn unexpected_data(reason: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::UnexpectedDeviceData {
            reason: reason.into(),
            payload: payload.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Whether a read loop may retry after this error.
    ///
    /// Only the two device-level failures qualify.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::DeviceNotFound { .. } | Self::UnexpectedDeviceData { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_kinds() {
        assert!(ThermometerError::DeviceNotFound { folder: PathBuf::from("/x") }.is_retryable());
        assert!(ThermometerError::unexpected_data("bad", "").is_retryable());
        assert!(!ThermometerError::invalid_argument("unit").is_retryable());
        assert!(!ThermometerError::InconsistentTemperature { attempts: 1, detail: String::new() }
            .is_retryable());
        assert!(!ThermometerError::Io(io::Error::new(io::ErrorKind::NotFound, "gone")).is_retryable());
    }

    #[test]
    fn test_unexpected_data_message_includes_payload() {
        let err = ThermometerError::unexpected_data("Expected 2 lines", "abc : crc=00 NO");
        let msg = err.to_string();
        assert!(msg.contains("Expected 2 lines"));
        assert!(msg.contains("crc=00 NO"));
    }
}
