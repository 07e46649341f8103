//! Custom error types
//!
//! The rendering pipeline itself never fails on malformed judge output; these
//! errors only surface at the edges: filter lookup, filter arguments,
//! configuration and CLI input.

use crate::config::ConfigError;

/// Error type shared by the filter registry, configuration and CLI
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    // Registry errors
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error("Invalid argument for {filter}: {message}")]
    InvalidArgument { filter: String, message: String },

    // Decoding errors
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Internal errors
    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl RenderError {
    /// Shorthand for an argument error raised by a named filter
    pub fn invalid_argument(filter: &str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            filter: filter.to_string(),
            message: message.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownFilter(_) => "UNKNOWN_FILTER",
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<base64::DecodeError> for RenderError {
    fn from(err: base64::DecodeError) -> Self {
        RenderError::Decode(err.to_string())
    }
}

/// Result type alias using RenderError
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            RenderError::UnknownFilter("nope".into()).error_code(),
            "UNKNOWN_FILTER"
        );
        assert_eq!(
            RenderError::invalid_argument("printSize", "expected a number").error_code(),
            "INVALID_ARGUMENT"
        );
    }

    #[test]
    fn test_invalid_argument_message() {
        let err = RenderError::invalid_argument("printSize", "expected a number");
        assert_eq!(
            err.to_string(),
            "Invalid argument for printSize: expected a number"
        );
    }
}
