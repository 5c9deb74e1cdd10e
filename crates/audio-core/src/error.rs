//! Error handling for the audio processing layer
//!
//! Errors are returned from configuration and preparation only. Once a
//! processor is prepared, `process_block` saturates, clamps or passes audio
//! through instead of failing.

#![allow(missing_docs)]

use rstelecom_codec_core::CodecError;
use std::fmt;
use thiserror::Error;

/// Result type alias for audio operations
pub type AudioResult<T> = std::result::Result<T, AudioError>;

/// Error type for audio operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioError {
    /// Engine or processor configuration is invalid
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Stream specification handed to `prepare` is unusable
    #[error("Invalid process spec: {reason}")]
    InvalidProcessSpec { reason: String },

    /// Filter coefficients could not be designed
    #[error("Filter design failed: {reason}")]
    FilterDesignFailed { reason: String },

    /// Audio buffer shape is inconsistent
    #[error("Invalid buffer: {reason}")]
    InvalidBuffer { reason: String },

    /// Buffer carries a different channel count than was prepared
    #[error("Channel count mismatch: prepared {prepared}, got {actual}")]
    ChannelMismatch { prepared: usize, actual: usize },

    /// Error raised by the codec layer
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

impl AudioError {
    /// Create a new invalid configuration error
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Create a new invalid process spec error
    pub fn invalid_process_spec(reason: impl Into<String>) -> Self {
        Self::InvalidProcessSpec {
            reason: reason.into(),
        }
    }

    /// Create a new filter design error
    pub fn filter_design_failed(reason: impl Into<String>) -> Self {
        Self::FilterDesignFailed {
            reason: reason.into(),
        }
    }

    /// Create a new invalid buffer error
    pub fn invalid_buffer(reason: impl Into<String>) -> Self {
        Self::InvalidBuffer {
            reason: reason.into(),
        }
    }

    /// Check if this error is recoverable
    ///
    /// Recoverable errors leave the processor in its previous prepared state,
    /// so the caller can keep streaming with the old settings.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidConfiguration { .. } | Self::InvalidProcessSpec { .. } => false,
            Self::FilterDesignFailed { .. }
            | Self::InvalidBuffer { .. }
            | Self::ChannelMismatch { .. } => true,
            Self::Codec(err) => err.is_recoverable(),
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfiguration { .. } | Self::InvalidProcessSpec { .. } => {
                ErrorCategory::Configuration
            }
            Self::FilterDesignFailed { .. } => ErrorCategory::Filter,
            Self::InvalidBuffer { .. } | Self::ChannelMismatch { .. } => ErrorCategory::Buffer,
            Self::Codec(_) => ErrorCategory::Codec,
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration and stream setup errors
    Configuration,
    /// Filter design errors
    Filter,
    /// Buffer shape errors
    Buffer,
    /// Errors passed up from the codec layer
    Codec,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Filter => write!(f, "Filter"),
            Self::Buffer => write!(f, "Buffer"),
            Self::Codec => write!(f, "Codec"),
        }
    }
}

impl From<biquad::Errors> for AudioError {
    fn from(error: biquad::Errors) -> Self {
        Self::FilterDesignFailed {
            reason: format!("{:?}", error),
        }
    }
}
