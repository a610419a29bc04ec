//! Error handling for the codec library
//!
//! This module defines the error types that can occur while parsing stream
//! headers and while encoding or decoding ADPCM payloads.

#![allow(missing_docs)]

use std::fmt;
use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Container header validation failures
///
/// These are fatal to the stream whose header failed, and are always reported
/// before any payload byte is decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// The 16-byte type tag does not match the expected identifier
    #[error("Bad stream type tag: {}", String::from_utf8_lossy(found).trim_end_matches('\0'))]
    BadTag { found: [u8; 16] },

    /// Header or payload length is inconsistent
    #[error("Bad stream size: {details}")]
    BadSize { details: String },

    /// Compression type is not one this library understands
    #[error("Unsupported compression type: {value}")]
    UnsupportedCompression { value: u32 },

    /// Source samples were not 16-bit
    #[error("Unsupported source bit size: {bits} (only 16-bit PCM is supported)")]
    UnsupportedBitSize { bits: u32 },
}

impl HeaderError {
    /// Create a new bad size error
    pub fn bad_size(details: impl Into<String>) -> Self {
        Self::BadSize {
            details: details.into(),
        }
    }
}

/// Error type for codec operations
#[derive(Error, Debug)]
pub enum CodecError {
    /// Stream header failed validation
    #[error("Invalid stream header: {0}")]
    Header(#[from] HeaderError),

    /// Invalid codec configuration
    #[error("Invalid codec configuration: {details}")]
    InvalidConfig { details: String },

    /// Invalid channel count
    #[error("Invalid channel count: {channels} (supported: {supported:?})")]
    InvalidChannelCount { channels: u8, supported: Vec<u8> },

    /// Invalid sample bit size
    #[error("Invalid bit size: {bits} (only 16-bit PCM is supported)")]
    InvalidBitSize { bits: u32 },

    /// Input ended inside a nibble pair or channel rotation
    #[error("Input truncated: {consumed} whole units, {remaining} trailing items left over")]
    InputTruncated { consumed: usize, remaining: usize },

    /// Buffer too small for operation
    #[error("Buffer too small: need {needed}, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Invalid payload data
    #[error("Invalid payload data: {details}")]
    InvalidPayload { details: String },

    /// I/O operation failed
    #[error("I/O operation failed: {reason}")]
    IoError { reason: String },
}

impl CodecError {
    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Create a new invalid payload error
    pub fn invalid_payload(details: impl Into<String>) -> Self {
        Self::InvalidPayload {
            details: details.into(),
        }
    }

    /// Check if this error is recoverable
    ///
    /// Recoverable errors leave the session usable: the caller can supply
    /// more input or a larger buffer and call again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Header(_)
            | Self::InvalidConfig { .. }
            | Self::InvalidChannelCount { .. }
            | Self::InvalidBitSize { .. } => false,

            Self::InputTruncated { .. }
            | Self::BufferTooSmall { .. }
            | Self::InvalidPayload { .. }
            | Self::IoError { .. } => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Header(_) => ErrorCategory::Format,

            Self::InvalidConfig { .. }
            | Self::InvalidChannelCount { .. }
            | Self::InvalidBitSize { .. } => ErrorCategory::Configuration,

            Self::InputTruncated { .. } | Self::InvalidPayload { .. } => ErrorCategory::Processing,

            Self::BufferTooSmall { .. } => ErrorCategory::Memory,

            Self::IoError { .. } => ErrorCategory::Io,
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Container format errors
    Format,
    /// Configuration and parameter errors
    Configuration,
    /// Audio processing errors
    Processing,
    /// Memory management errors
    Memory,
    /// I/O related errors
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format => write!(f, "Format"),
            Self::Configuration => write!(f, "Configuration"),
            Self::Processing => write!(f, "Processing"),
            Self::Memory => write!(f, "Memory"),
            Self::Io => write!(f, "I/O"),
        }
    }
}

/// Convert from I/O errors
impl From<std::io::Error> for CodecError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError {
            reason: error.to_string(),
        }
    }
}
