//! Core types and traits for the codec library
//!
//! This module defines the fundamental types and traits that form the
//! foundation of the codec library's API.

use crate::container::StreamHeader;
use crate::error::{CodecError, HeaderError, Result};
use std::fmt;

/// Bit depth of the only PCM format the codec accepts
pub const PCM_BIT_SIZE: u32 = 16;

/// Largest channel count a session will interleave
pub const MAX_CHANNELS: u8 = 8;

/// Primary trait for audio codecs
///
/// This trait defines the core operations that all audio codecs must implement:
/// encoding, decoding, and state management.
pub trait AudioCodec: Send + Sync {
    /// Encode interleaved audio samples to compressed data
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or input is invalid
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>>;

    /// Decode compressed data to interleaved audio samples
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails or data is invalid
    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>>;

    /// Get codec information
    fn info(&self) -> CodecInfo;

    /// Reset codec state
    ///
    /// This clears all internal state and prepares the codec for a new,
    /// independent stream.
    fn reset(&mut self) -> Result<()>;

    /// Smallest number of interleaved samples the codec processes at once
    fn frame_size(&self) -> usize;

    /// Check if the codec supports variable frame sizes
    fn supports_variable_frame_size(&self) -> bool {
        false
    }
}

/// Audio codec information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecInfo {
    /// Codec name
    pub name: &'static str,
    /// Number of channels
    pub channels: u8,
    /// Bits per source sample
    pub bit_size: u32,
    /// Compressed bits per sample
    pub bits_per_encoded_sample: u32,
    /// Frame size in samples
    pub frame_size: usize,
}

/// Compression types that can appear in a stream header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum CompressionType {
    /// 4-bit table-driven ADPCM
    Adpcm = 1,
}

impl CompressionType {
    /// Get the codec name
    pub fn name(self) -> &'static str {
        match self {
            Self::Adpcm => "ADPCM",
        }
    }

    /// Value stored in the header's compression type field
    pub fn to_u32(self) -> u32 {
        self as u32
    }

    /// Parse the header's compression type field
    pub fn from_u32(value: u32) -> std::result::Result<Self, HeaderError> {
        match value {
            1 => Ok(Self::Adpcm),
            value => Err(HeaderError::UnsupportedCompression { value }),
        }
    }

    /// Get supported channel counts
    pub fn supported_channels(self) -> &'static [u8] {
        match self {
            Self::Adpcm => &[1, 2, 3, 4, 5, 6, 7, 8],
        }
    }
}

impl fmt::Display for CompressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Codec configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Compression type
    pub compression_type: CompressionType,
    /// Number of interleaved channels
    pub channels: u8,
    /// Bits per source sample
    pub bit_size: u32,
}

impl CodecConfig {
    /// Create a new codec configuration
    pub fn new(compression_type: CompressionType) -> Self {
        Self {
            compression_type,
            channels: 1,
            bit_size: PCM_BIT_SIZE,
        }
    }

    /// Mono ADPCM configuration
    pub fn mono() -> Self {
        Self::new(CompressionType::Adpcm)
    }

    /// Stereo ADPCM configuration
    pub fn stereo() -> Self {
        Self::new(CompressionType::Adpcm).with_channels(2)
    }

    /// Derive a configuration from a parsed stream header
    ///
    /// The header does not record the channel layout, so the caller supplies it.
    pub fn from_header(header: &StreamHeader, channels: u8) -> Self {
        Self {
            compression_type: header.compression_type,
            channels,
            bit_size: header.source_bit_size,
        }
    }

    /// Set channel count
    pub fn with_channels(mut self, channels: u8) -> Self {
        self.channels = channels;
        self
    }

    /// Set source bit size
    pub fn with_bit_size(mut self, bit_size: u32) -> Self {
        self.bit_size = bit_size;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_channels(self.compression_type, self.channels)?;

        if self.bit_size != PCM_BIT_SIZE {
            return Err(CodecError::InvalidBitSize {
                bits: self.bit_size,
            });
        }

        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::mono()
    }
}
