//! Input validation utilities for codec operations

use crate::error::{CodecError, HeaderError, Result};
use crate::types::{CompressionType, PCM_BIT_SIZE};

/// Validate channel count for a specific compression type
pub fn validate_channels(compression_type: CompressionType, channels: u8) -> Result<()> {
    let supported_channels = compression_type.supported_channels();

    if !supported_channels.contains(&channels) {
        return Err(CodecError::InvalidChannelCount {
            channels,
            supported: supported_channels.to_vec(),
        });
    }

    Ok(())
}

/// Validate the source bit size recorded in a stream header
pub fn validate_header_bit_size(bits: u32) -> std::result::Result<(), HeaderError> {
    if bits != PCM_BIT_SIZE {
        return Err(HeaderError::UnsupportedBitSize { bits });
    }

    Ok(())
}

/// Validate that an output buffer can hold `needed` elements
pub fn validate_output_capacity(needed: usize, actual: usize) -> Result<()> {
    if actual < needed {
        return Err(CodecError::BufferTooSmall { needed, actual });
    }

    Ok(())
}

/// Validate that an input length is a whole number of processing units
///
/// `unit` is the unit size in the same measure as `len` (bytes for payloads,
/// samples for PCM).
pub fn validate_whole_units(len: usize, unit: usize) -> Result<()> {
    if unit == 0 {
        return Err(CodecError::invalid_config("Processing unit size cannot be zero"));
    }

    let remaining = len % unit;
    if remaining != 0 {
        return Err(CodecError::InputTruncated {
            consumed: len / unit,
            remaining,
        });
    }

    Ok(())
}
