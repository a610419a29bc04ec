//! Stream container format
//!
//! A compressed stream is a fixed 32-byte header followed immediately by the
//! ADPCM payload:
//!
//! | Offset | Size | Field              | Notes                      |
//! |--------|------|--------------------|----------------------------|
//! | 0      | 4    | compression type   | little-endian, 1 = ADPCM   |
//! | 4      | 4    | compressed size    | little-endian, payload len |
//! | 8      | 4    | uncompressed size  | little-endian, PCM bytes   |
//! | 12     | 4    | source bit size    | little-endian, always 16   |
//! | 16     | 16   | type tag           | ASCII, zero-padded         |
//!
//! The channel layout is not recorded; readers must know it out of band.

use bytes::{Buf, BufMut};
use tracing::{debug, warn};

use crate::codecs::adpcm::CompressionSession;
use crate::error::{CodecError, HeaderError, Result};
use crate::types::{CodecConfig, CompressionType, PCM_BIT_SIZE};
use crate::utils::pcm::BYTES_PER_SAMPLE;
use crate::utils::validation::{validate_header_bit_size, validate_whole_units};

/// Size of the stream header in bytes
pub const HEADER_SIZE: usize = 32;

/// Length of the type tag field
pub const TYPE_TAG_LEN: usize = 16;

/// Expected type tag
pub const TYPE_TAG: [u8; TYPE_TAG_LEN] = *b"SOS-ADPCM\0\0\0\0\0\0\0";

/// Stream header preceding a compressed payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeader {
    /// Compression scheme of the payload
    pub compression_type: CompressionType,

    /// Payload length in bytes
    pub compressed_size: u32,

    /// Length of the original PCM in bytes
    pub uncompressed_size: u32,

    /// Bit depth of the original samples
    pub source_bit_size: u32,

    /// Format identifier
    pub type_tag: [u8; TYPE_TAG_LEN],
}

impl StreamHeader {
    /// Create an ADPCM header for 16-bit source audio
    pub fn new(compressed_size: u32, uncompressed_size: u32) -> Self {
        Self {
            compression_type: CompressionType::Adpcm,
            compressed_size,
            uncompressed_size,
            source_bit_size: PCM_BIT_SIZE,
            type_tag: TYPE_TAG,
        }
    }

    /// Parse a header from the start of `bytes`
    ///
    /// Checks run in order: length, type tag, compression type, bit size.
    pub fn parse(bytes: &[u8]) -> std::result::Result<Self, HeaderError> {
        let mut buf = bytes;
        Self::read_from(&mut buf)
    }

    /// Read a header from a buffer, advancing it past the header on success
    pub fn read_from(buf: &mut impl Buf) -> std::result::Result<Self, HeaderError> {
        if buf.remaining() < HEADER_SIZE {
            debug!("Stream header too short: {} bytes", buf.remaining());
            return Err(HeaderError::bad_size(format!(
                "header needs {} bytes, got {}",
                HEADER_SIZE,
                buf.remaining()
            )));
        }

        let compression_type = buf.get_u32_le();
        let compressed_size = buf.get_u32_le();
        let uncompressed_size = buf.get_u32_le();
        let source_bit_size = buf.get_u32_le();
        let mut type_tag = [0u8; TYPE_TAG_LEN];
        buf.copy_to_slice(&mut type_tag);

        if type_tag != TYPE_TAG {
            debug!("Stream header has foreign type tag {:02x?}", type_tag);
            return Err(HeaderError::BadTag { found: type_tag });
        }

        let compression_type = CompressionType::from_u32(compression_type)?;
        validate_header_bit_size(source_bit_size)?;

        Ok(Self {
            compression_type,
            compressed_size,
            uncompressed_size,
            source_bit_size,
            type_tag,
        })
    }

    /// Write the header into a buffer
    pub fn write_to(&self, buf: &mut impl BufMut) {
        buf.put_u32_le(self.compression_type.to_u32());
        buf.put_u32_le(self.compressed_size);
        buf.put_u32_le(self.uncompressed_size);
        buf.put_u32_le(self.source_bit_size);
        buf.put_slice(&self.type_tag);
    }

    /// Serialize the header
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        self.write_to(&mut &mut bytes[..]);
        bytes
    }

    /// Number of 16-bit samples the header says the payload expands to
    pub fn sample_count(&self) -> u32 {
        self.uncompressed_size / BYTES_PER_SAMPLE as u32
    }
}

/// Split a stream into its header and payload
///
/// # Errors
///
/// Returns [`HeaderError::BadSize`] if the payload length differs from the
/// header's compressed size, or any header validation error.
pub fn split_stream(bytes: &[u8]) -> std::result::Result<(StreamHeader, &[u8]), HeaderError> {
    let header = StreamHeader::parse(bytes)?;
    let payload = &bytes[HEADER_SIZE..];

    if payload.len() != header.compressed_size as usize {
        debug!(
            "Payload length {} disagrees with header size {}",
            payload.len(),
            header.compressed_size
        );
        return Err(HeaderError::bad_size(format!(
            "header declares {} payload bytes, found {}",
            header.compressed_size,
            payload.len()
        )));
    }

    Ok((header, payload))
}

/// Encode interleaved samples into a complete stream (header and payload)
///
/// # Errors
///
/// Fails on an invalid channel count, on a sample count that is not a whole
/// number of units, or if the stream would not fit the header's 32-bit sizes.
pub fn encode_stream(samples: &[i16], channels: u8) -> Result<Vec<u8>> {
    let mut session = CompressionSession::new(CodecConfig::mono().with_channels(channels))?;
    validate_whole_units(samples.len(), session.unit_samples())?;

    let payload_len = session.encoded_len(samples.len());
    let header = StreamHeader::new(
        size_field(payload_len)?,
        size_field(samples.len() * BYTES_PER_SAMPLE)?,
    );

    let mut stream = Vec::with_capacity(HEADER_SIZE + payload_len);
    header.write_to(&mut stream);
    stream.resize(HEADER_SIZE + payload_len, 0);
    session.encode(samples, &mut stream[HEADER_SIZE..])?;

    Ok(stream)
}

/// Decode a complete stream into interleaved samples
///
/// # Errors
///
/// Fails on any header error, on an invalid channel count, or if the payload
/// is not a whole number of units for `channels`.
pub fn decode_stream(bytes: &[u8], channels: u8) -> Result<(StreamHeader, Vec<i16>)> {
    let (header, payload) = split_stream(bytes)?;

    let mut session = CompressionSession::new(CodecConfig::from_header(&header, channels))?;
    validate_whole_units(payload.len(), session.unit_bytes())?;

    let (samples, outcome) = session.decode_vec(payload);
    if outcome.bytes_written() != header.uncompressed_size as usize {
        warn!(
            "Decoded {} PCM bytes but header declares {}",
            outcome.bytes_written(),
            header.uncompressed_size
        );
    }

    Ok((header, samples))
}

fn size_field(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        CodecError::invalid_payload(format!("{} bytes does not fit a 32-bit size field", len))
    })
}
