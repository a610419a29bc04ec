//! ADPCM `AudioCodec` implementation
//!
//! [`AdpcmCodec`] wraps a [`CompressionSession`] behind the library-wide
//! [`AudioCodec`] trait. Unlike the session, which quietly leaves a trailing
//! partial unit for the next call, the trait methods insist on whole units and
//! report anything else as [`CodecError::InputTruncated`].

use super::session::CompressionSession;
use crate::error::{CodecError, Result};
use crate::types::{AudioCodec, CodecConfig, CodecInfo, PCM_BIT_SIZE};
use crate::utils::validation::validate_whole_units;
use tracing::{debug, trace};

/// Compressed bits per PCM sample
pub const BITS_PER_ENCODED_SAMPLE: u32 = 4;

/// ADPCM codec implementation
#[derive(Debug, Clone)]
pub struct AdpcmCodec {
    session: CompressionSession,
}

impl AdpcmCodec {
    /// Create a new ADPCM codec
    pub fn new(config: CodecConfig) -> Result<Self> {
        let session = CompressionSession::new(config)?;

        debug!(
            "Creating ADPCM codec: {}ch, {} samples/frame",
            session.channels(),
            session.unit_samples()
        );

        Ok(Self { session })
    }

    /// The underlying session
    pub fn session(&self) -> &CompressionSession {
        &self.session
    }

    /// Encode into a caller-provided buffer
    ///
    /// Returns the number of bytes written.
    pub fn encode_to_buffer(&mut self, samples: &[i16], output: &mut [u8]) -> Result<usize> {
        validate_whole_units(samples.len(), self.session.unit_samples())?;
        Ok(self.session.encode(samples, output)?.bytes_written)
    }

    /// Decode into a caller-provided buffer
    ///
    /// Returns the number of samples written.
    pub fn decode_to_buffer(&mut self, data: &[u8], output: &mut [i16]) -> Result<usize> {
        validate_whole_units(data.len(), self.session.unit_bytes())?;
        Ok(self.session.decode(data, output)?.samples_written)
    }
}

impl AudioCodec for AdpcmCodec {
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>> {
        let mut output = vec![0u8; self.session.encoded_len(samples.len())];
        let written = self.encode_to_buffer(samples, &mut output)?;
        output.truncate(written);

        trace!("ADPCM encoded {} samples to {} bytes", samples.len(), output.len());

        Ok(output)
    }

    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>> {
        let mut output = vec![0i16; self.session.decoded_len(data.len())];
        let written = self.decode_to_buffer(data, &mut output)?;
        output.truncate(written);

        trace!("ADPCM decoded {} bytes to {} samples", data.len(), output.len());

        Ok(output)
    }

    fn info(&self) -> CodecInfo {
        let config = self.session.config();
        CodecInfo {
            name: config.compression_type.name(),
            channels: config.channels,
            bit_size: PCM_BIT_SIZE,
            bits_per_encoded_sample: BITS_PER_ENCODED_SAMPLE,
            frame_size: self.session.unit_samples(),
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.session.init_stream();
        Ok(())
    }

    fn frame_size(&self) -> usize {
        self.session.unit_samples()
    }

    fn supports_variable_frame_size(&self) -> bool {
        true
    }
}

impl TryFrom<CodecConfig> for AdpcmCodec {
    type Error = CodecError;

    fn try_from(config: CodecConfig) -> Result<Self> {
        Self::new(config)
    }
}
