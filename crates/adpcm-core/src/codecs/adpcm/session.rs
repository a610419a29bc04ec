//! Compression session
//!
//! A [`CompressionSession`] is the per-stream owner of codec state: one
//! [`CodecState`] per channel plus the stream's configuration. It is the
//! entry point external callers drive, either with sample slices or with
//! little-endian PCM byte buffers.
//!
//! Sessions carry their state across calls, so a long stream can be fed in
//! chunks. Each call processes whole units only (see
//! [`channels`](super::channels)); anything left over is reported back through
//! the returned outcome and should be resubmitted with the next chunk.

use super::channels::{self, unit_bytes, unit_nibbles};
use super::state::CodecState;
use super::tables::{tables, TransitionTables};
use crate::error::{CodecError, Result};
use crate::types::CodecConfig;
use crate::utils::pcm::{read_samples_le, write_samples_le, BYTES_PER_SAMPLE};
use crate::utils::validation::validate_output_capacity;
use tracing::{debug, trace, warn};

/// Samples held in the stack scratch buffer used by the byte-level calls
const SCRATCH_SAMPLES: usize = 1024;

/// Result of a decode call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOutcome {
    /// Compressed bytes consumed from the input
    pub bytes_consumed: usize,
    /// PCM samples written to the output
    pub samples_written: usize,
}

impl DecodeOutcome {
    /// PCM bytes written, always `4 × bytes_consumed`
    pub fn bytes_written(&self) -> usize {
        self.samples_written * BYTES_PER_SAMPLE
    }
}

/// Result of an encode call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOutcome {
    /// PCM samples consumed from the input
    pub samples_consumed: usize,
    /// Compressed bytes written to the output
    pub bytes_written: usize,
}

/// Per-stream codec session
#[derive(Debug, Clone)]
pub struct CompressionSession {
    config: CodecConfig,
    states: Vec<CodecState>,
    tables: &'static TransitionTables,
}

impl CompressionSession {
    /// Create a session for a validated configuration
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;

        debug!(
            "Creating {} session: {} channel(s), {}-bit source",
            config.compression_type, config.channels, config.bit_size
        );

        Ok(Self {
            states: vec![CodecState::new(); usize::from(config.channels)],
            config,
            tables: tables(),
        })
    }

    /// Zero every channel's state for the start of a new stream
    pub fn init_stream(&mut self) {
        self.states.iter_mut().for_each(CodecState::reset);
        debug!("Session state reset for {} channel(s)", self.states.len());
    }

    /// Number of interleaved channels
    pub fn channels(&self) -> usize {
        self.states.len()
    }

    /// Session configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Snapshot of every channel's state, in channel order
    pub fn channel_states(&self) -> &[CodecState] {
        &self.states
    }

    /// Resume a stream from previously persisted channel states
    ///
    /// States are built with [`CodecState::from_parts`], which already rejects
    /// unreachable indices.
    ///
    /// # Errors
    ///
    /// Fails without touching the session if the number of states differs
    /// from the channel count.
    pub fn restore(&mut self, states: &[CodecState]) -> Result<()> {
        if states.len() != self.states.len() {
            return Err(CodecError::invalid_config(format!(
                "Expected {} channel states, got {}",
                self.states.len(),
                states.len()
            )));
        }

        self.states.copy_from_slice(states);
        debug!("Session restored from {} persisted channel state(s)", self.states.len());
        Ok(())
    }

    /// Compressed bytes in one processing unit
    pub fn unit_bytes(&self) -> usize {
        unit_bytes(self.states.len())
    }

    /// Interleaved samples in one processing unit
    pub fn unit_samples(&self) -> usize {
        unit_nibbles(self.states.len())
    }

    /// Samples a decode of `compressed_bytes` would produce (whole units only)
    pub fn decoded_len(&self, compressed_bytes: usize) -> usize {
        self.whole_bytes(compressed_bytes) * 2
    }

    /// Bytes an encode of `samples` would produce (whole units only)
    pub fn encoded_len(&self, samples: usize) -> usize {
        self.whole_samples(samples) / 2
    }

    /// Decode compressed bytes into interleaved samples
    ///
    /// Empty input returns immediately with nothing written and the state
    /// untouched. A trailing partial unit is left unconsumed.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::BufferTooSmall`] if `dst` cannot hold the decoded
    /// samples; the state is untouched in that case.
    pub fn decode(&mut self, src: &[u8], dst: &mut [i16]) -> Result<DecodeOutcome> {
        if src.is_empty() {
            return Ok(DecodeOutcome::default());
        }

        let usable = self.whole_bytes(src.len());
        validate_output_capacity(usable * 2, dst.len())?;
        self.note_dropped_bytes(src.len(), usable);

        let consumed = self.decode_units(&src[..usable], dst);

        trace!("ADPCM decoded {} bytes to {} samples", consumed, consumed * 2);

        Ok(DecodeOutcome {
            bytes_consumed: consumed,
            samples_written: consumed * 2,
        })
    }

    /// Decode compressed bytes into little-endian PCM bytes
    ///
    /// Writes `4 × bytes_consumed` bytes to `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::BufferTooSmall`] if `dst` is too short.
    pub fn decode_to_bytes(&mut self, src: &[u8], dst: &mut [u8]) -> Result<DecodeOutcome> {
        if src.is_empty() {
            return Ok(DecodeOutcome::default());
        }

        let usable = self.whole_bytes(src.len());
        validate_output_capacity(usable * 2 * BYTES_PER_SAMPLE, dst.len())?;
        self.note_dropped_bytes(src.len(), usable);

        let chunk_bytes = (SCRATCH_SAMPLES / 2) / self.unit_bytes() * self.unit_bytes();
        let mut scratch = [0i16; SCRATCH_SAMPLES];
        let mut written = 0;

        for chunk in src[..usable].chunks(chunk_bytes) {
            let consumed = self.decode_units(chunk, &mut scratch);
            written += write_samples_le(&scratch[..consumed * 2], &mut dst[written * BYTES_PER_SAMPLE..]);
        }

        trace!("ADPCM decoded {} bytes to {} PCM bytes", usable, written * BYTES_PER_SAMPLE);

        Ok(DecodeOutcome {
            bytes_consumed: usable,
            samples_written: written,
        })
    }

    /// Encode interleaved samples into compressed bytes
    ///
    /// A trailing partial unit is left unconsumed.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::BufferTooSmall`] if `dst` is too short.
    pub fn encode(&mut self, src: &[i16], dst: &mut [u8]) -> Result<EncodeOutcome> {
        if src.is_empty() {
            return Ok(EncodeOutcome::default());
        }

        let usable = self.whole_samples(src.len());
        validate_output_capacity(usable / 2, dst.len())?;
        self.note_dropped_samples(src.len(), usable);

        let consumed = self.encode_units(&src[..usable], dst);

        trace!("ADPCM encoded {} samples to {} bytes", consumed, consumed / 2);

        Ok(EncodeOutcome {
            samples_consumed: consumed,
            bytes_written: consumed / 2,
        })
    }

    /// Encode little-endian PCM bytes into compressed bytes
    ///
    /// `samples_consumed` in the outcome counts samples, not bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::BufferTooSmall`] if `dst` is too short.
    pub fn encode_from_bytes(&mut self, src: &[u8], dst: &mut [u8]) -> Result<EncodeOutcome> {
        let total_samples = src.len() / BYTES_PER_SAMPLE;
        if total_samples == 0 {
            return Ok(EncodeOutcome::default());
        }

        let usable = self.whole_samples(total_samples);
        validate_output_capacity(usable / 2, dst.len())?;
        self.note_dropped_samples(total_samples, usable);

        let chunk_samples = SCRATCH_SAMPLES / self.unit_samples() * self.unit_samples();
        let mut scratch = [0i16; SCRATCH_SAMPLES];
        let mut consumed = 0;

        for chunk in src[..usable * BYTES_PER_SAMPLE].chunks(chunk_samples * BYTES_PER_SAMPLE) {
            let read = read_samples_le(chunk, &mut scratch);
            consumed += self.encode_units(&scratch[..read], &mut dst[consumed / 2..]);
        }

        trace!("ADPCM encoded {} PCM bytes to {} bytes", consumed * BYTES_PER_SAMPLE, consumed / 2);

        Ok(EncodeOutcome {
            samples_consumed: consumed,
            bytes_written: consumed / 2,
        })
    }

    /// Decode into a freshly allocated sample vector
    pub fn decode_vec(&mut self, src: &[u8]) -> (Vec<i16>, DecodeOutcome) {
        let mut samples = vec![0i16; self.decoded_len(src.len())];
        let usable = self.whole_bytes(src.len());
        let consumed = self.decode_units(&src[..usable], &mut samples);
        self.note_dropped_bytes(src.len(), consumed);

        let outcome = DecodeOutcome {
            bytes_consumed: consumed,
            samples_written: consumed * 2,
        };
        (samples, outcome)
    }

    /// Encode into a freshly allocated byte vector
    pub fn encode_vec(&mut self, src: &[i16]) -> (Vec<u8>, EncodeOutcome) {
        let mut bytes = vec![0u8; self.encoded_len(src.len())];
        let usable = self.whole_samples(src.len());
        let consumed = self.encode_units(&src[..usable], &mut bytes);
        self.note_dropped_samples(src.len(), consumed);

        let outcome = EncodeOutcome {
            samples_consumed: consumed,
            bytes_written: consumed / 2,
        };
        (bytes, outcome)
    }

    fn decode_units(&mut self, src: &[u8], dst: &mut [i16]) -> usize {
        channels::decode_interleaved(&mut self.states, self.tables, src, dst)
    }

    fn encode_units(&mut self, src: &[i16], dst: &mut [u8]) -> usize {
        channels::encode_interleaved(&mut self.states, self.tables, src, dst)
    }

    fn whole_bytes(&self, bytes: usize) -> usize {
        let unit = self.unit_bytes();
        bytes / unit * unit
    }

    fn whole_samples(&self, samples: usize) -> usize {
        let unit = self.unit_samples();
        samples / unit * unit
    }

    fn note_dropped_bytes(&self, total: usize, used: usize) {
        if used < total {
            warn!(
                "Dropping {} trailing byte(s) that do not fill a {}-channel unit",
                total - used,
                self.states.len()
            );
        }
    }

    fn note_dropped_samples(&self, total: usize, used: usize) {
        if used < total {
            warn!(
                "Dropping {} trailing sample(s) that do not fill a {}-channel unit",
                total - used,
                self.states.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono() -> CompressionSession {
        CompressionSession::new(CodecConfig::mono()).unwrap()
    }

    #[test]
    fn test_session_creation() {
        let session = CompressionSession::new(CodecConfig::stereo()).unwrap();
        assert_eq!(session.channels(), 2);
        assert_eq!(session.channel_states(), &[CodecState::new(); 2]);
        assert_eq!(session.unit_bytes(), 1);

        assert!(CompressionSession::new(CodecConfig::mono().with_channels(0)).is_err());
        assert!(CompressionSession::new(CodecConfig::mono().with_bit_size(8)).is_err());
    }

    #[test]
    fn test_zero_length_decode_leaves_state() {
        let mut session = mono();
        session.decode(&[0x77], &mut [0i16; 2]).unwrap();
        let before = session.channel_states().to_vec();

        let outcome = session.decode(&[], &mut []).unwrap();
        assert_eq!(outcome, DecodeOutcome::default());
        assert_eq!(outcome.bytes_written(), 0);
        assert_eq!(session.channel_states(), before.as_slice());

        let outcome = session.decode_to_bytes(&[], &mut []).unwrap();
        assert_eq!(outcome.bytes_written(), 0);
        assert_eq!(session.channel_states(), before.as_slice());
    }

    #[test]
    fn test_decode_to_bytes_golden() {
        let mut session = mono();
        let mut pcm = [0u8; 4];
        let outcome = session.decode_to_bytes(&[0x21], &mut pcm).unwrap();
        assert_eq!(outcome.bytes_consumed, 1);
        assert_eq!(outcome.bytes_written(), 4);
        assert_eq!(pcm, [0x01, 0x00, 0x04, 0x00]);
    }

    #[test]
    fn test_decode_reports_four_bytes_per_input_byte() {
        let payload = vec![0x5Au8; 3000];
        let mut session = mono();
        let mut pcm = vec![0u8; payload.len() * 4];
        let outcome = session.decode_to_bytes(&payload, &mut pcm).unwrap();
        assert_eq!(outcome.bytes_written(), payload.len() * 4);

        let mut reference = mono();
        let (samples, _) = reference.decode_vec(&payload);
        assert_eq!(pcm, crate::utils::samples_to_bytes(&samples));
    }

    #[test]
    fn test_decode_buffer_too_small() {
        let mut session = mono();
        let result = session.decode(&[1, 2, 3], &mut [0i16; 5]);
        assert!(matches!(
            result,
            Err(CodecError::BufferTooSmall { needed: 6, actual: 5 })
        ));
        assert_eq!(session.channel_states(), &[CodecState::new()]);
    }

    #[test]
    fn test_trailing_partial_unit_is_reported() {
        let mut session = CompressionSession::new(CodecConfig::mono().with_channels(3)).unwrap();
        let mut out = [0i16; 10];
        let outcome = session.decode(&[0x11; 4], &mut out).unwrap();
        assert_eq!(outcome.bytes_consumed, 3);
        assert_eq!(outcome.samples_written, 6);

        let (bytes, outcome) = session.encode_vec(&[5; 7]);
        assert_eq!(outcome.samples_consumed, 6);
        assert_eq!(bytes.len(), 3);
    }

    #[test]
    fn test_restore_resumes_stream() {
        let payload = [0x37u8, 0x9C, 0x42, 0xF1, 0x08, 0x65];

        let mut whole = mono();
        let (expected, _) = whole.decode_vec(&payload);

        let mut first = mono();
        let (head, _) = first.decode_vec(&payload[..2]);
        let saved = first.channel_states().to_vec();

        let mut second = mono();
        second.restore(&saved).unwrap();
        let (tail, _) = second.decode_vec(&payload[2..]);

        assert_eq!([head, tail].concat(), expected);
    }

    #[test]
    fn test_restore_rejects_bad_state() {
        let mut session = mono();
        assert!(CodecState::from_parts(5, 0).is_err());
        assert!(CodecState::from_parts(1424, 0).is_err());

        assert!(session.restore(&[CodecState::new(); 2]).is_err());
        assert_eq!(session.channel_states(), &[CodecState::new()]);
    }

    #[test]
    fn test_init_stream_resets_every_channel() {
        let mut session = CompressionSession::new(CodecConfig::stereo()).unwrap();
        session.encode_vec(&[1000, -1000, 2000, -2000]);
        assert_ne!(session.channel_states(), &[CodecState::new(); 2]);

        session.init_stream();
        assert_eq!(session.channel_states(), &[CodecState::new(); 2]);
    }

    #[test]
    fn test_encode_from_bytes_matches_sample_encode() {
        let samples: Vec<i16> = (0..3001).map(|i| ((i * 37) % 2000 - 1000) as i16).collect();
        let pcm = crate::utils::samples_to_bytes(&samples);

        let mut from_samples = mono();
        let (expected, expected_outcome) = from_samples.encode_vec(&samples);

        let mut from_bytes = mono();
        let mut encoded = vec![0u8; expected.len()];
        let outcome = from_bytes.encode_from_bytes(&pcm, &mut encoded).unwrap();

        assert_eq!(outcome, expected_outcome);
        assert_eq!(outcome.samples_consumed, 3000);
        assert_eq!(encoded, expected);
        assert_eq!(from_bytes.channel_states(), from_samples.channel_states());
    }

    #[test]
    fn test_encoded_and_decoded_lengths() {
        let stereo = CompressionSession::new(CodecConfig::stereo()).unwrap();
        assert_eq!(stereo.encoded_len(10), 5);
        assert_eq!(stereo.decoded_len(5), 10);

        let triple = CompressionSession::new(CodecConfig::mono().with_channels(3)).unwrap();
        assert_eq!(triple.encoded_len(13), 6);
        assert_eq!(triple.decoded_len(7), 12);
    }
}
