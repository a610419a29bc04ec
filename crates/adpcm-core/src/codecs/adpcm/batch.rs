//! Parallel batch processing
//!
//! Independent streams share nothing but the read-only transition tables, so a
//! batch of them can be spread over the rayon thread pool with one session per
//! stream. Results come back in input order.
//!
//! Parallelism only pays off when there are several streams of reasonable
//! size; a single stream is always processed sequentially by its session.

use rayon::prelude::*;
use tracing::debug;

use super::session::{CompressionSession, DecodeOutcome, EncodeOutcome};
use crate::error::Result;
use crate::types::CodecConfig;

/// Decode several independent payloads in parallel
///
/// Every payload starts from the stream-start state. Trailing partial units
/// are dropped per payload and show up in that payload's outcome.
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn decode_streams(config: &CodecConfig, payloads: &[&[u8]]) -> Result<Vec<(Vec<i16>, DecodeOutcome)>> {
    let template = CompressionSession::new(config.clone())?;
    debug!("Decoding {} streams in parallel", payloads.len());

    Ok(payloads
        .par_iter()
        .map(|payload| template.clone().decode_vec(payload))
        .collect())
}

/// Encode several independent sample runs in parallel
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn encode_streams(config: &CodecConfig, inputs: &[&[i16]]) -> Result<Vec<(Vec<u8>, EncodeOutcome)>> {
    let template = CompressionSession::new(config.clone())?;
    debug!("Encoding {} streams in parallel", inputs.len());

    Ok(inputs
        .par_iter()
        .map(|samples| template.clone().encode_vec(samples))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_matches_sequential() {
        let inputs: Vec<Vec<i16>> = (1..=6)
            .map(|n| (0..400).map(|i| ((i * n * 97) % 6000 - 3000) as i16).collect())
            .collect();
        let refs: Vec<&[i16]> = inputs.iter().map(Vec::as_slice).collect();

        let encoded = encode_streams(&CodecConfig::stereo(), &refs).unwrap();
        assert_eq!(encoded.len(), inputs.len());

        for (input, (bytes, outcome)) in inputs.iter().zip(&encoded) {
            let mut session = CompressionSession::new(CodecConfig::stereo()).unwrap();
            let (expected, _) = session.encode_vec(input);
            assert_eq!(bytes, &expected);
            assert_eq!(outcome.samples_consumed, input.len());
        }

        let payloads: Vec<&[u8]> = encoded.iter().map(|(bytes, _)| bytes.as_slice()).collect();
        let decoded = decode_streams(&CodecConfig::stereo(), &payloads).unwrap();
        for (payload, (samples, outcome)) in payloads.iter().zip(&decoded) {
            let mut session = CompressionSession::new(CodecConfig::stereo()).unwrap();
            assert_eq!(samples, &session.decode_vec(payload).0);
            assert_eq!(outcome.bytes_written(), payload.len() * 4);
        }
    }

    #[test]
    fn test_batch_rejects_invalid_config() {
        let config = CodecConfig::mono().with_channels(0);
        let payload: &[u8] = &[1, 2];
        let samples: &[i16] = &[1, 2];
        assert!(decode_streams(&config, &[payload]).is_err());
        assert!(encode_streams(&config, &[samples]).is_err());
    }

    #[test]
    fn test_empty_batch() {
        assert!(decode_streams(&CodecConfig::mono(), &[]).unwrap().is_empty());
    }
}
