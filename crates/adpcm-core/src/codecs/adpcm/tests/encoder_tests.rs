//! ADPCM Encoder Tests
//!
//! This module contains focused tests for the greedy quantizer: known output
//! vectors, encoder/decoder symmetry and behavior at the sample extremes.

use super::utils::*;
use crate::codecs::adpcm::{AdpcmCodec, CodecState, CompressionSession};
use crate::types::{AudioCodec, CodecConfig};

fn session(channels: u8) -> CompressionSession {
    CompressionSession::new(CodecConfig::mono().with_channels(channels)).unwrap()
}

/// Test a mono ramp against known output bytes
#[test]
fn test_mono_encode_vector() {
    let samples = [10i16, 10, 20, 50, 80, 100, 500, 1000, 1500, 2000, 1500, 800, 500, 300, 100, -100];
    let mut encoder = session(1);
    let (bytes, outcome) = encoder.encode_vec(&samples);

    assert_eq!(bytes, vec![6, 115, 23, 119, 119, 184, 137, 153]);
    assert_eq!(outcome.samples_consumed, 16);
    assert_eq!(outcome.bytes_written, 8);
    assert_eq!(
        encoder.channel_states(),
        &[CodecState::from_parts(720, -148).unwrap()]
    );
}

/// Test a stereo pair against known output bytes
#[test]
fn test_stereo_encode_vector() {
    let samples = [10i16, 18, 30, 38, 50, 57, 100, 106, 400, 410, 300, 310, 100, 110, 40, 46];
    let mut encoder = session(2);
    let (bytes, _) = encoder.encode_vec(&samples);

    assert_eq!(bytes, vec![118, 102, 35, 119, 119, 53, 253, 153]);
    assert_eq!(
        encoder.channel_states(),
        &[
            CodecState::from_parts(544, 29).unwrap(),
            CodecState::from_parts(560, 19).unwrap(),
        ]
    );
}

/// Test that silence encodes to zero codes and leaves the state at rest
#[test]
fn test_silence_encodes_to_zero() {
    let mut encoder = session(1);
    let (bytes, _) = encoder.encode_vec(&[0; 10]);
    assert_eq!(bytes, vec![0; 5]);
    assert_eq!(encoder.channel_states(), &[CodecState::new()]);
}

/// Test full-scale input walks the step index up with maximal codes
#[test]
fn test_full_scale_input() {
    let mut encoder = session(1);
    let (bytes, _) = encoder.encode_vec(&[i16::MAX; 8]);
    assert_eq!(bytes, vec![0x77; 4]);
    assert_eq!(encoder.channel_states()[0].state_index(), 1024);

    let mut decoder = session(1);
    let (decoded, _) = decoder.decode_vec(&bytes);
    assert_eq!(decoded, vec![11, 41, 104, 240, 533, 1164, 2521, 5431]);

    let mut encoder = session(1);
    let (bytes, _) = encoder.encode_vec(&[i16::MIN; 8]);
    assert_eq!(bytes, vec![0xFF; 4]);
    let (decoded, _) = session(1).decode_vec(&bytes);
    assert_eq!(decoded, vec![-11, -41, -104, -240, -533, -1164, -2521, -5431]);
}

/// Test that the decoder reproduces exactly what the encoder tracked
#[test]
fn test_encoder_decoder_symmetry() {
    let signals = [
        sine_wave(4000, 22050, 440.0, 20000.0),
        white_noise(4000, i16::MAX, 3),
        full_scale_square(4000, 37),
    ];

    for signal in &signals {
        let mut encoder = session(1);
        let mut tracked = Vec::with_capacity(signal.len());
        let mut bytes = Vec::new();
        for pair in signal.chunks_exact(2) {
            let (byte, _) = encoder.encode_vec(pair);
            bytes.extend(byte);
            tracked.push(encoder.channel_states()[0].predicted_sample());
        }

        let (decoded, _) = session(1).decode_vec(&bytes);
        let every_second: Vec<i16> = decoded.iter().skip(1).step_by(2).copied().collect();
        assert_eq!(every_second, tracked);
        assert_eq!(decoder_state(&bytes), encoder.channel_states()[0]);
    }
}

fn decoder_state(bytes: &[u8]) -> CodecState {
    let mut decoder = session(1);
    decoder.decode_vec(bytes);
    decoder.channel_states()[0]
}

/// Test a slow tone stays close to the source once the step size settles
#[test]
fn test_tone_reconstruction_quality() {
    let signal = sine_wave(8000, 22050, 200.0, 8000.0);
    let mut codec = AdpcmCodec::new(CodecConfig::mono()).unwrap();
    let encoded = codec.encode(&signal).unwrap();
    assert_eq!(encoded.len(), signal.len() / 2);

    codec.reset().unwrap();
    let decoded = codec.decode(&encoded).unwrap();
    assert!(max_abs_error(&signal[500..], &decoded[500..]) < 1500);
}

/// Test multichannel encode keeps each channel's predictor separate
#[test]
fn test_multichannel_encode_matches_per_channel_mono() {
    for channels in [2usize, 3, 6] {
        let frames = 600;
        let interleaved = multichannel_tones(frames, channels);

        let mut encoder = session(channels as u8);
        let (bytes, _) = encoder.encode_vec(&interleaved);
        let (decoded, _) = session(channels as u8).decode_vec(&bytes);

        for ch in 0..channels {
            let mono: Vec<i16> = interleaved.iter().skip(ch).step_by(channels).copied().collect();
            let mut mono_encoder = session(1);
            let (mono_bytes, _) = mono_encoder.encode_vec(&mono);
            let (mono_decoded, _) = session(1).decode_vec(&mono_bytes);

            let channel_decoded: Vec<i16> = decoded.iter().skip(ch).step_by(channels).copied().collect();
            assert_eq!(channel_decoded, mono_decoded, "channel {} of {}", ch, channels);
            assert_eq!(encoder.channel_states()[ch], mono_encoder.channel_states()[0]);
        }
    }
}

/// Test encoding the output of a decode reproduces the payload
#[test]
fn test_reencode_is_stable() {
    let signal = white_noise(2000, 9000, 11);
    let (first, _) = session(1).encode_vec(&signal);
    let (decoded, _) = session(1).decode_vec(&first);
    let (second, _) = session(1).encode_vec(&decoded);
    assert_eq!(first, second);
}
