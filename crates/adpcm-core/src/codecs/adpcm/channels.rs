//! Channel orchestration
//!
//! Maps the flat nibble stream onto one [`CodecState`] per channel. Nibble `i`
//! of a stream (the low nibble of byte 0 being nibble 0) belongs to channel
//! `i mod N`, and decoded samples come out interleaved in channel order.
//!
//! Both directions work on whole *units*: the smallest run of nibbles that
//! fills complete bytes and complete channel rotations, i.e. `lcm(N, 2)`
//! nibbles. Stopping on a unit boundary puts channel 0 first in line again, so
//! a stream can be processed in any number of unit-aligned chunks.
//!
//! Mono is not a separate algorithm: [`decode_mono`] and [`encode_mono`] hand
//! the single state to the same rotation loop the N-channel path uses.

use super::nibble::{nibbles, pack};
use super::state::CodecState;
use super::tables::TransitionTables;

/// Nibbles (and therefore samples) in one processing unit
pub fn unit_nibbles(channels: usize) -> usize {
    if channels % 2 == 0 {
        channels
    } else {
        channels * 2
    }
}

/// Compressed bytes in one processing unit
pub fn unit_bytes(channels: usize) -> usize {
    unit_nibbles(channels) / 2
}

/// Decode a single-channel payload
///
/// Returns the number of input bytes consumed; every consumed byte produces
/// two samples.
pub fn decode_mono(state: &mut CodecState, tables: &TransitionTables, src: &[u8], dst: &mut [i16]) -> usize {
    decode_interleaved(std::slice::from_mut(state), tables, src, dst)
}

/// Decode an N-channel interleaved payload
///
/// Only whole units are processed, limited by both `src` and the room in
/// `dst`. Returns the number of input bytes consumed.
pub fn decode_interleaved(
    states: &mut [CodecState],
    tables: &TransitionTables,
    src: &[u8],
    dst: &mut [i16],
) -> usize {
    if states.is_empty() {
        return 0;
    }

    let unit = unit_bytes(states.len());
    let units = src.len().min(dst.len() / 2) / unit;
    let consumed = units * unit;

    rotate(states, nibbles(&src[..consumed]).zip(dst.iter_mut()), |state, (nibble, sample)| {
        *sample = state.advance(tables, nibble);
    });

    consumed
}

/// Encode a single-channel sample run
///
/// Returns the number of samples consumed; every two samples produce one byte.
pub fn encode_mono(state: &mut CodecState, tables: &TransitionTables, src: &[i16], dst: &mut [u8]) -> usize {
    encode_interleaved(std::slice::from_mut(state), tables, src, dst)
}

/// Encode N-channel interleaved samples
///
/// Only whole units are processed, limited by both `src` and the room in
/// `dst`. Returns the number of samples consumed.
pub fn encode_interleaved(
    states: &mut [CodecState],
    tables: &TransitionTables,
    src: &[i16],
    dst: &mut [u8],
) -> usize {
    if states.is_empty() {
        return 0;
    }

    let unit = unit_nibbles(states.len());
    let units = src.len().min(dst.len() * 2) / unit;
    let consumed = units * unit;

    let mut codes = [0u8; 2];
    let mut filled = 0;
    let mut out = dst.iter_mut();
    rotate(states, src[..consumed].iter(), |state, &sample| {
        codes[filled] = state.quantize(tables, sample);
        filled += 1;
        if filled == 2 {
            if let Some(byte) = out.next() {
                *byte = pack(codes[0], codes[1]);
            }
            filled = 0;
        }
    });

    consumed
}

/// Hand each item to the next channel in rotation
#[inline(always)]
fn rotate<I, F>(states: &mut [CodecState], items: I, mut step: F)
where
    I: Iterator,
    F: FnMut(&mut CodecState, I::Item),
{
    let mut channel = 0;
    for item in items {
        if let Some(state) = states.get_mut(channel) {
            step(state, item);
        }
        channel += 1;
        if channel == states.len() {
            channel = 0;
        }
    }
}
