//! ADPCM Test Utilities
//!
//! Signal generators and a reference decoder built on the branching IMA
//! formulas, independent of the combined tables under test.

use crate::codecs::adpcm::nibble::unpack;
use crate::codecs::adpcm::reference::decode_nibble;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate a sine tone
pub fn sine_wave(length: usize, sample_rate: u32, frequency: f32, amplitude: f32) -> Vec<i16> {
    (0..length)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let sample = (2.0 * std::f32::consts::PI * frequency * t).sin() * amplitude;
            sample.clamp(-32768.0, 32767.0) as i16
        })
        .collect()
}

/// Generate reproducible white noise
pub fn white_noise(length: usize, amplitude: i16, seed: u64) -> Vec<i16> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..length).map(|_| rng.gen_range(-amplitude..=amplitude)).collect()
}

/// Generate an interleaved signal with a different tone per channel
pub fn multichannel_tones(frames: usize, channels: usize) -> Vec<i16> {
    let tones: Vec<Vec<i16>> = (0..channels)
        .map(|ch| sine_wave(frames, 22050, 220.0 * (ch + 1) as f32, 12000.0))
        .collect();

    (0..frames)
        .flat_map(|frame| tones.iter().map(move |tone| tone[frame]))
        .collect()
}

/// Generate a square wave alternating between the 16-bit extremes
pub fn full_scale_square(length: usize, period: usize) -> Vec<i16> {
    (0..length)
        .map(|i| if (i / period) % 2 == 0 { i16::MAX } else { i16::MIN })
        .collect()
}

/// Decode a mono payload with the branching formulas
pub fn reference_decode_mono(payload: &[u8]) -> Vec<i16> {
    let mut predicted = 0i32;
    let mut step_index = 0usize;
    payload
        .iter()
        .flat_map(|&byte| unpack(byte))
        .map(|nibble| decode_nibble(nibble, &mut predicted, &mut step_index))
        .collect()
}

/// Largest absolute difference between two equal-length signals
pub fn max_abs_error(a: &[i16], b: &[i16]) -> i32 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (i32::from(x) - i32::from(y)).abs())
        .max()
        .unwrap_or(0)
}
