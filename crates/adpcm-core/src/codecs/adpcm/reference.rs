//! IMA ADPCM Reference Tables
//!
//! This module contains the published IMA ADPCM step-size and index-adjust
//! tables together with the classical branching formulas that turn a
//! (step index, nibble) pair into a predictor delta and a new step index.
//!
//! The combined transition tables in [`super::tables`] are generated from these
//! functions, and the test suites use them as an independent oracle.
//!
//! ## Algorithm Details
//!
//! - Bit 3 of the nibble is the sign, bits 0..=2 the magnitude
//! - The delta is `step/8 + step*b2 + step/2*b1 + step/4*b0`
//! - The step index moves by `-1, -1, -1, -1, 2, 4, 6, 8` for magnitudes 0..=7
//!   and is clamped to `0..=88`

/// Number of quantizer step sizes
pub const STEP_COUNT: usize = 89;

/// Largest valid step index
pub const MAX_STEP_INDEX: usize = STEP_COUNT - 1;

/// IMA ADPCM quantizer step sizes
pub const IMA_STEP_TABLE: [i32; STEP_COUNT] = [
    7, 8, 9, 10, 11, 12, 13, 14, 16, 17,
    19, 21, 23, 25, 28, 31, 34, 37, 41, 45,
    50, 55, 60, 66, 73, 80, 88, 97, 107, 118,
    130, 143, 157, 173, 190, 209, 230, 253, 279, 307,
    337, 371, 408, 449, 494, 544, 598, 658, 724, 796,
    876, 963, 1060, 1166, 1282, 1411, 1552, 1707, 1878, 2066,
    2272, 2499, 2749, 3024, 3327, 3660, 4026, 4428, 4871, 5358,
    5894, 6484, 7132, 7845, 8630, 9493, 10442, 11487, 12635, 13899,
    15289, 16818, 18500, 20350, 22385, 24623, 27086, 29794, 32767,
];

/// Step index adjustment for each nibble magnitude (sign bit ignored)
pub const IMA_INDEX_ADJUST: [i32; 8] = [-1, -1, -1, -1, 2, 4, 6, 8];

/// Predictor delta for a step index and nibble
///
/// # Arguments
///
/// * `step_index` - Quantizer step index (0..=88)
/// * `nibble` - 4-bit code; only the low 4 bits are used
pub fn step_delta(step_index: usize, nibble: u8) -> i32 {
    let step = IMA_STEP_TABLE[step_index.min(MAX_STEP_INDEX)];
    let nibble = nibble & 0x0F;

    let mut diff = step >> 3;
    if nibble & 4 != 0 {
        diff += step;
    }
    if nibble & 2 != 0 {
        diff += step >> 1;
    }
    if nibble & 1 != 0 {
        diff += step >> 2;
    }

    if nibble & 8 != 0 {
        -diff
    } else {
        diff
    }
}

/// Step index that follows `step_index` after consuming `nibble`
pub fn next_step_index(step_index: usize, nibble: u8) -> usize {
    let adjusted = step_index as i32 + IMA_INDEX_ADJUST[usize::from(nibble & 0x07)];
    adjusted.clamp(0, MAX_STEP_INDEX as i32) as usize
}

/// Decode one nibble with the branching formula
///
/// `predicted` and `step_index` are updated in place; the returned value is the
/// new, saturated predicted sample.
pub fn decode_nibble(nibble: u8, predicted: &mut i32, step_index: &mut usize) -> i16 {
    let sum = *predicted + step_delta(*step_index, nibble);
    *predicted = sum.clamp(i16::MIN as i32, i16::MAX as i32);
    *step_index = next_step_index(*step_index, nibble);
    *predicted as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_delta_smallest_step() {
        let deltas: Vec<i32> = (0..16).map(|n| step_delta(0, n)).collect();
        assert_eq!(
            deltas,
            vec![0, 1, 3, 4, 7, 8, 10, 11, 0, -1, -3, -4, -7, -8, -10, -11]
        );
    }

    #[test]
    fn test_step_delta_ignores_high_bits() {
        assert_eq!(step_delta(10, 0x16), step_delta(10, 0x06));
    }

    #[test]
    fn test_next_step_index_clamps() {
        assert_eq!(next_step_index(0, 0), 0);
        assert_eq!(next_step_index(0, 8), 0);
        assert_eq!(next_step_index(0, 7), 8);
        assert_eq!(next_step_index(85, 7), MAX_STEP_INDEX);
        assert_eq!(next_step_index(MAX_STEP_INDEX, 15), MAX_STEP_INDEX);
        assert_eq!(next_step_index(MAX_STEP_INDEX, 3), 87);
    }

    #[test]
    fn test_decode_nibble_saturates() {
        let mut predicted = 30123;
        let mut step_index = 80;
        assert_eq!(decode_nibble(7, &mut predicted, &mut step_index), 32767);
        assert_eq!(step_index, 88);

        let mut predicted = -30123;
        let mut step_index = 80;
        assert_eq!(decode_nibble(14, &mut predicted, &mut step_index), -32768);
        assert_eq!(step_index, 86);
    }
}
