//! ADPCM Channel State
//!
//! This module defines the per-channel predictor state and the two per-sample
//! operations on it: advancing by one received nibble (decoding) and choosing
//! the nibble that best reproduces a sample (encoding).

use super::tables::{TransitionTables, CODES_PER_STEP};
use crate::error::{CodecError, Result};

/// Predictor state for a single channel
///
/// Each channel of a stream owns exactly one of these for the lifetime of the
/// stream. The encoder and decoder of a stream must start from the same state
/// and see the same nibbles, or their predictors drift apart permanently.
///
/// The fields are private: a state only ever comes from [`CodecState::new`],
/// [`CodecState::from_parts`] or a table transition, so `state_index + nibble`
/// always lands inside the transition tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecState {
    /// Combined step/nibble base index; always a valid next-state table value
    state_index: u16,

    /// Last reconstructed sample
    predicted_sample: i16,
}

impl CodecState {
    /// Create a state at the stream-start convention (index 0, predictor 0)
    pub const fn new() -> Self {
        Self {
            state_index: 0,
            predicted_sample: 0,
        }
    }

    /// Create a state from persisted values
    ///
    /// # Errors
    ///
    /// Returns an error if `state_index` is not a value the next-state table
    /// can produce.
    pub fn from_parts(state_index: u16, predicted_sample: i16) -> Result<Self> {
        if !TransitionTables::is_valid_state(state_index) {
            return Err(CodecError::invalid_config(format!(
                "State index {} is not a multiple of {} within the transition table",
                state_index, CODES_PER_STEP
            )));
        }

        Ok(Self {
            state_index,
            predicted_sample,
        })
    }

    /// Reset to the stream-start convention
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Combined step/nibble base index
    pub const fn state_index(&self) -> u16 {
        self.state_index
    }

    /// Quantizer step index (0..=88) encoded in the combined index
    pub fn step_index(&self) -> usize {
        usize::from(self.state_index) / CODES_PER_STEP
    }

    /// Last reconstructed sample
    pub const fn predicted_sample(&self) -> i16 {
        self.predicted_sample
    }

    /// Consume one nibble and return the reconstructed sample
    ///
    /// Only the low 4 bits of `nibble` are used.
    #[inline(always)]
    pub fn advance(&mut self, tables: &TransitionTables, nibble: u8) -> i16 {
        let key = usize::from(self.state_index) + usize::from(nibble & 0x0F);
        self.predicted_sample = clamp16(i32::from(self.predicted_sample) + tables.delta(key)) as i16;
        self.state_index = tables.next_state(key);
        self.predicted_sample
    }

    /// Choose the nibble that best reproduces `sample`, then advance with it
    ///
    /// All 16 codes are tried against the current state and the one with the
    /// smallest absolute reconstruction error wins; ties go to the lowest code.
    /// The state is then advanced exactly as a decoder will advance it.
    #[inline]
    pub fn quantize(&mut self, tables: &TransitionTables, sample: i16) -> u8 {
        let base = usize::from(self.state_index);
        let target = i32::from(sample);
        let predicted = i32::from(self.predicted_sample);

        let mut best_nibble = 0u8;
        let mut best_error = i32::MAX;
        for nibble in 0..CODES_PER_STEP as u8 {
            let candidate = clamp16(predicted + tables.delta(base + usize::from(nibble)));
            let error = (target - candidate).abs();
            if error < best_error {
                best_error = error;
                best_nibble = nibble;
            }
        }

        self.advance(tables, best_nibble);
        best_nibble
    }
}

/// Saturate to the 16-bit signed sample range
#[inline(always)]
pub fn clamp16(value: i32) -> i32 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX))
}
