//! ADPCM Transition Tables
//!
//! This module contains the two combined lookup tables that drive the codec:
//! a delta table and a next-state table, both indexed by
//! `state_index + nibble`.
//!
//! ## Performance
//!
//! Folding the step size, sign bit and clamped index update into a single key
//! leaves one table lookup per nibble and no branching beyond the final
//! sample saturation.
//!
//! ## Memory Usage
//!
//! - Delta table: 5696 bytes (1424 entries × 4 bytes)
//! - Next-state table: 2848 bytes (1424 entries × 2 bytes)
//!
//! ## Bounds
//!
//! Every next-state entry is `step_index * 16` with `step_index <= 88`, so any
//! key built from a reachable state plus a nibble in `0..=15` is below
//! [`TABLE_SIZE`]. States only ever come from this table (or from
//! [`TransitionTables::is_valid_state`]-checked input), which keeps the
//! invariant by construction.

use super::reference::{next_step_index, step_delta, STEP_COUNT};
use once_cell::sync::Lazy;
use tracing::debug;

/// Number of distinct 4-bit codes
pub const CODES_PER_STEP: usize = 16;

/// Number of entries in each transition table
pub const TABLE_SIZE: usize = STEP_COUNT * CODES_PER_STEP;

/// Immutable delta and next-state tables
#[derive(Clone, PartialEq, Eq)]
pub struct TransitionTables {
    delta: [i32; TABLE_SIZE],
    next_state: [u16; TABLE_SIZE],
}

/// Process-wide transition tables, built on first use
static TRANSITION_TABLES: Lazy<TransitionTables> = Lazy::new(TransitionTables::generate);

impl TransitionTables {
    /// Generate both tables from the IMA reference formulas
    fn generate() -> Self {
        let mut delta = [0i32; TABLE_SIZE];
        let mut next_state = [0u16; TABLE_SIZE];

        for step_index in 0..STEP_COUNT {
            for nibble in 0..CODES_PER_STEP as u8 {
                let key = step_index * CODES_PER_STEP + usize::from(nibble);
                delta[key] = step_delta(step_index, nibble);
                // at most 88 * 16 = 1408, always fits
                next_state[key] = (next_step_index(step_index, nibble) * CODES_PER_STEP) as u16;
            }
        }

        Self { delta, next_state }
    }

    /// Predictor delta for a combined key
    #[inline(always)]
    pub fn delta(&self, key: usize) -> i32 {
        self.delta[key]
    }

    /// Replacement state index for a combined key
    #[inline(always)]
    pub fn next_state(&self, key: usize) -> u16 {
        self.next_state[key]
    }

    /// The full delta table
    pub fn deltas(&self) -> &[i32; TABLE_SIZE] {
        &self.delta
    }

    /// The full next-state table
    pub fn next_states(&self) -> &[u16; TABLE_SIZE] {
        &self.next_state
    }

    /// Whether `state_index` is a value the next-state table can produce
    pub fn is_valid_state(state_index: u16) -> bool {
        let index = usize::from(state_index);
        index % CODES_PER_STEP == 0 && index < TABLE_SIZE
    }
}

impl std::fmt::Debug for TransitionTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionTables")
            .field("entries", &TABLE_SIZE)
            .finish()
    }
}

/// Shared reference to the process-wide tables
pub fn tables() -> &'static TransitionTables {
    &TRANSITION_TABLES
}

/// Build the tables ahead of the first decode
///
/// Calling this is optional; it moves the one-time generation cost out of the
/// first audio callback.
pub fn init_tables() {
    Lazy::force(&TRANSITION_TABLES);
    debug!("ADPCM transition tables initialized ({} entries)", TABLE_SIZE);
}
