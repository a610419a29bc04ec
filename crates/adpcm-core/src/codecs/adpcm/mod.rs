//! 4-bit Table-Driven ADPCM Codec
//!
//! This module implements a lossy, stateful 4-bit-per-sample ADPCM codec for
//! 16-bit PCM. Every nibble is decoded with one lookup into each of two
//! combined transition tables, keyed by `state_index + nibble`.
//!
//! # Architecture
//!
//! The implementation is split into several modules:
//! - `reference`: IMA step and index tables plus the branching formulas
//! - `tables`: combined delta and next-state tables, built once and shared
//! - `state`: per-channel predictor state, decode step and greedy quantizer
//! - `nibble`: low-nibble-first packing
//! - `channels`: N-channel nibble rotation, mono as the N = 1 case
//! - `session`: per-stream session and the public encode/decode calls
//! - `codec`: `AudioCodec` implementation
//! - `batch`: parallel processing of independent streams
//!
//! # Bit Compatibility
//!
//! Encoder and decoder must start from the same state and use the same
//! tables. Decoding is deterministic: the same payload and starting state
//! always produce the same samples on every platform.

pub mod batch;
pub mod channels;
pub mod codec;
pub mod nibble;
pub mod reference;
pub mod session;
pub mod state;
pub mod tables;

#[cfg(test)]
mod tests;

// Re-export the main codec types
pub use codec::AdpcmCodec;
pub use session::{CompressionSession, DecodeOutcome, EncodeOutcome};
pub use state::CodecState;
pub use tables::{init_tables, tables, TransitionTables, TABLE_SIZE};
