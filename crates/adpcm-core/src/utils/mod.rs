//! Utility functions shared by the codec and container modules

pub mod pcm;
pub mod validation;

pub use pcm::{bytes_to_samples, samples_to_bytes};
pub use validation::{validate_channels, validate_output_capacity, validate_whole_units};
