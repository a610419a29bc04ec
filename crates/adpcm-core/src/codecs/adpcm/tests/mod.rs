//! ADPCM Test Modules
//!
//! This module organizes the test suite for the ADPCM codec implementation.

pub mod utils;

mod encoder_tests;
