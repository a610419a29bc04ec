//! # ADPCM-Core: Table-Driven 4-bit ADPCM Codec Library
//!
//! This library compresses 16-bit PCM audio to 4 bits per sample and back with
//! a table-driven ADPCM codec, and reads and writes the fixed-layout container
//! header that identifies and bounds a compressed stream.
//!
//! ## Features
//!
//! - **Table-driven decoding**: one delta lookup and one next-state lookup per nibble
//! - **Greedy encoder**: picks the code that best reproduces each sample
//! - **Multi-channel**: mono, stereo and up to 8 interleaved channels
//! - **Resumable sessions**: per-channel state can be saved and restored
//! - **Parallel batches**: independent streams decode concurrently on rayon
//!
//! ## Usage
//!
//! ```rust
//! use adpcm_core::{AudioCodec, CodecConfig, CodecFactory};
//!
//! // Create a stereo ADPCM codec
//! let mut codec = CodecFactory::create(CodecConfig::stereo())?;
//!
//! // Encode interleaved audio samples
//! let samples = vec![0i16; 160];
//! let encoded = codec.encode(&samples)?;
//! assert_eq!(encoded.len(), 80);
//!
//! // Decode back to samples
//! let decoded = codec.decode(&encoded)?;
//! assert_eq!(decoded.len(), samples.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Whole streams, header included:
//!
//! ```rust
//! use adpcm_core::container::{decode_stream, encode_stream};
//!
//! let stream = encode_stream(&[100, 200, 300, 400], 1)?;
//! let (header, samples) = decode_stream(&stream, 1)?;
//! assert_eq!(header.compressed_size, 2);
//! assert_eq!(samples.len(), 4);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod codecs;
pub mod container;
pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use codecs::adpcm::{AdpcmCodec, CodecState, CompressionSession, DecodeOutcome, EncodeOutcome};
pub use codecs::CodecFactory;
pub use container::{StreamHeader, HEADER_SIZE, TYPE_TAG};
pub use error::{CodecError, ErrorCategory, HeaderError, Result};
pub use types::{AudioCodec, CodecConfig, CodecInfo, CompressionType};

/// Version information for the codec library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Supported codec names
pub const SUPPORTED_CODECS: &[&str] = &["ADPCM"];

/// Initialize the codec library
///
/// Installs a default tracing subscriber if none is set and builds the
/// transition tables ahead of the first decode. It's safe to call multiple
/// times.
///
/// # Errors
///
/// Currently infallible; the signature leaves room for fallible setup.
pub fn init() -> Result<()> {
    // Initialize logging if not already done
    let _ = tracing_subscriber::fmt::try_init();

    // Initialize lookup tables
    codecs::adpcm::init_tables();

    tracing::info!("ADPCM-Core v{} initialized", VERSION);
    tracing::info!("Supported codecs: {:?}", SUPPORTED_CODECS);

    Ok(())
}

/// Get library information
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        supported_codecs: SUPPORTED_CODECS.to_vec(),
        table_entries: codecs::adpcm::TABLE_SIZE,
        max_channels: types::MAX_CHANNELS,
    }
}

/// Library information structure
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    /// Library version
    pub version: &'static str,
    /// List of supported codec names
    pub supported_codecs: Vec<&'static str>,
    /// Entries in each transition table
    pub table_entries: usize,
    /// Largest supported channel count
    pub max_channels: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert!(init().is_ok());
        assert!(init().is_ok());
    }

    #[test]
    fn test_info() {
        let info = info();
        assert_eq!(info.version, VERSION);
        assert_eq!(info.table_entries, 1424);
        assert_eq!(info.max_channels, 8);
    }

    #[test]
    fn test_supported_codecs() {
        assert_eq!(SUPPORTED_CODECS, CodecFactory::supported_codecs().as_slice());
    }
}
