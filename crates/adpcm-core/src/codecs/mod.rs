//! Codec implementations and factory

use crate::container::StreamHeader;
use crate::error::{CodecError, Result};
use crate::types::{AudioCodec, CodecConfig, CompressionType};
use tracing::debug;

// Codec implementations
pub mod adpcm;

/// Codec factory for creating codec instances
pub struct CodecFactory;

impl CodecFactory {
    /// Create a codec instance from configuration
    pub fn create(config: CodecConfig) -> Result<Box<dyn AudioCodec>> {
        // Validate configuration first
        config.validate()?;

        debug!("Factory creating {} codec", config.compression_type);

        match config.compression_type {
            CompressionType::Adpcm => {
                let codec = adpcm::AdpcmCodec::new(config)?;
                Ok(Box::new(codec))
            }
        }
    }

    /// Create a codec by name
    pub fn create_by_name(name: &str, config: CodecConfig) -> Result<Box<dyn AudioCodec>> {
        let compression_type = match name.to_uppercase().as_str() {
            "ADPCM" => CompressionType::Adpcm,
            _ => {
                return Err(CodecError::invalid_config(format!(
                    "Unknown codec name: {}",
                    name
                )))
            }
        };

        let config = CodecConfig {
            compression_type,
            ..config
        };

        Self::create(config)
    }

    /// Create a codec able to decode the payload behind `header`
    ///
    /// The header does not carry a channel count, so the caller supplies it.
    pub fn for_header(header: &StreamHeader, channels: u8) -> Result<Box<dyn AudioCodec>> {
        Self::create(CodecConfig::from_header(header, channels))
    }

    /// Get all supported codec names
    pub fn supported_codecs() -> Vec<&'static str> {
        vec![CompressionType::Adpcm.name()]
    }

    /// Check if a codec is supported
    pub fn is_supported(name: &str) -> bool {
        Self::supported_codecs().contains(&name.to_uppercase().as_str())
    }
}
