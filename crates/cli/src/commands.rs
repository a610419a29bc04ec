//! File-level encode, decode and inspect operations

use std::fmt;
use std::fs;
use std::path::Path;

use adpcm_core::container::{decode_stream, encode_stream, StreamHeader, HEADER_SIZE};
use adpcm_core::utils::{bytes_to_samples, samples_to_bytes};
use adpcm_core::CompressionSession;
use adpcm_core::CodecConfig;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// What an encode or decode run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub action: &'static str,
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub samples: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} samples: {} bytes in, {} bytes out",
            self.action, self.samples, self.input_bytes, self.output_bytes
        )
    }
}

/// Header fields plus a payload consistency check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    pub header: StreamHeader,
    pub payload_bytes: usize,
}

impl InspectReport {
    pub fn payload_matches(&self) -> bool {
        self.payload_bytes == self.header.compressed_size as usize
    }

    /// PCM bytes the payload would actually decode to
    pub fn decodable_pcm_bytes(&self) -> usize {
        self.payload_bytes * 4
    }
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = String::from_utf8_lossy(&self.header.type_tag);
        writeln!(f, "type tag:          {}", tag.trim_end_matches('\0'))?;
        writeln!(f, "compression:       {} ({})", self.header.compression_type, self.header.compression_type.to_u32())?;
        writeln!(f, "source bit size:   {}", self.header.source_bit_size)?;
        writeln!(f, "compressed size:   {}", self.header.compressed_size)?;
        writeln!(f, "uncompressed size: {} ({} samples)", self.header.uncompressed_size, self.header.sample_count())?;
        write!(
            f,
            "payload:           {} bytes ({}, decodes to {} PCM bytes)",
            self.payload_bytes,
            if self.payload_matches() { "ok" } else { "MISMATCH" },
            self.decodable_pcm_bytes()
        )
    }
}

/// Compress a raw s16le PCM file into a stream file
pub fn encode_file(input: &Path, output: &Path, channels: u8) -> Result<Summary> {
    let pcm = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    if pcm.len() % 2 != 0 {
        warn!("Ignoring trailing odd byte in {}", input.display());
    }

    let mut samples = bytes_to_samples(&pcm);
    let unit = CompressionSession::new(CodecConfig::mono().with_channels(channels))?.unit_samples();
    let whole = samples.len() / unit * unit;
    if whole < samples.len() {
        warn!(
            "Dropping {} trailing sample(s) that do not fill a {}-channel unit",
            samples.len() - whole,
            channels
        );
        samples.truncate(whole);
    }

    let stream = encode_stream(&samples, channels)?;
    fs::write(output, &stream).with_context(|| format!("writing {}", output.display()))?;
    info!("Encoded {} into {}", input.display(), output.display());

    Ok(Summary {
        action: "encoded",
        input_bytes: pcm.len(),
        output_bytes: stream.len(),
        samples: samples.len(),
    })
}

/// Expand a stream file into raw s16le PCM
pub fn decode_file(input: &Path, output: &Path, channels: u8) -> Result<Summary> {
    let stream = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let (_, samples) = decode_stream(&stream, channels)
        .with_context(|| format!("decoding {}", input.display()))?;

    let pcm = samples_to_bytes(&samples);
    fs::write(output, &pcm).with_context(|| format!("writing {}", output.display()))?;
    info!("Decoded {} into {}", input.display(), output.display());

    Ok(Summary {
        action: "decoded",
        input_bytes: stream.len(),
        output_bytes: pcm.len(),
        samples: samples.len(),
    })
}

/// Read a stream file's header without decoding it
pub fn inspect_file(input: &Path) -> Result<InspectReport> {
    let stream = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let header = StreamHeader::parse(&stream)
        .with_context(|| format!("parsing header of {}", input.display()))?;

    Ok(InspectReport {
        header,
        payload_bytes: stream.len() - HEADER_SIZE,
    })
}
