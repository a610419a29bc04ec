//! Little-endian 16-bit PCM byte conversion
//!
//! The codec works on `i16` samples; files and device buffers carry them as
//! little-endian byte pairs.

/// Bytes per PCM sample
pub const BYTES_PER_SAMPLE: usize = 2;

/// Write `samples` into `dst` as little-endian bytes
///
/// Stops at whichever runs out first and returns the number of samples written.
pub fn write_samples_le(samples: &[i16], dst: &mut [u8]) -> usize {
    let mut written = 0;
    for (sample, out) in samples.iter().zip(dst.chunks_exact_mut(BYTES_PER_SAMPLE)) {
        out.copy_from_slice(&sample.to_le_bytes());
        written += 1;
    }
    written
}

/// Read little-endian samples from `src` into `dst`
///
/// A trailing odd byte is ignored. Returns the number of samples read.
pub fn read_samples_le(src: &[u8], dst: &mut [i16]) -> usize {
    let mut read = 0;
    for (bytes, out) in src.chunks_exact(BYTES_PER_SAMPLE).zip(dst.iter_mut()) {
        *out = i16::from_le_bytes([bytes[0], bytes[1]]);
        read += 1;
    }
    read
}

/// Convert samples to a little-endian byte vector
pub fn samples_to_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|sample| sample.to_le_bytes()).collect()
}

/// Convert little-endian bytes to samples, ignoring a trailing odd byte
pub fn bytes_to_samples(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(BYTES_PER_SAMPLE)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}
