//! Nibble packing
//!
//! Two 4-bit codes per byte, low nibble first.

/// Split a byte into its two codes, low nibble first
#[inline(always)]
pub fn unpack(byte: u8) -> [u8; 2] {
    [byte & 0x0F, byte >> 4]
}

/// Pack two codes into a byte; `low` lands in bits 0..=3, `high` in bits 4..=7
#[inline(always)]
pub fn pack(low: u8, high: u8) -> u8 {
    (low & 0x0F) | (high << 4)
}

/// Iterator over the codes of a byte stream, low nibble first
#[derive(Debug, Clone)]
pub struct Nibbles<'a> {
    bytes: std::slice::Iter<'a, u8>,
    pending: Option<u8>,
}

impl Iterator for Nibbles<'_> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        if let Some(high) = self.pending.take() {
            return Some(high);
        }
        let [low, high] = unpack(*self.bytes.next()?);
        self.pending = Some(high);
        Some(low)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bytes.len() * 2 + usize::from(self.pending.is_some());
        (len, Some(len))
    }
}

impl ExactSizeIterator for Nibbles<'_> {}

/// Iterate over the codes in `bytes`
pub fn nibbles(bytes: &[u8]) -> Nibbles<'_> {
    Nibbles {
        bytes: bytes.iter(),
        pending: None,
    }
}
