//! MSB-first bit packing.

/// Accumulates small bit groups and packs them into whole bytes.
///
/// Each pushed value contributes its low `width` bits, most significant
/// first. Bits that never fill a complete byte are dropped by
/// [`finish`](BitPacker::finish); nothing is padded.
#[derive(Debug, Default)]
pub struct BitPacker {
    /// Completed bytes.
    out: Vec<u8>,
    /// Partially filled byte.
    buffer: u8,
    /// Number of bits currently held in `buffer` (0..8).
    pending: u8,
}

impl BitPacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a packer sized for the given total bit count.
    pub fn with_bit_capacity(bits: usize) -> Self {
        Self {
            out: Vec::with_capacity(bits / 8),
            ..Self::default()
        }
    }

    /// Appends the low `width` bits of `value`, most significant first.
    ///
    /// Widths above 8 are capped at 8.
    pub fn push(&mut self, value: u8, width: u8) {
        for shift in (0..width.min(8)).rev() {
            self.buffer = (self.buffer << 1) | ((value >> shift) & 1);
            self.pending += 1;

            if self.pending == 8 {
                self.out.push(self.buffer);
                self.buffer = 0;
                self.pending = 0;
            }
        }
    }

    /// Returns the number of complete bytes packed so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    /// Returns true if no complete byte has been packed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Returns the packed bytes and the number of trailing bits dropped.
    pub fn finish(self) -> (Vec<u8>, u8) {
        (self.out, self.pending)
    }
}
