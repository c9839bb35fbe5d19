//! Bit-plane extraction.
//!
//! This module reads the low-order bits of the selected channels of
//! every pixel and packs them into a byte stream. Pixels are visited in
//! row-major order; within a pixel, channels follow the selection order.
//! Trailing bits that do not fill a byte are dropped.

mod bitstream;
mod packer;
mod selection;

pub use bitstream::ByteStream;
pub use packer::BitPacker;
pub use selection::{BitDepth, Channel, ChannelSelection};

use crate::source::PixelGrid;
use thiserror::Error;

/// Errors that can occur while configuring extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("no usable channels in selection {0:?} (expected letters from RGBA)")]
    InvalidChannelSelection(String),
    #[error("bit depth {0} out of range (must be 1-4)")]
    InvalidBitDepth(u8),
}

/// Extracts packed LSB data from pixel grids.
///
/// Holds the bit depth and channel selection for a run; extraction
/// itself is a pure function of the grid.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    depth: BitDepth,
    channels: ChannelSelection,
}

impl Extractor {
    pub fn new(depth: BitDepth, channels: ChannelSelection) -> Self {
        Self { depth, channels }
    }

    /// Builds an extractor from raw user values.
    pub fn from_parts(bits: u8, channels: &str) -> Result<Self, ExtractionError> {
        Ok(Self::new(BitDepth::new(bits)?, ChannelSelection::parse(channels)?))
    }

    /// Returns the bit depth.
    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    /// Returns the channel selection.
    pub fn channels(&self) -> &ChannelSelection {
        &self.channels
    }

    /// Returns the number of bytes [`extract`](Self::extract) yields for a
    /// grid with `pixel_count` pixels.
    pub fn output_len(&self, pixel_count: usize) -> usize {
        self.total_bits(pixel_count) / 8
    }

    fn total_bits(&self, pixel_count: usize) -> usize {
        pixel_count * self.channels.len() * self.depth.bits() as usize
    }

    /// Extracts the selected bit planes of `grid` as packed bytes.
    pub fn extract(&self, grid: &PixelGrid) -> ByteStream {
        let width = self.depth.bits();
        let mask = self.depth.mask();
        let mut packer = BitPacker::with_bit_capacity(self.total_bits(grid.pixel_count()));

        for pixel in grid.pixels() {
            for channel in self.channels.channels() {
                packer.push(pixel[channel.index()] & mask, width);
            }
        }

        let (bytes, discarded) = packer.finish();
        tracing::debug!(
            bytes = bytes.len(),
            discarded_bits = discarded,
            depth = width,
            channels = %self.channels,
            "Extracted bit planes"
        );
        ByteStream::from_bytes(bytes, discarded)
    }
}

/// Extracts the low `depth` bits of the selected channels of `grid`.
pub fn extract(grid: &PixelGrid, depth: BitDepth, channels: &ChannelSelection) -> ByteStream {
    Extractor::new(depth, channels.clone()).extract(grid)
}
