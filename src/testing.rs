//! Test fixtures: synthetic cover images and LSB embedding.

use crate::extraction::{BitDepth, ChannelSelection};
use crate::source::PixelGrid;

/// Deterministic pseudo-random RGBA grid.
pub(crate) fn noisy_grid(width: u32, height: u32, seed: u64) -> PixelGrid {
    let mut state = seed | 1;
    let data = (0..(width as usize) * (height as usize) * 4)
        .map(|_| {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect();
    PixelGrid::from_rgba(data, width, height).unwrap()
}

/// Hides `payload` in the low bits of a noisy cover `width` pixels wide.
///
/// Bits are written MSB-first in the same order the extractor reads
/// them. Every slot after the payload gets zero low bits, so the
/// extracted stream is the payload followed by NUL bytes.
pub(crate) fn embed_lsb(
    payload: &[u8],
    depth: BitDepth,
    channels: &ChannelSelection,
    width: u32,
) -> PixelGrid {
    let bits: Vec<u8> = payload
        .iter()
        .flat_map(|byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
        .collect();
    let per_slot = depth.bits() as usize;
    let slots_per_row = width as usize * channels.len();
    let slots = bits.len().div_ceil(per_slot);
    let height = slots.div_ceil(slots_per_row).max(1) as u32;

    let cover = noisy_grid(width, height, 0x5eed);
    let mut data = cover.as_rgba().to_vec();
    let mut values = bits.chunks(per_slot).map(|group| {
        let mut value = 0u8;
        for shift in 0..per_slot {
            value = (value << 1) | group.get(shift).copied().unwrap_or(0);
        }
        value
    });

    for pixel in data.chunks_exact_mut(4) {
        for channel in channels.channels() {
            let low = values.next().unwrap_or(0);
            let slot = &mut pixel[channel.index()];
            *slot = (*slot & !depth.mask()) | low;
        }
    }

    PixelGrid::from_rgba(data, width, height).unwrap()
}
