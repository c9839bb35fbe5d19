//! Image input and pixel grid handling.
//!
//! This module wraps the `image` crate behind a small trait so the rest
//! of the crate only deals with RGBA pixel grids. Format-specific
//! decoding stays here.

mod grid;
mod loader;

pub use grid::{GridError, PixelGrid, CHANNELS_PER_PIXEL};
pub use loader::{EncodedImage, ImageFile, ImageSource, SourceError, StaticGrid};
