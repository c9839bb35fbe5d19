//! Pixel grid type handed from the image decoder to the extraction stage.

use image::RgbaImage;
use thiserror::Error;

/// Number of channel values stored per pixel (R, G, B, A).
pub const CHANNELS_PER_PIXEL: usize = 4;

/// Errors raised when a grid is built from a raw buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("pixel buffer holds {actual} bytes, expected {expected} for the given dimensions")]
    LengthMismatch { expected: usize, actual: usize },
}

/// A decoded image normalized to RGBA8.
///
/// Pixels are stored row-major (y outer, x inner), four channel
/// values per pixel. Dimensions never change after construction.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelGrid {
    /// Interleaved RGBA channel values.
    data: Vec<u8>,
    /// Grid width in pixels.
    width: u32,
    /// Grid height in pixels.
    height: u32,
}

impl PixelGrid {
    /// Creates a grid from an interleaved RGBA buffer.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Result<Self, GridError> {
        let expected = (width as usize) * (height as usize) * CHANNELS_PER_PIXEL;
        if data.len() != expected {
            return Err(GridError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a grid from per-pixel tuples.
    pub fn from_pixels(pixels: &[[u8; 4]], width: u32, height: u32) -> Result<Self, GridError> {
        let data = pixels.iter().flatten().copied().collect();
        Self::from_rgba(data, width, height)
    }

    /// Returns the grid width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the grid height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the total number of pixels (width * height).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Returns the raw interleaved RGBA buffer.
    #[inline]
    pub fn as_rgba(&self) -> &[u8] {
        &self.data
    }

    /// Iterates pixels in scan order.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(CHANNELS_PER_PIXEL)
    }

    /// Returns the pixel at `(x, y)`, if inside the grid.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = ((y as usize) * (self.width as usize) + x as usize) * CHANNELS_PER_PIXEL;
        let px = &self.data[start..start + CHANNELS_PER_PIXEL];
        Some([px[0], px[1], px[2], px[3]])
    }
}

impl From<RgbaImage> for PixelGrid {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            data: image.into_raw(),
            width,
            height,
        }
    }
}

impl std::fmt::Debug for PixelGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixel_bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = PixelGrid::from_rgba(vec![0u8; 3 * 2 * 4], 3, 2).unwrap();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.pixel_count(), 6);
        assert_eq!(grid.pixels().count(), 6);
    }

    #[test]
    fn test_grid_invalid_size() {
        let result = PixelGrid::from_rgba(vec![0u8; 10], 3, 2);

        assert_eq!(
            result,
            Err(GridError::LengthMismatch {
                expected: 24,
                actual: 10
            })
        );
    }

    #[test]
    fn test_pixels_are_row_major() {
        let pixels = [[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 14, 15, 16]];
        let grid = PixelGrid::from_pixels(&pixels, 2, 2).unwrap();

        // (x=1, y=0) is the second pixel, (x=0, y=1) the third
        assert_eq!(grid.pixel(1, 0), Some([5, 6, 7, 8]));
        assert_eq!(grid.pixel(0, 1), Some([9, 10, 11, 12]));
        assert_eq!(grid.pixel(2, 0), None);
    }

    #[test]
    fn test_from_rgba_image() {
        let image = RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 255]));
        let grid = PixelGrid::from(image);

        assert_eq!(grid.pixel_count(), 12);
        assert!(grid.pixels().all(|px| px == [10, 20, 30, 255]));
    }
}
