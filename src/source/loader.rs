//! Image source abstraction.
//!
//! The extraction core only sees a [`PixelGrid`]. Sources hide how the
//! grid was obtained: decoded from a file, from an in-memory buffer, or
//! handed over already decoded.

use super::PixelGrid;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a pixel grid.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("image file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Trait for anything that can produce a pixel grid.
pub trait ImageSource {
    /// Decodes the source into an RGBA pixel grid.
    fn load(&self) -> Result<PixelGrid, SourceError>;

    /// Short human-readable description used in log lines.
    fn describe(&self) -> String;
}

/// An image file on disk, in any format the `image` crate understands.
#[derive(Debug, Clone)]
pub struct ImageFile {
    path: PathBuf,
}

impl ImageFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSource for ImageFile {
    fn load(&self) -> Result<PixelGrid, SourceError> {
        if !self.path.is_file() {
            return Err(SourceError::NotFound(self.path.clone()));
        }

        let image = image::open(&self.path)?;
        let grid = PixelGrid::from(image.to_rgba8());
        tracing::debug!(
            path = %self.path.display(),
            width = grid.width(),
            height = grid.height(),
            "Decoded image file"
        );
        Ok(grid)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// An encoded image held in memory (PNG, BMP, ...).
#[derive(Debug, Clone)]
pub struct EncodedImage {
    bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl ImageSource for EncodedImage {
    fn load(&self) -> Result<PixelGrid, SourceError> {
        let image = image::load_from_memory(&self.bytes)?;
        Ok(PixelGrid::from(image.to_rgba8()))
    }

    fn describe(&self) -> String {
        format!("<{} encoded bytes>", self.bytes.len())
    }
}

/// A grid that is already decoded.
#[derive(Debug, Clone)]
pub struct StaticGrid {
    grid: PixelGrid,
}

impl StaticGrid {
    pub fn new(grid: PixelGrid) -> Self {
        Self { grid }
    }
}

impl ImageSource for StaticGrid {
    fn load(&self) -> Result<PixelGrid, SourceError> {
        Ok(self.grid.clone())
    }

    fn describe(&self) -> String {
        format!("<{}x{} grid>", self.grid.width(), self.grid.height())
    }
}
