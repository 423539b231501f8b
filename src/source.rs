//! Still-image frame source for the CLI.

use std::path::{Path, PathBuf};

use crate::ascii::{PixelBuffer, RenderError};

/// Errors that can occur when loading a frame.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to load image '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image '{}' is unusable: {source}", path.display())]
    Buffer {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
}

/// Decode an image file into an RGBA pixel buffer.
pub fn load_image(path: &Path) -> Result<PixelBuffer, SourceError> {
    let rgba = image::open(path)
        .map_err(|e| SourceError::Decode {
            path: path.to_path_buf(),
            source: e,
        })?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("Loaded {} ({}x{})", path.display(), width, height);
    PixelBuffer::new(width, height, rgba.into_raw()).map_err(|e| SourceError::Buffer {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Decode every image, failing on the first bad one.
pub fn load_images(paths: &[PathBuf]) -> Result<Vec<PixelBuffer>, SourceError> {
    paths.iter().map(|p| load_image(p)).collect()
}
