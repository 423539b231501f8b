//! RGBA pixel buffers consumed by the pipeline.

use super::error::RenderError;

/// Bytes per pixel in every buffer handled by the pipeline (R, G, B, A).
pub const BYTES_PER_PIXEL: usize = 4;

/// An interleaved RGBA image, validated on construction.
///
/// Source frames arrive in this form, and the resampler produces one at
/// character-grid resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes.
    ///
    /// Fails when either dimension is zero or `data.len() != width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyBuffer { width, height });
        }
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(RenderError::InvalidBuffer {
                width,
                height,
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

    /// Build a buffer from packed RGB triplets, with alpha set to opaque.
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> Result<Self, RenderError> {
        let pixels = width as usize * height as usize;
        if rgb.len() != pixels * 3 {
            return Err(RenderError::InvalidBuffer {
                width,
                height,
                expected: pixels * 3,
                actual: rgb.len(),
            });
        }
        let mut data = Vec::with_capacity(pixels * BYTES_PER_PIXEL);
        for px in rgb.chunks_exact(3) {
            data.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        Self::new(width, height, data)
    }

    /// A buffer where every pixel has the same color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            data: rgba.repeat(pixels),
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// RGBA sample at `(x, y)`. Coordinates must be in bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Resize in place for reuse as a scratch buffer, keeping the allocation.
    pub(crate) fn reset(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data
            .resize(width as usize * height as usize * BYTES_PER_PIXEL, 0);
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
