//! Grayscale conversion and tone mapping (brightness, contrast, invert).

use rayon::prelude::*;

use super::buffer::{PixelBuffer, BYTES_PER_PIXEL};
use super::grid::LuminanceField;

/// The contrast formula is singular at this value.
pub const CONTRAST_LIMIT: f32 = 259.0;

/// Minimum distance kept between the contrast setting and the singularity.
pub const CONTRAST_GUARD: f32 = 0.01;

/// ITU-R BT.601 luminance: `Y = 0.299*R + 0.587*G + 0.114*B`.
///
/// Coefficients are applied as integers scaled by 1000 so that pure white
/// lands on exactly 255.0.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    (299 * r as u32 + 587 * g as u32 + 114 * b as u32) as f32 / 1000.0
}

/// Contrast multiplier for a contrast setting in `(-259, 259)`.
///
/// `factor = 259 * (c + 255) / (255 * (259 - c))`. Settings closer to the
/// singularity than [`CONTRAST_GUARD`] are pulled back.
pub fn contrast_factor(contrast: f32) -> f32 {
    let max = CONTRAST_LIMIT - CONTRAST_GUARD;
    let c = contrast.clamp(-max, max);
    (259.0 * (c + 255.0)) / (255.0 * (259.0 - c))
}

/// Brightness/contrast/invert parameters, resolved once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneCurve {
    pub brightness: f32,
    pub contrast_factor: f32,
    pub invert: bool,
}

impl Default for ToneCurve {
    fn default() -> Self {
        Self::new(0.0, 0.0, false)
    }
}

impl ToneCurve {
    pub fn new(brightness: f32, contrast: f32, invert: bool) -> Self {
        Self {
            brightness,
            contrast_factor: contrast_factor(contrast),
            invert,
        }
    }

    /// Map one luminance value, clamped to `[0, 255]`.
    #[inline]
    pub fn apply(&self, lum: f32) -> f32 {
        let lum = if self.invert { 255.0 - lum } else { lum };
        (self.contrast_factor * (lum - 128.0) + 128.0 + self.brightness).clamp(0.0, 255.0)
    }
}

/// Convert resampled cells to a tone-mapped luminance field.
///
/// # Example
/// ```ignore
/// let field = tone_map(&cells, &ToneCurve::default());
/// assert_eq!(field.values().len(), cells.pixel_count());
/// ```
pub fn tone_map(cells: &PixelBuffer, tone: &ToneCurve) -> LuminanceField {
    let mut field = LuminanceField::default();
    tone_map_into(cells, tone, &mut field);
    field
}

/// Tone-map into an existing field, reusing its allocation.
///
/// Rows are processed in parallel; every cell is independent.
///
/// # Returns
/// The number of cells written.
pub fn tone_map_into(cells: &PixelBuffer, tone: &ToneCurve, field: &mut LuminanceField) -> usize {
    let width = cells.width() as usize;
    let height = cells.height() as usize;
    field.reset(width, height);
    if width == 0 || height == 0 {
        return 0;
    }

    field
        .values_mut()
        .par_chunks_mut(width)
        .zip(cells.data().par_chunks(width * BYTES_PER_PIXEL))
        .for_each(|(row, pixels)| {
            for (value, px) in row.iter_mut().zip(pixels.chunks_exact(BYTES_PER_PIXEL)) {
                *value = tone.apply(luminance(px[0], px[1], px[2]));
            }
        });

    width * height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_contrast_factor_is_one() {
        assert_eq!(contrast_factor(0.0), 1.0);
    }

    #[test]
    fn contrast_factor_is_finite_at_singularity() {
        let f = contrast_factor(CONTRAST_LIMIT);
        assert!(f.is_finite());
        assert!(f > 1000.0);
    }

    #[test]
    fn white_is_exactly_255() {
        assert_eq!(luminance(255, 255, 255), 255.0);
        assert_eq!(ToneCurve::default().apply(255.0), 255.0);
    }

    #[test]
    fn invert_flips_before_contrast() {
        let tone = ToneCurve::new(0.0, 0.0, true);
        assert_eq!(tone.apply(0.0), 255.0);
        assert_eq!(tone.apply(255.0), 0.0);
    }

    #[test]
    fn brightness_offsets_and_clamps() {
        let tone = ToneCurve::new(50.0, 0.0, false);
        assert_eq!(tone.apply(100.0), 150.0);
        assert_eq!(tone.apply(250.0), 255.0);
        let tone = ToneCurve::new(-255.0, 0.0, false);
        assert_eq!(tone.apply(200.0), 0.0);
    }

    #[test]
    fn high_contrast_pushes_away_from_midpoint() {
        let tone = ToneCurve::new(0.0, 128.0, false);
        assert!(tone.apply(100.0) < 100.0);
        assert!(tone.apply(160.0) > 160.0);
        assert_eq!(tone.apply(128.0), 128.0);
    }
}
