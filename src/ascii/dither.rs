//! Dithering: Floyd-Steinberg error diffusion and random noise.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use super::grid::LuminanceField;

/// Number of quantization steps used by Floyd-Steinberg.
pub const QUANT_LEVELS: f32 = 8.0;

/// Noise dithering perturbs each cell by a uniform value in `[-25, 25]`.
pub const NOISE_AMPLITUDE: f32 = 25.0;

/// Dithering algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DitherAlgo {
    /// Floyd-Steinberg error diffusion
    #[default]
    Floyd,
    /// Uniform random noise
    Noise,
}

impl DitherAlgo {
    pub fn name(&self) -> &'static str {
        match self {
            DitherAlgo::Floyd => "floyd",
            DitherAlgo::Noise => "noise",
        }
    }
}

/// Snap a value to the nearest of the fixed quantization levels.
#[inline]
pub fn quantize(value: f32) -> f32 {
    (value / 255.0 * QUANT_LEVELS).round() * (255.0 / QUANT_LEVELS)
}

/// Dither a luminance field with the chosen algorithm.
///
/// `rng` is only drawn from by [`DitherAlgo::Noise`].
pub fn apply<R: RngCore + ?Sized>(field: &mut LuminanceField, algo: DitherAlgo, rng: &mut R) {
    match algo {
        DitherAlgo::Floyd => {
            floyd_steinberg(field);
        }
        DitherAlgo::Noise => add_noise(field, rng),
    }
}

/// Floyd-Steinberg dithering, clamped to `[0, 255]` afterwards.
///
/// # Returns
/// The total quantization error diffused to neighbors.
pub fn floyd_steinberg(field: &mut LuminanceField) -> f32 {
    let width = field.width();
    let height = field.height();
    let total = diffuse_error(field.values_mut(), width, height);
    field.clamp();
    total
}

/// Raw error diffusion over a row-major buffer, without clamping.
///
/// Scans rows top-to-bottom and columns left-to-right, skipping both
/// outermost columns and the last row so every processed cell has all four
/// neighbors. Error diffusion pattern:
/// ```text
///        [*] 7/16
///   3/16 5/16 1/16
/// ```
/// The scan order is part of the result; this must stay sequential.
///
/// # Returns
/// The sum of `old - new` over all processed cells, which equals the total
/// error added to neighbors.
pub fn diffuse_error(values: &mut [f32], width: usize, height: usize) -> f32 {
    if width < 3 || height < 2 {
        return 0.0;
    }
    debug_assert_eq!(values.len(), width * height);

    let mut total = 0.0;
    for y in 0..height - 1 {
        for x in 1..width - 1 {
            let idx = y * width + x;
            let old = values[idx];
            let new = quantize(old);
            values[idx] = new;
            let error = old - new;
            total += error;

            values[idx + 1] += error * 7.0 / 16.0;
            values[idx + width - 1] += error * 3.0 / 16.0;
            values[idx + width] += error * 5.0 / 16.0;
            values[idx + width + 1] += error * 1.0 / 16.0;
        }
    }
    total
}

/// Add uniform noise in `[-25, 25]` to every cell, then clamp.
pub fn add_noise<R: RngCore + ?Sized>(field: &mut LuminanceField, rng: &mut R) {
    for value in field.values_mut() {
        let noise = rng.gen_range(-NOISE_AMPLITUDE..=NOISE_AMPLITUDE);
        *value = (*value + noise).clamp(0.0, 255.0);
    }
}
