//! Edge detection: Sobel gradient magnitude and difference of Gaussians.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::blur::gaussian_blur;
use super::grid::{EdgeMask, LuminanceField};

/// Default blur sigma for the narrower Gaussian in DoG.
pub const DEFAULT_DOG_SIGMA: f32 = 1.0;

/// Default ratio between the wider and narrower DoG sigmas.
pub const DEFAULT_DOG_SIGMA_RATIO: f32 = 1.6;

/// Sobel kernels.
/// Gx detects vertical edges (horizontal gradient),
/// Gy detects horizontal edges (vertical gradient).
const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Edge detection method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMethod {
    #[default]
    None,
    Sobel,
    /// Difference of Gaussians
    Dog,
}

impl EdgeMethod {
    pub fn name(&self) -> &'static str {
        match self {
            EdgeMethod::None => "none",
            EdgeMethod::Sobel => "sobel",
            EdgeMethod::Dog => "dog",
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, EdgeMethod::None)
    }
}

/// Resolved edge-detection parameters for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeParams {
    pub method: EdgeMethod,
    pub threshold: f32,
    pub dog_sigma: f32,
    pub dog_sigma_ratio: f32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            method: EdgeMethod::None,
            threshold: 100.0,
            dog_sigma: DEFAULT_DOG_SIGMA,
            dog_sigma_ratio: DEFAULT_DOG_SIGMA_RATIO,
        }
    }
}

/// Scratch planes for the DoG blurs.
#[derive(Debug, Default)]
pub struct EdgeScratch {
    narrow: Vec<f32>,
    wide: Vec<f32>,
    tmp: Vec<f32>,
}

/// Detect edges in a luminance field.
///
/// Returns `None` when the method is [`EdgeMethod::None`].
pub fn detect(field: &LuminanceField, params: &EdgeParams) -> Option<EdgeMask> {
    let mut mask = EdgeMask::default();
    let mut scratch = EdgeScratch::default();
    detect_into(field, params, &mut mask, &mut scratch).then_some(mask)
}

/// Detect edges into an existing mask.
///
/// # Returns
/// `true` when a mask was produced, `false` when detection is disabled.
pub fn detect_into(
    field: &LuminanceField,
    params: &EdgeParams,
    mask: &mut EdgeMask,
    scratch: &mut EdgeScratch,
) -> bool {
    match params.method {
        EdgeMethod::None => false,
        EdgeMethod::Sobel => {
            sobel_into(field, params.threshold, mask);
            true
        }
        EdgeMethod::Dog => {
            let sigma_narrow = params.dog_sigma;
            let sigma_wide = params.dog_sigma * params.dog_sigma_ratio;
            dog_into(field, sigma_narrow, sigma_wide, params.threshold, mask, scratch);
            true
        }
    }
}

/// Sobel gradient magnitude at interior cell `(x, y)`.
#[inline]
pub fn sobel_magnitude(field: &LuminanceField, x: usize, y: usize) -> f32 {
    let mut gx = 0.0;
    let mut gy = 0.0;
    for (ky, (row_x, row_y)) in SOBEL_X.iter().zip(SOBEL_Y.iter()).enumerate() {
        for kx in 0..3 {
            let val = field.get(x + kx - 1, y + ky - 1);
            gx += val * row_x[kx];
            gy += val * row_y[kx];
        }
    }
    (gx * gx + gy * gy).sqrt()
}

/// Mark interior cells whose Sobel magnitude exceeds `threshold`.
///
/// Border cells, where the 3x3 window would leave the grid, stay unmarked.
pub fn sobel_into(field: &LuminanceField, threshold: f32, mask: &mut EdgeMask) {
    let width = field.width();
    let height = field.height();
    mask.reset(width, height);
    if width < 3 || height < 3 {
        return;
    }

    mask.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .skip(1)
        .take(height - 2)
        .for_each(|(y, row)| {
            for (x, marked) in row.iter_mut().enumerate().take(width - 1).skip(1) {
                *marked = sobel_magnitude(field, x, y) > threshold;
            }
        });
}

/// Mark cells where two Gaussian blurs of the field differ by more than `threshold`.
///
/// `sigma_narrow` must be smaller than `sigma_wide`.
pub fn dog_into(
    field: &LuminanceField,
    sigma_narrow: f32,
    sigma_wide: f32,
    threshold: f32,
    mask: &mut EdgeMask,
    scratch: &mut EdgeScratch,
) {
    let width = field.width();
    let height = field.height();
    mask.reset(width, height);
    if width == 0 || height == 0 {
        return;
    }

    scratch.narrow.clear();
    scratch.narrow.extend_from_slice(field.values());
    gaussian_blur(&mut scratch.narrow, width, height, sigma_narrow, &mut scratch.tmp);

    scratch.wide.clear();
    scratch.wide.extend_from_slice(field.values());
    gaussian_blur(&mut scratch.wide, width, height, sigma_wide, &mut scratch.tmp);

    let narrow = &scratch.narrow;
    let wide = &scratch.wide;
    mask.as_mut_slice()
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, marked)| {
            *marked = (narrow[i] - wide[i]).abs() > threshold;
        });
}
