//! Resampling source frames down to the character grid.

use super::blur::gaussian_blur;
use super::buffer::{PixelBuffer, BYTES_PER_PIXEL};

/// Resample an RGBA frame to `grid_w x grid_h` cells.
///
/// Each cell is the average of all source pixels within its area. When a
/// cell covers no whole pixel (upscaling), the nearest source pixel is used.
/// A `blur_radius > 0` applies a Gaussian blur (sigma in cells) to the
/// resampled channels.
///
/// # Arguments
/// * `src` - Source frame
/// * `grid_w` - Desired output width in characters
/// * `grid_h` - Desired output height in characters
/// * `blur_radius` - Gaussian sigma in grid cells, 0 to disable
///
/// # Returns
/// An RGBA buffer with one pixel per character cell.
///
/// # Example
/// ```ignore
/// // Downsample a 640x480 frame to a 40x20 character grid
/// let cells = resample(&frame, 40, 20, 0.0);
/// assert_eq!(cells.pixel_count(), 40 * 20);
/// ```
pub fn resample(src: &PixelBuffer, grid_w: usize, grid_h: usize, blur_radius: f32) -> PixelBuffer {
    let mut out = PixelBuffer::default();
    let mut plane = Vec::new();
    let mut tmp = Vec::new();
    resample_into(src, grid_w, grid_h, blur_radius, &mut out, &mut plane, &mut tmp);
    out
}

/// Resample into an existing buffer to avoid allocation.
///
/// This is the allocation-free version of `resample` for use in hot paths;
/// `plane` and `tmp` are blur scratch buffers.
///
/// # Returns
/// The number of cells written.
pub fn resample_into(
    src: &PixelBuffer,
    grid_w: usize,
    grid_h: usize,
    blur_radius: f32,
    out: &mut PixelBuffer,
    plane: &mut Vec<f32>,
    tmp: &mut Vec<f32>,
) -> usize {
    out.reset(grid_w as u32, grid_h as u32);

    let img_width = src.width();
    let img_height = src.height();
    if grid_w == 0 || grid_h == 0 || img_width == 0 || img_height == 0 {
        return 0;
    }

    let cell_w = img_width as f64 / grid_w as f64;
    let cell_h = img_height as f64 / grid_h as f64;
    let data = src.data();
    let dst = out.data_mut();

    for cy in 0..grid_h {
        let start_y = (cy as f64 * cell_h) as u32;
        let end_y = (((cy + 1) as f64 * cell_h) as u32).min(img_height);

        for cx in 0..grid_w {
            let start_x = (cx as f64 * cell_w) as u32;
            let end_x = (((cx + 1) as f64 * cell_w) as u32).min(img_width);

            let mut sum = [0u64; BYTES_PER_PIXEL];
            let mut count = 0u64;

            for py in start_y..end_y {
                let row = py as usize * img_width as usize;
                for px in start_x..end_x {
                    let idx = (row + px as usize) * BYTES_PER_PIXEL;
                    for (c, s) in sum.iter_mut().enumerate() {
                        *s += data[idx + c] as u64;
                    }
                    count += 1;
                }
            }

            let out_idx = (cy * grid_w + cx) * BYTES_PER_PIXEL;
            if count > 0 {
                for c in 0..BYTES_PER_PIXEL {
                    dst[out_idx + c] = (sum[c] / count) as u8;
                }
            } else {
                let nx = start_x.min(img_width - 1);
                let ny = start_y.min(img_height - 1);
                dst[out_idx..out_idx + BYTES_PER_PIXEL].copy_from_slice(&src.pixel(nx, ny));
            }
        }
    }

    if blur_radius > 0.0 {
        blur_channels(dst, grid_w, grid_h, blur_radius, plane, tmp);
    }

    grid_w * grid_h
}

/// Blur each RGBA channel of an interleaved buffer independently.
fn blur_channels(
    dst: &mut [u8],
    width: usize,
    height: usize,
    sigma: f32,
    plane: &mut Vec<f32>,
    tmp: &mut Vec<f32>,
) {
    for c in 0..BYTES_PER_PIXEL {
        plane.clear();
        plane.extend(dst.chunks_exact(BYTES_PER_PIXEL).map(|px| px[c] as f32));

        gaussian_blur(plane, width, height, sigma, tmp);

        for (px, &v) in dst.chunks_exact_mut(BYTES_PER_PIXEL).zip(plane.iter()) {
            px[c] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
}
