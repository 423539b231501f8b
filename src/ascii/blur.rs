//! Separable Gaussian blur over single-channel float planes.

/// Samples used to estimate the weight of a long kernel tail.
const TAIL_SAMPLES: usize = 1024;

/// Build a normalized 1D Gaussian kernel with radius `ceil(3 * sigma)`.
///
/// The radius is capped at `max_radius`. With edge clamping every tap past
/// `max_radius` lands on the same edge sample, so the weight of the cut taps
/// is folded into the two outermost ones.
///
/// Returns `[1.0]` for non-positive sigma.
pub fn gaussian_kernel(sigma: f32, max_radius: usize) -> Vec<f32> {
    if sigma <= 0.0 || !sigma.is_finite() {
        return vec![1.0];
    }

    let sigma = sigma as f64;
    let full_radius = (3.0 * sigma).ceil();
    let radius = full_radius.min(max_radius as f64) as usize;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let weight = |i: f64| (-(i * i) / two_sigma_sq).exp();

    let mut kernel: Vec<f64> = (0..=2 * radius)
        .map(|k| weight(k as f64 - radius as f64))
        .collect();

    if full_radius > radius as f64 {
        let tail = tail_weight(radius as f64 + 1.0, full_radius, weight);
        kernel[0] += tail;
        kernel[2 * radius] += tail;
    }

    let sum: f64 = kernel.iter().sum();
    kernel.iter().map(|&k| (k / sum) as f32).collect()
}

/// Sum of `weight(i)` for integer `i` in `start..=end`.
///
/// Long ranges are integrated with a fixed number of midpoint samples.
fn tail_weight(start: f64, end: f64, weight: impl Fn(f64) -> f64) -> f64 {
    let count = end - start + 1.0;
    if count <= TAIL_SAMPLES as f64 {
        return (0..count as usize).map(|i| weight(start + i as f64)).sum();
    }
    let step = count / TAIL_SAMPLES as f64;
    (0..TAIL_SAMPLES)
        .map(|i| weight(start - 0.5 + (i as f64 + 0.5) * step) * step)
        .sum()
}

/// Blur a `width x height` plane in place with a Gaussian of `sigma`.
///
/// Samples outside the plane are clamped to the nearest edge. `tmp` is a
/// scratch buffer reused between calls.
pub fn gaussian_blur(values: &mut [f32], width: usize, height: usize, sigma: f32, tmp: &mut Vec<f32>) {
    if width == 0 || height == 0 || sigma <= 0.0 {
        return;
    }
    debug_assert_eq!(values.len(), width * height);

    let row_kernel = gaussian_kernel(sigma, width - 1);
    let col_kernel = gaussian_kernel(sigma, height - 1);
    let row_radius = (row_kernel.len() / 2) as isize;
    let col_radius = (col_kernel.len() / 2) as isize;

    tmp.clear();
    tmp.resize(values.len(), 0.0);

    // Horizontal pass: values -> tmp
    for y in 0..height {
        let row = &values[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = 0.0;
            for (k, weight) in row_kernel.iter().enumerate() {
                let sx = (x as isize + k as isize - row_radius).clamp(0, width as isize - 1) as usize;
                acc += row[sx] * weight;
            }
            tmp[y * width + x] = acc;
        }
    }

    // Vertical pass: tmp -> values
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for (k, weight) in col_kernel.iter().enumerate() {
                let sy = (y as isize + k as isize - col_radius).clamp(0, height as isize - 1) as usize;
                acc += tmp[sy * width + x] * weight;
            }
            values[y * width + x] = acc;
        }
    }
}
