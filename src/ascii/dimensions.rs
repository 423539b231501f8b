//! Character-grid dimensions for aspect-ratio-correct rendering.

/// Width/height ratio of a glyph cell.
/// Glyphs are taller than wide, so a square image needs fewer rows than columns.
pub const CELL_ASPECT: f64 = 0.55;

/// Calculate the character grid for an image at the configured column count.
///
/// Rows are `round(img_height / img_width * ascii_width * 0.55)`, never less
/// than one.
///
/// # Example
/// ```ignore
/// // A 640x480 (4:3) frame at 80 columns
/// let (w, h) = grid_dimensions(640, 480, 80);
/// assert_eq!((w, h), (80, 33));
/// ```
pub fn grid_dimensions(img_width: u32, img_height: u32, ascii_width: u32) -> (usize, usize) {
    grid_dimensions_with_aspect(img_width, img_height, ascii_width, CELL_ASPECT)
}

/// Calculate the character grid with a custom cell aspect ratio.
///
/// # Arguments
/// * `img_width` - Width of the source image in pixels
/// * `img_height` - Height of the source image in pixels
/// * `ascii_width` - Output width in characters
/// * `cell_aspect` - Glyph cell width divided by height (typically ~0.5)
///
/// # Returns
/// `(columns, rows)`, or `(0, 0)` when any input is zero.
pub fn grid_dimensions_with_aspect(
    img_width: u32,
    img_height: u32,
    ascii_width: u32,
    cell_aspect: f64,
) -> (usize, usize) {
    if img_width == 0 || img_height == 0 || ascii_width == 0 {
        return (0, 0);
    }

    let rows = (img_height as f64 / img_width as f64 * ascii_width as f64 * cell_aspect).round();
    (ascii_width as usize, (rows as usize).max(1))
}
