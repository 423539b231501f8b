//! Grid-shaped buffers passed between stages, and the final character grid.

use std::fmt;

use super::color::CellColor;

/// Per-cell luminance at character-grid resolution.
///
/// Values are nominally in `[0, 255]`; error diffusion may push them outside
/// that range until the dithering stage clamps them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LuminanceField {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl LuminanceField {
    /// Wrap row-major values. Panics if `values.len() != width * height`.
    pub fn from_values(width: usize, height: usize, values: Vec<f32>) -> Self {
        assert_eq!(
            values.len(),
            width * height,
            "luminance field of {}x{} needs {} values",
            width,
            height,
            width * height
        );
        Self {
            width,
            height,
            values,
        }
    }

    /// A field with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self::from_values(width, height, vec![value; width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }

    /// Clamp every value into `[0, 255]`.
    pub fn clamp(&mut self) {
        for v in &mut self.values {
            *v = v.clamp(0.0, 255.0);
        }
    }

    pub(crate) fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.values.clear();
        self.values.resize(width * height, 0.0);
    }
}

/// Cells whose local gradient exceeded the edge threshold.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EdgeMask {
    width: usize,
    height: usize,
    marked: Vec<bool>,
}

impl EdgeMask {
    /// An all-clear mask.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            marked: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        self.marked[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, edge: bool) {
        self.marked[y * self.width + x] = edge;
    }

    /// Number of marked cells.
    pub fn count(&self) -> usize {
        self.marked.iter().filter(|&&m| m).count()
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [bool] {
        &mut self.marked
    }

    pub(crate) fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.marked.clear();
        self.marked.resize(width * height, false);
    }
}

/// One output cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub color: CellColor,
    /// Final cell value after edge override, scaled to `[0, 1]`.
    /// Presenters can use it as opacity for decorative glyph modes.
    pub intensity: f32,
}

impl Cell {
    /// True when the cell renders as a space.
    pub fn is_blank(&self) -> bool {
        self.glyph == ' '
    }
}

/// Optional pipeline stages that can be skipped under a frame deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    EdgeDetect,
    Dither,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::EdgeDetect => "edge-detect",
            Stage::Dither => "dither",
        }
    }
}

/// Whether a frame ran every configured stage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FrameQuality {
    #[default]
    Full,
    /// The frame deadline passed mid-frame and these optional stages were skipped.
    Degraded { skipped: Vec<Stage> },
}

impl FrameQuality {
    pub fn is_degraded(&self) -> bool {
        matches!(self, FrameQuality::Degraded { .. })
    }
}

/// The pipeline's output: `width x height` cells in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    quality: FrameQuality,
}

impl CharacterGrid {
    pub(crate) fn new(width: usize, height: usize, cells: Vec<Cell>, quality: FrameQuality) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
            quality,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn quality(&self) -> &FrameQuality {
        &self.quality
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Cells of row `y`.
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Glyphs of row `y` as a string.
    pub fn row_text(&self, y: usize) -> String {
        self.row(y).iter().map(|c| c.glyph).collect()
    }

    /// All glyphs, one line per row, without a trailing newline.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|c| c.glyph));
        }
        out
    }
}

impl fmt::Display for CharacterGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
