//! Luminance to glyph mapping.

use super::charset::GlyphRamp;
use super::grid::{EdgeMask, LuminanceField};

/// Glyph emitted for ignored background cells.
pub const BLANK: char = ' ';

/// Picks one glyph per cell from a ramp.
///
/// Per cell, in order:
/// 1. cycling mode emits `ramp[(x + y) % len]` regardless of the cell value;
/// 2. with `ignore_white`, a value of exactly 255 is blank, checked before
///    the edge override so background stays blank even on an edge;
/// 3. an edge cell is treated as value 0;
/// 4. `ramp[round(value / 255 * (len - 1))]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMapper {
    ramp: GlyphRamp,
    ignore_white: bool,
    cycle: bool,
}

impl GlyphMapper {
    pub fn new(ramp: GlyphRamp, ignore_white: bool, cycle: bool) -> Self {
        Self {
            ramp,
            ignore_white,
            cycle,
        }
    }

    pub fn ramp(&self) -> &GlyphRamp {
        &self.ramp
    }

    /// Map a single value in `[0, 255]` to its ramp glyph.
    #[inline]
    pub fn glyph_for(&self, value: f32) -> char {
        let levels = (self.ramp.len() - 1) as f32;
        let idx = (value.clamp(0.0, 255.0) / 255.0 * levels).round() as usize;
        self.ramp.get(idx)
    }

    /// Glyph for cell `(x, y)` holding `value`, `edge` when the edge mask marks it.
    #[inline]
    pub fn glyph_at(&self, x: usize, y: usize, value: f32, edge: bool) -> char {
        if self.cycle {
            return self.ramp.get((x + y) % self.ramp.len());
        }
        if self.ignore_white && value >= 255.0 {
            return BLANK;
        }
        let value = if edge { 0.0 } else { value };
        self.glyph_for(value)
    }

    /// Map a whole field to glyphs.
    pub fn map(&self, field: &LuminanceField, edges: Option<&EdgeMask>) -> Vec<char> {
        let mut out = Vec::new();
        self.map_into(field, edges, &mut out);
        out
    }

    /// Map a whole field into an existing buffer, reusing its allocation.
    ///
    /// # Returns
    /// The number of glyphs written.
    pub fn map_into(&self, field: &LuminanceField, edges: Option<&EdgeMask>, buffer: &mut Vec<char>) -> usize {
        buffer.clear();
        let width = field.width();
        buffer.reserve(field.values().len());

        for (i, &value) in field.values().iter().enumerate() {
            let (x, y) = (i % width, i / width);
            let edge = edges.is_some_and(|mask| mask.is_edge(x, y));
            buffer.push(self.glyph_at(x, y, value, edge));
        }

        buffer.len()
    }
}

/// Final cell value after the edge override, scaled to `[0, 1]`.
#[inline]
pub fn cell_intensity(value: f32, edge: bool) -> f32 {
    if edge {
        0.0
    } else {
        value.clamp(0.0, 255.0) / 255.0
    }
}
