//! Terminal output for character grids.
//!
//! Grids are drawn as plain text or with 24-bit ANSI foreground colors.
//! Each frame is built into one string and written at once.

use std::io::Write;

use crate::ascii::{CellColor, CharacterGrid};

/// Clear screen and home the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
/// Home the cursor without clearing, for redrawing in place.
const CURSOR_HOME: &str = "\x1b[H";
const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";
const RESET: &str = "\x1b[0m";

/// Faded cells below this intensity are drawn as spaces.
pub const MIN_FADE_INTENSITY: f32 = 0.1;

/// How a frame is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputStyle {
    /// Emit ANSI truecolor escapes
    pub ansi: bool,
    /// Scale each cell's color by its intensity and drop near-transparent cells
    pub fade: bool,
}

/// Build a frame as a string, one line per grid row.
///
/// With ANSI enabled, a color escape is emitted only when the color changes
/// and blank cells never change it. Every line ends with a reset.
pub fn frame_to_string(grid: &CharacterGrid, style: OutputStyle) -> String {
    // Rough upper bound: glyph + escape per cell
    let capacity = if style.ansi {
        grid.cells().len() * 20 + grid.height() * 8
    } else {
        grid.cells().len() + grid.height()
    };
    let mut output = String::with_capacity(capacity);

    for row in grid.rows() {
        let mut current: Option<CellColor> = None;
        for cell in row {
            let hidden = cell.is_blank() || (style.fade && cell.intensity < MIN_FADE_INTENSITY);
            if hidden {
                output.push(' ');
                continue;
            }
            if style.ansi {
                let color = if style.fade {
                    fade(cell.color, cell.intensity)
                } else {
                    cell.color
                };
                if current != Some(color) {
                    // ANSI true color (24-bit): ESC[38;2;R;G;Bm for foreground
                    output.push_str(&format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b));
                    current = Some(color);
                }
            }
            output.push(cell.glyph);
        }
        if style.ansi {
            output.push_str(RESET);
        }
        output.push('\n');
    }
    output
}

/// Scale a color toward black by `intensity` in `[0, 1]`.
pub fn fade(color: CellColor, intensity: f32) -> CellColor {
    let k = intensity.clamp(0.0, 1.0);
    let scale = |c: u8| (c as f32 * k).round() as u8;
    CellColor::new(scale(color.r), scale(color.g), scale(color.b))
}

/// Write one frame to `out`.
///
/// When `redraw` is set the frame replaces the previous one in place
/// (cursor homed, cursor hidden) instead of being appended.
pub fn write_frame<W: Write>(
    out: &mut W,
    grid: &CharacterGrid,
    style: OutputStyle,
    redraw: bool,
) -> std::io::Result<()> {
    let mut output = String::new();
    if redraw {
        output.push_str(HIDE_CURSOR);
        output.push_str(CURSOR_HOME);
    }
    output.push_str(&frame_to_string(grid, style));

    out.write_all(output.as_bytes())?;
    out.flush()
}

/// Clear the screen before the first looped frame.
pub fn begin_animation<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.write_all(CLEAR_SCREEN.as_bytes())?;
    out.flush()
}

/// Restore the cursor and colors after looping.
pub fn end_animation<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.write_all(RESET.as_bytes())?;
    out.write_all(SHOW_CURSOR.as_bytes())?;
    out.flush()
}
