//! Per-cell color selection: mono, true-color and animated rainbow.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::buffer::{PixelBuffer, BYTES_PER_PIXEL};
use super::error::ConfigError;

/// Rainbow hue advances one degree every this many milliseconds.
pub const RAINBOW_MS_PER_DEGREE: f64 = 20.0;

/// RGB color of a character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl CellColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for CellColor {
    type Err = ConfigError;

    /// Parse `#rrggbb` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ConfigError::InvalidColor(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for CellColor {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CellColor> for String {
    fn from(c: CellColor) -> Self {
        c.to_string()
    }
}

/// Foreground presets for mono color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Foreground color drawn on this theme's background.
    pub fn foreground(&self) -> CellColor {
        match self {
            Theme::Dark => CellColor::new(0xee, 0xee, 0xee),
            Theme::Light => CellColor::new(0x00, 0x00, 0x00),
        }
    }
}

/// How cells are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Theme foreground everywhere
    #[default]
    Mono,
    /// The resampled source color at each cell
    True,
    /// Hue sweep across columns, animated over time
    Rainbow,
}

impl ColorMode {
    pub fn name(&self) -> &'static str {
        match self {
            ColorMode::Mono => "mono",
            ColorMode::True => "true",
            ColorMode::Rainbow => "rainbow",
        }
    }
}

/// Millisecond time source for animated color modes.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> f64;
}

/// Wall-clock time since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// A clock frozen at a given time, for reproducible frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now_ms(&self) -> f64 {
        self.0
    }
}

/// Convert HSL (hue in degrees, saturation and lightness in `[0, 1]`) to RGB.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> CellColor {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    CellColor::new(to_u8(r), to_u8(g), to_u8(b))
}

/// Rainbow hue in degrees for column `x` of a `grid_width`-wide grid at `time_ms`.
#[inline]
pub fn rainbow_hue(x: usize, grid_width: usize, time_ms: f64) -> f64 {
    let position = x as f64 / grid_width.max(1) as f64;
    (position * 360.0 + time_ms / RAINBOW_MS_PER_DEGREE).rem_euclid(360.0)
}

/// Rainbow color at column `x`: full saturation, half lightness.
#[inline]
pub fn rainbow_color(x: usize, grid_width: usize, time_ms: f64) -> CellColor {
    hsl_to_rgb(rainbow_hue(x, grid_width, time_ms), 1.0, 0.5)
}

/// Select a color for every cell of the resampled buffer.
///
/// # Arguments
/// * `cells` - Resampled source colors, one pixel per cell
/// * `mode` - Color mode
/// * `theme_color` - Foreground used by [`ColorMode::Mono`]
/// * `time_ms` - Clock reading used by [`ColorMode::Rainbow`]
/// * `buffer` - Output, cleared and refilled in row-major order
///
/// # Returns
/// The number of colors written.
pub fn colors_into(
    cells: &PixelBuffer,
    mode: ColorMode,
    theme_color: CellColor,
    time_ms: f64,
    buffer: &mut Vec<CellColor>,
) -> usize {
    let width = cells.width() as usize;
    let count = cells.pixel_count();
    buffer.clear();
    buffer.resize(count, theme_color);
    if count == 0 || mode == ColorMode::Mono {
        return count;
    }

    buffer
        .par_chunks_mut(width)
        .zip(cells.data().par_chunks(width * BYTES_PER_PIXEL))
        .for_each(|(row, pixels)| match mode {
            ColorMode::True => {
                for (color, px) in row.iter_mut().zip(pixels.chunks_exact(BYTES_PER_PIXEL)) {
                    *color = CellColor::new(px[0], px[1], px[2]);
                }
            }
            ColorMode::Rainbow => {
                for (x, color) in row.iter_mut().enumerate() {
                    *color = rainbow_color(x, width, time_ms);
                }
            }
            ColorMode::Mono => {}
        });

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_hex() {
        let c: CellColor = "#ff8000".parse().unwrap();
        assert_eq!(c, CellColor::new(255, 128, 0));
        assert_eq!(c.to_string(), "#ff8000");
        assert_eq!("00FF00".parse::<CellColor>().unwrap(), CellColor::new(0, 255, 0));
    }

    #[test]
    fn rejects_bad_hex() {
        for bad in ["", "#fff", "#gggggg", "#12345678", "#ééé"] {
            assert!(matches!(bad.parse::<CellColor>(), Err(ConfigError::InvalidColor(_))), "{bad}");
        }
    }

    #[test]
    fn theme_foregrounds() {
        assert_eq!(Theme::Dark.foreground().to_string(), "#eeeeee");
        assert_eq!(Theme::Light.foreground().to_string(), "#000000");
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), CellColor::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), CellColor::new(0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), CellColor::new(0, 0, 255));
        assert_eq!(hsl_to_rgb(360.0, 1.0, 0.5), CellColor::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), CellColor::new(255, 255, 255));
    }

    #[test]
    fn rainbow_hue_sweeps_and_advances() {
        assert_eq!(rainbow_hue(0, 4, 0.0), 0.0);
        assert_eq!(rainbow_hue(2, 4, 0.0), 180.0);
        // 20 ms per degree
        assert_eq!(rainbow_hue(0, 4, 2000.0), 100.0);
        assert_eq!(rainbow_hue(3, 4, 7200.0), 270.0);
    }

    #[test]
    fn mono_fills_theme_color() {
        let cells = PixelBuffer::filled(3, 2, [1, 2, 3, 255]);
        let mut out = Vec::new();
        let n = colors_into(&cells, ColorMode::Mono, Theme::Light.foreground(), 0.0, &mut out);
        assert_eq!(n, 6);
        assert!(out.iter().all(|&c| c == CellColor::new(0, 0, 0)));
    }

    #[test]
    fn true_color_uses_source() {
        let cells = PixelBuffer::filled(2, 2, [10, 20, 30, 255]);
        let mut out = Vec::new();
        colors_into(&cells, ColorMode::True, CellColor::default(), 0.0, &mut out);
        assert!(out.iter().all(|&c| c == CellColor::new(10, 20, 30)));
    }

    #[test]
    fn rainbow_depends_on_column_only() {
        let cells = PixelBuffer::filled(4, 3, [0, 0, 0, 255]);
        let mut out = Vec::new();
        colors_into(&cells, ColorMode::Rainbow, CellColor::default(), 1234.0, &mut out);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(out[y * 4 + x], rainbow_color(x, 4, 1234.0));
            }
        }
    }
}
