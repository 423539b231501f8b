//! Image to character-grid conversion.
//!
//! A frame passes through these stages, each producing a grid-shaped buffer
//! of the same dimensions:
//!
//! 1. **Resampling** - Area-average the frame down to the character grid, optionally blurred
//! 2. **Tone mapping** - BT.601 luminance with brightness, contrast and invert
//! 3. **Edge detection** - Optional Sobel or difference-of-Gaussians mask
//! 4. **Dithering** - Optional Floyd-Steinberg or noise
//! 5. **Glyph mapping** - Luminance (or edge override, or cycling) to a ramp glyph
//! 6. **Color selection** - Mono, true-color or animated rainbow
//!
//! [`Pipeline`] drives the stages and keeps scratch buffers between frames.
//!
//! # Character Sets
//!
//! Ramps are selected via [`Charset`]:
//! - `Standard` - 9-level ASCII density ramp
//! - `Blocks` - Unicode block shading
//! - `Detailed` - 70-level ramp (default)
//! - `Binary`, `Hex`, `Matrix`, `Glitch`, `Runes`, `Arrows`, `Circuit` - decorative sets
//! - `Manual` - any user-supplied string

mod blur;
mod buffer;
mod charset;
mod color;
mod dimensions;
pub mod dither;
mod downsample;
pub mod edges;
mod error;
mod grayscale;
mod grid;
mod mapping;
mod pipeline;
mod settings;

pub use blur::{gaussian_blur, gaussian_kernel};
pub use buffer::{PixelBuffer, BYTES_PER_PIXEL};
pub use charset::{
    Charset, GlyphRamp, ARROWS_RAMP, BINARY_RAMP, BLOCKS_RAMP, CIRCUIT_RAMP, DETAILED_RAMP,
    GLITCH_RAMP, HEX_RAMP, MATRIX_RAMP, RUNES_RAMP, STANDARD_RAMP,
};
pub use color::{
    colors_into, hsl_to_rgb, rainbow_color, rainbow_hue, CellColor, Clock, ColorMode, FixedClock,
    SystemClock, Theme,
};
pub use dimensions::{grid_dimensions, grid_dimensions_with_aspect, CELL_ASPECT};
pub use dither::{DitherAlgo, QUANT_LEVELS};
pub use downsample::{resample, resample_into};
pub use edges::{EdgeMethod, EdgeParams};
pub use error::{ConfigError, RenderError};
pub use grayscale::{contrast_factor, luminance, tone_map, tone_map_into, ToneCurve};
pub use grid::{Cell, CharacterGrid, EdgeMask, FrameQuality, LuminanceField, Stage};
pub use mapping::{cell_intensity, GlyphMapper, BLANK};
pub use pipeline::{FrameScratch, Pipeline};
pub use settings::{RenderSettings, DEFAULT_ASCII_WIDTH, DEFAULT_EDGE_THRESHOLD};
