//! Per-frame render settings.

use serde::{Deserialize, Serialize};

use super::charset::{Charset, GlyphRamp};
use super::color::{CellColor, ColorMode, Theme};
use super::dimensions::grid_dimensions;
use super::dither::DitherAlgo;
use super::edges::{EdgeMethod, EdgeParams, DEFAULT_DOG_SIGMA, DEFAULT_DOG_SIGMA_RATIO};
use super::error::ConfigError;
use super::grayscale::{ToneCurve, CONTRAST_LIMIT};
use super::mapping::GlyphMapper;

/// Default number of character columns.
pub const DEFAULT_ASCII_WIDTH: u32 = 150;

/// Default Sobel/DoG cutoff.
pub const DEFAULT_EDGE_THRESHOLD: f32 = 100.0;

/// Immutable configuration snapshot for one frame.
///
/// Every field has a default, so partial TOML tables deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Grid column count
    pub ascii_width: u32,
    /// Tone offset in `[-255, 255]`
    pub brightness: f32,
    /// Tone contrast in `(-259, 259)`
    pub contrast: f32,
    /// Gaussian sigma in grid cells applied while resampling
    pub blur_radius: f32,
    pub dithering: bool,
    pub dither_algo: DitherAlgo,
    pub invert: bool,
    /// Blank out cells that are pure white before edge override
    pub ignore_white: bool,
    pub charset: Charset,
    /// Ramp used when `charset` is manual
    pub manual_chars: String,
    /// Emit glyphs in a diagonal cycle instead of by luminance
    pub cycle_glyphs: bool,
    pub edge_method: EdgeMethod,
    pub edge_threshold: f32,
    /// Narrow DoG sigma, in grid cells
    pub dog_sigma: f32,
    /// Wide DoG sigma as a multiple of `dog_sigma`
    pub dog_sigma_ratio: f32,
    pub color_mode: ColorMode,
    /// Foreground for mono color mode
    pub theme_color: CellColor,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            ascii_width: DEFAULT_ASCII_WIDTH,
            brightness: 0.0,
            contrast: 0.0,
            blur_radius: 0.0,
            dithering: true,
            dither_algo: DitherAlgo::Floyd,
            invert: false,
            ignore_white: true,
            charset: Charset::Detailed,
            manual_chars: String::new(),
            cycle_glyphs: false,
            edge_method: EdgeMethod::None,
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            dog_sigma: DEFAULT_DOG_SIGMA,
            dog_sigma_ratio: DEFAULT_DOG_SIGMA_RATIO,
            color_mode: ColorMode::Mono,
            theme_color: Theme::Dark.foreground(),
        }
    }
}

impl RenderSettings {
    /// Check every field before a frame is processed.
    ///
    /// NaN is rejected everywhere a range applies. An infinite edge
    /// threshold is allowed and disables marking.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ascii_width == 0 {
            return Err(ConfigError::InvalidWidth);
        }
        if !(-255.0..=255.0).contains(&self.brightness) {
            return Err(ConfigError::BrightnessOutOfRange(self.brightness));
        }
        if !(self.contrast.abs() < CONTRAST_LIMIT) {
            return Err(ConfigError::ContrastOutOfRange(self.contrast));
        }
        if !(self.blur_radius >= 0.0) || self.blur_radius.is_infinite() {
            return Err(ConfigError::InvalidBlurRadius(self.blur_radius));
        }
        if !(self.edge_threshold >= 0.0) {
            return Err(ConfigError::InvalidEdgeThreshold(self.edge_threshold));
        }
        let sigma_ok = self.dog_sigma > 0.0 && self.dog_sigma.is_finite();
        let ratio_ok = self.dog_sigma_ratio > 1.0 && self.dog_sigma_ratio.is_finite();
        if !(sigma_ok && ratio_ok) {
            return Err(ConfigError::InvalidDogSigma {
                sigma: self.dog_sigma,
                ratio: self.dog_sigma_ratio,
            });
        }
        self.ramp().map(|_| ())
    }

    /// Glyph ramp selected by `charset` (and `manual_chars`).
    pub fn ramp(&self) -> Result<GlyphRamp, ConfigError> {
        GlyphRamp::for_charset(self.charset, &self.manual_chars)
    }

    pub fn glyph_mapper(&self) -> Result<GlyphMapper, ConfigError> {
        Ok(GlyphMapper::new(self.ramp()?, self.ignore_white, self.cycle_glyphs))
    }

    pub fn tone_curve(&self) -> ToneCurve {
        ToneCurve::new(self.brightness, self.contrast, self.invert)
    }

    pub fn edge_params(&self) -> EdgeParams {
        EdgeParams {
            method: self.edge_method,
            threshold: self.edge_threshold,
            dog_sigma: self.dog_sigma,
            dog_sigma_ratio: self.dog_sigma_ratio,
        }
    }

    /// Dither algorithm, or `None` when dithering is off.
    pub fn dither(&self) -> Option<DitherAlgo> {
        self.dithering.then_some(self.dither_algo)
    }

    /// Character grid size for a `width x height` source frame.
    pub fn grid_size(&self, width: u32, height: u32) -> (usize, usize) {
        grid_dimensions(width, height, self.ascii_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = RenderSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.ascii_width, 150);
        assert!(settings.dithering);
        assert!(settings.ignore_white);
        assert_eq!(settings.charset, Charset::Detailed);
        assert_eq!(settings.theme_color.to_string(), "#eeeeee");
    }

    #[test]
    fn rejects_zero_width() {
        let settings = RenderSettings {
            ascii_width: 0,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::InvalidWidth));
    }

    #[test]
    fn rejects_contrast_singularity() {
        for contrast in [259.0, -259.0, 300.0, f32::NAN] {
            let settings = RenderSettings {
                contrast,
                ..Default::default()
            };
            assert!(matches!(settings.validate(), Err(ConfigError::ContrastOutOfRange(_))));
        }
        let settings = RenderSettings {
            contrast: 258.999,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn rejects_empty_manual_ramp() {
        let settings = RenderSettings {
            charset: Charset::Manual,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::EmptyManualChars));
    }

    #[test]
    fn infinite_threshold_is_valid() {
        let settings = RenderSettings {
            edge_threshold: f32::INFINITY,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
        let settings = RenderSettings {
            edge_threshold: -1.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_bad_dog_sigmas() {
        let settings = RenderSettings {
            dog_sigma_ratio: 1.0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::InvalidDogSigma { .. })));
    }

    #[test]
    fn dither_respects_toggle() {
        let mut settings = RenderSettings::default();
        assert_eq!(settings.dither(), Some(DitherAlgo::Floyd));
        settings.dithering = false;
        assert_eq!(settings.dither(), None);
    }
}
