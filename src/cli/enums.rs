//! CLI enum types for charset, dithering, edge, color and theme options.

use clap::ValueEnum;

use crate::ascii;

/// Glyph ramp for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CharacterSet {
    Standard,
    Blocks,
    Binary,
    Hex,
    #[default]
    Detailed,
    Matrix,
    Glitch,
    Runes,
    Arrows,
    Circuit,
    Manual,
}

impl From<CharacterSet> for ascii::Charset {
    fn from(c: CharacterSet) -> Self {
        match c {
            CharacterSet::Standard => ascii::Charset::Standard,
            CharacterSet::Blocks => ascii::Charset::Blocks,
            CharacterSet::Binary => ascii::Charset::Binary,
            CharacterSet::Hex => ascii::Charset::Hex,
            CharacterSet::Detailed => ascii::Charset::Detailed,
            CharacterSet::Matrix => ascii::Charset::Matrix,
            CharacterSet::Glitch => ascii::Charset::Glitch,
            CharacterSet::Runes => ascii::Charset::Runes,
            CharacterSet::Arrows => ascii::Charset::Arrows,
            CharacterSet::Circuit => ascii::Charset::Circuit,
            CharacterSet::Manual => ascii::Charset::Manual,
        }
    }
}

/// Dithering choice; `none` turns the stage off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Dither {
    None,
    Floyd,
    Noise,
}

impl From<Dither> for Option<ascii::DitherAlgo> {
    fn from(d: Dither) -> Self {
        match d {
            Dither::None => None,
            Dither::Floyd => Some(ascii::DitherAlgo::Floyd),
            Dither::Noise => Some(ascii::DitherAlgo::Noise),
        }
    }
}

/// Edge detection method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Edges {
    None,
    Sobel,
    /// Difference of Gaussians
    Dog,
}

impl From<Edges> for ascii::EdgeMethod {
    fn from(e: Edges) -> Self {
        match e {
            Edges::None => ascii::EdgeMethod::None,
            Edges::Sobel => ascii::EdgeMethod::Sobel,
            Edges::Dog => ascii::EdgeMethod::Dog,
        }
    }
}

/// Cell coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Color {
    Mono,
    True,
    Rainbow,
}

impl From<Color> for ascii::ColorMode {
    fn from(c: Color) -> Self {
        match c {
            Color::Mono => ascii::ColorMode::Mono,
            Color::True => ascii::ColorMode::True,
            Color::Rainbow => ascii::ColorMode::Rainbow,
        }
    }
}

/// Terminal background, picks the mono foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Dark,
    Light,
}

impl From<ThemeChoice> for ascii::Theme {
    fn from(t: ThemeChoice) -> Self {
        match t {
            ThemeChoice::Dark => ascii::Theme::Dark,
            ThemeChoice::Light => ascii::Theme::Light,
        }
    }
}
