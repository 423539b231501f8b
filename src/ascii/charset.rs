//! Glyph ramp presets.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Short tonal ramp (9 levels), densest first.
pub const STANDARD_RAMP: &str = "@%#*+=-:.";

/// Unicode block shading (5 levels), densest first.
pub const BLOCKS_RAMP: &str = "█▓▒░ ";

/// Binary digit pair.
pub const BINARY_RAMP: &str = "01";

/// Hexadecimal digits.
pub const HEX_RAMP: &str = "0123456789ABCDEF";

/// Detailed 70-level ramp, densest first. The default.
pub const DETAILED_RAMP: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'. ";

/// Half-width katakana, for the "digital rain" look.
pub const MATRIX_RAMP: &str = "ﾊﾐﾋｰｳｼﾅﾓﾆｻﾜﾂｵﾘｱﾎﾃﾏｹﾒｴｶｷﾑﾕﾗｾﾈｽﾀﾇﾍ";

/// Latin-1 symbols and accented letters.
pub const GLITCH_RAMP: &str = "¡¢£¤¥¦§¨©ª«¬®¯°±²³´µ¶·¸¹º»¼½¾¿ÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏÐÑÒÓÔÕÖ×ØÙÚÛÜÝÞßàáâãäåæçèéêëìíîïðñòóôõö÷øùúûüýþÿ";

/// Runic letters.
pub const RUNES_RAMP: &str = "ᚠᚡᚢᚣᚤᚥᚦᚧᚨᚩᚪᚫᚬᚭᚮᚯᚰᚱᚲᚳᚴᚵᚶᚷᚸᚹᚺᚻᚼᚽᚾᚿᛀᛁᛂᛃᛄᛅᛆᛇᛈᛉᛊᛋᛌᛍᛎᛏᛐᛑᛒᛓᛔᛕᛖᛗᛘᛙᛚᛛᛜᛝᛞᛟᛠᛡᛢᛣᛤᛥᛦᛧᛨᛩᛪ᛫᛬᛭ᛮᛯᛰ";

/// Arrows.
pub const ARROWS_RAMP: &str = "←↑→↓↔↕↖↗↘↙↚↛↜↝↞↟↠↡↢↣↤↥↦↧↨↩↪↫↬↭↮↯↰↱↲↳↴↵↶↷↸↹↺↻↼↽↾↿⇀⇁⇂⇃⇄⇅⇆⇇⇈⇉⇊⇋⇌⇍⇎⇏⇐⇑⇒⇓⇔⇕⇖⇗⇘⇙⇚⇛";

/// Box-drawing characters.
pub const CIRCUIT_RAMP: &str = "─│┌┐└┘├┤┬┴┼═║╒╓╔╕╖╗╘╙╚╛╜╝╞╟╠╡╢╣╤╥╦╧╨╩╪╫╬";

/// Named glyph ramp.
///
/// Every preset carries its glyph string; [`Charset::Manual`] takes the
/// ramp from `manual_chars` in the render settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Charset {
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

impl Charset {
    /// Every charset, in menu order.
    pub const ALL: [Charset; 11] = [
        Charset::Standard,
        Charset::Blocks,
        Charset::Binary,
        Charset::Hex,
        Charset::Detailed,
        Charset::Matrix,
        Charset::Glitch,
        Charset::Runes,
        Charset::Arrows,
        Charset::Circuit,
        Charset::Manual,
    ];

    /// Glyphs for this preset, or `None` for [`Charset::Manual`].
    pub fn glyphs(&self) -> Option<&'static str> {
        match self {
            Charset::Standard => Some(STANDARD_RAMP),
            Charset::Blocks => Some(BLOCKS_RAMP),
            Charset::Binary => Some(BINARY_RAMP),
            Charset::Hex => Some(HEX_RAMP),
            Charset::Detailed => Some(DETAILED_RAMP),
            Charset::Matrix => Some(MATRIX_RAMP),
            Charset::Glitch => Some(GLITCH_RAMP),
            Charset::Runes => Some(RUNES_RAMP),
            Charset::Arrows => Some(ARROWS_RAMP),
            Charset::Circuit => Some(CIRCUIT_RAMP),
            Charset::Manual => None,
        }
    }

    /// Get a human-readable name for the charset.
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Standard => "standard",
            Charset::Blocks => "blocks",
            Charset::Binary => "binary",
            Charset::Hex => "hex",
            Charset::Detailed => "detailed",
            Charset::Matrix => "matrix",
            Charset::Glitch => "glitch",
            Charset::Runes => "runes",
            Charset::Arrows => "arrows",
            Charset::Circuit => "circuit",
            Charset::Manual => "manual",
        }
    }
}

/// An ordered, non-empty sequence of glyphs.
///
/// By convention index 0 is what luminance 0 maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl GlyphRamp {
    /// Build a ramp from a string, failing when it is empty.
    pub fn new(glyphs: &str) -> Result<Self, ConfigError> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return Err(ConfigError::EmptyManualChars);
        }
        Ok(Self { glyphs })
    }

    /// Resolve a charset, using `manual` for [`Charset::Manual`].
    pub fn for_charset(charset: Charset, manual: &str) -> Result<Self, ConfigError> {
        match charset.glyphs() {
            Some(preset) => Self::new(preset),
            None => Self::new(manual),
        }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Glyph at `idx`, clamped to the last entry.
    #[inline]
    pub fn get(&self, idx: usize) -> char {
        self.glyphs[idx.min(self.glyphs.len() - 1)]
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self {
            glyphs: DETAILED_RAMP.chars().collect(),
        }
    }
}
