//! Configuration file handling for ascii-lens.
//!
//! Loads configuration from `<config dir>/ascii-lens/config.toml` or a custom path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ascii::{ConfigError, RenderSettings};

/// Default frame rate for `--loop`.
pub const DEFAULT_FPS: u32 = 10;

/// Configuration file structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub output: OutputConfig,
}

/// How rendered grids are written to the terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Emit 24-bit ANSI color escapes
    #[serde(default = "default_true")]
    pub ansi: bool,
    /// Frames per second when looping
    #[serde(default = "default_fps")]
    pub fps: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            ansi: true,
            fps: DEFAULT_FPS,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_fps() -> u32 {
    DEFAULT_FPS
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file already exists: {}. Use 'ascii-lens config show' to view current settings.", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

impl Config {
    /// Load configuration from a file path, or the default location.
    ///
    /// Returns the default config if the file doesn't exist, and an error if
    /// it exists but cannot be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigFileError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);
        if path.exists() {
            Self::load_explicit(&path)
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Load a config file that must exist (`--config`).
    pub fn load_explicit(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Err(ConfigFileError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_toml(&content).map_err(|e| match e {
            ConfigFileError::Parse { source, .. } => ConfigFileError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigFileError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigFileError::Parse {
            path: PathBuf::new(),
            source: e,
        })?;
        config.render.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigFileError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the commented default config to `path`, creating parent directories.
    ///
    /// Fails if the file already exists.
    pub fn init(path: &Path) -> Result<(), ConfigFileError> {
        let io_err = |source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        };
        if path.exists() {
            return Err(ConfigFileError::AlreadyExists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, DEFAULT_CONFIG).map_err(io_err)
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("ascii-lens").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/ascii-lens/config.toml")
        })
}

/// Commented config written by `config init`. Parses to [`Config::default`].
pub const DEFAULT_CONFIG: &str = r##"# ascii-lens configuration

[render]
# Character columns
ascii_width = 150
# Tone offset, -255 to 255
brightness = 0.0
# Contrast, strictly between -259 and 259
contrast = 0.0
# Gaussian blur applied while resampling, in character cells (0 = off)
blur_radius = 0.0
# Dithering: floyd or noise
dithering = true
dither_algo = "floyd"
# Invert brightness (for light terminals)
invert = false
# Leave pure-white background cells blank
ignore_white = true
# Charset: standard, blocks, binary, hex, detailed, matrix, glitch,
#          runes, arrows, circuit, manual
charset = "detailed"
# Glyphs used when charset = "manual"
manual_chars = ""
# Cycle glyphs diagonally instead of by brightness
cycle_glyphs = false
# Edge detection: none, sobel, dog
edge_method = "none"
edge_threshold = 100.0
# Difference-of-Gaussians blur sigmas (narrow, and wide as a ratio of narrow)
dog_sigma = 1.0
dog_sigma_ratio = 1.6
# Colors: mono, true, rainbow
color_mode = "mono"
# Foreground for mono mode (#eeeeee on dark terminals, #000000 on light)
theme_color = "#eeeeee"

[output]
# 24-bit ANSI color escapes
ansi = true
# Frames per second for --loop
fps = 10
"##;
