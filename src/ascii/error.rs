//! Error types for the frame pipeline.

/// Errors that prevent a frame from being rendered.
///
/// A failed frame produces no output; callers skip it and try again with the
/// next frame from their source.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid pixel buffer: {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Pixel buffer has zero area ({width}x{height})")]
    EmptyBuffer { width: u32, height: u32 },

    #[error("Invalid render settings: {0}")]
    Configuration(#[from] ConfigError),
}

/// Invalid render settings, reported before any stage runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("ascii_width must be greater than 0")]
    InvalidWidth,

    #[error("manual_chars must not be empty when charset is 'manual'")]
    EmptyManualChars,

    #[error("contrast must be within (-259, 259), got {0}")]
    ContrastOutOfRange(f32),

    #[error("brightness must be within [-255, 255], got {0}")]
    BrightnessOutOfRange(f32),

    #[error("blur_radius must be >= 0, got {0}")]
    InvalidBlurRadius(f32),

    #[error("edge_threshold must be >= 0, got {0}")]
    InvalidEdgeThreshold(f32),

    #[error("dog_sigma must be > 0 and dog_sigma_ratio > 1, got sigma={sigma}, ratio={ratio}")]
    InvalidDogSigma { sigma: f32, ratio: f32 },

    #[error("Invalid color '{0}'. Use #rrggbb")]
    InvalidColor(String),
}
