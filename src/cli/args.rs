//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use super::enums::{CharacterSet, Color, Dither, Edges, ThemeChoice};
use crate::ascii::{CellColor, Charset, DitherAlgo, Theme};
use crate::config::Config;

/// Render images as character art in the terminal
#[derive(Parser, Debug)]
#[command(name = "ascii-lens")]
#[command(version, about = "Render images as character art in the terminal", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Image files to render (PNG or JPEG)
    pub images: Vec<PathBuf>,

    /// Output width in characters
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Brightness offset (-255 to 255)
    #[arg(long, allow_hyphen_values = true)]
    pub brightness: Option<f32>,

    /// Contrast (-259 to 259, exclusive)
    #[arg(long, allow_hyphen_values = true)]
    pub contrast: Option<f32>,

    /// Blur applied while resampling, in character cells
    #[arg(long)]
    pub blur: Option<f32>,

    /// Dithering algorithm
    #[arg(long)]
    pub dither: Option<Dither>,

    /// Invert brightness (for light terminals)
    #[arg(long)]
    pub invert: bool,

    /// Draw pure-white cells instead of leaving them blank
    #[arg(long)]
    pub keep_white: bool,

    /// Character set
    #[arg(long)]
    pub charset: Option<CharacterSet>,

    /// Custom glyph ramp, darkest first (implies --charset manual)
    #[arg(long)]
    pub chars: Option<String>,

    /// Cycle glyphs diagonally instead of mapping brightness
    #[arg(long)]
    pub cycle: bool,

    /// Edge detection method
    #[arg(long)]
    pub edges: Option<Edges>,

    /// Edge magnitude cutoff
    #[arg(long)]
    pub edge_threshold: Option<f32>,

    /// Cell coloring
    #[arg(long)]
    pub color: Option<Color>,

    /// Terminal theme, sets the mono foreground
    #[arg(long)]
    pub theme: Option<ThemeChoice>,

    /// Mono foreground as #rrggbb (overrides --theme)
    #[arg(long, value_parser = parse_color)]
    pub fg: Option<CellColor>,

    /// Plain text output without ANSI colors
    #[arg(long)]
    pub no_ansi: bool,

    /// Re-render the images in a loop until Ctrl+C
    #[arg(long = "loop")]
    pub repeat: bool,

    /// Frames per second for --loop
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=120))]
    pub fps: Option<u32>,

    /// Seed for noise dithering (reproducible output)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Per-frame budget in milliseconds; late frames skip edges and dithering
    #[arg(long)]
    pub deadline_ms: Option<u64>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available character sets
    Charsets,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

/// Parse a `#rrggbb` color.
fn parse_color(s: &str) -> Result<CellColor, String> {
    s.parse().map_err(|e| format!("{}", e))
}

impl Args {
    /// Merge settings: CLI args > config file > built-in defaults.
    pub fn apply_to(&self, config: &mut Config) {
        let render = &mut config.render;
        if let Some(width) = self.width {
            render.ascii_width = width;
        }
        if let Some(b) = self.brightness {
            render.brightness = b;
        }
        if let Some(c) = self.contrast {
            render.contrast = c;
        }
        if let Some(blur) = self.blur {
            render.blur_radius = blur;
        }
        if let Some(dither) = self.dither {
            match Option::<DitherAlgo>::from(dither) {
                Some(algo) => {
                    render.dithering = true;
                    render.dither_algo = algo;
                }
                None => render.dithering = false,
            }
        }
        render.invert |= self.invert;
        if self.keep_white {
            render.ignore_white = false;
        }
        if let Some(charset) = self.charset {
            render.charset = charset.into();
        }
        if let Some(ref chars) = self.chars {
            render.charset = Charset::Manual;
            render.manual_chars = chars.clone();
        }
        render.cycle_glyphs |= self.cycle;
        if let Some(edges) = self.edges {
            render.edge_method = edges.into();
        }
        if let Some(threshold) = self.edge_threshold {
            render.edge_threshold = threshold;
        }
        if let Some(color) = self.color {
            render.color_mode = color.into();
        }
        if let Some(theme) = self.theme {
            render.theme_color = Theme::from(theme).foreground();
        }
        if let Some(fg) = self.fg {
            render.theme_color = fg;
        }

        if self.no_ansi {
            config.output.ansi = false;
        }
        if let Some(fps) = self.fps {
            config.output.fps = fps;
        }
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }
}
