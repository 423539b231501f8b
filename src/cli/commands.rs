//! Subcommand handlers: rendering, charsets and config actions.

use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::args::{Args, ConfigAction};
use crate::ascii::{Charset, Pipeline, RenderError};
use crate::config::{default_path, Config, ConfigFileError};
use crate::renderer::{self, OutputStyle};
use crate::source::{self, SourceError};

/// Errors surfaced by the command-line front end.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigFileError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to set Ctrl+C handler: {0}")]
    Ctrlc(#[from] ctrlc::Error),

    #[error("No images given. Run 'ascii-lens --help' for usage.")]
    NoImages,
}

static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Check if Ctrl+C has been received.
pub fn ctrlc_received() -> bool {
    CTRLC_RECEIVED.load(Ordering::SeqCst)
}

/// Set up the Ctrl+C handler.
///
/// This should be called once, before looping.
pub fn setup_ctrlc_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        CTRLC_RECEIVED.store(true, Ordering::SeqCst);
    })
}

/// Load the config file named by `--config` (which must exist), or the
/// default one if present.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigFileError> {
    match path {
        Some(path) => Config::load_explicit(path),
        None => Config::load(None),
    }
}

/// Render every image given on the command line.
///
/// Without `--loop` each image is printed once. With it, the images are
/// shown in turn as an animation at the configured frame rate until Ctrl+C.
pub fn run(args: &Args) -> Result<(), CliError> {
    if args.images.is_empty() {
        return Err(CliError::NoImages);
    }

    let mut config = load_config(args.config.as_deref())?;
    args.apply_to(&mut config);
    config.render.validate().map_err(ConfigFileError::from)?;

    let frames = source::load_images(&args.images)?;

    let mut pipeline = Pipeline::new();
    if let Some(seed) = args.seed {
        pipeline = pipeline.with_seed(seed);
    }
    if let Some(deadline) = args.deadline() {
        pipeline = pipeline.with_deadline(deadline);
    }

    let style = OutputStyle {
        ansi: config.output.ansi,
        fade: config.render.cycle_glyphs,
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if !args.repeat {
        for frame in &frames {
            let grid = pipeline.render(frame, &config.render)?;
            renderer::write_frame(&mut out, &grid, style, false)?;
        }
        return Ok(());
    }

    setup_ctrlc_handler()?;
    let interval = Duration::from_secs_f64(1.0 / config.output.fps.max(1) as f64);
    log::info!(
        "Looping {} frame(s) at {} fps",
        frames.len(),
        config.output.fps
    );

    renderer::begin_animation(&mut out)?;
    let result = animate(&mut pipeline, &frames, &config, style, interval, &mut out);
    renderer::end_animation(&mut out)?;
    result
}

fn animate<W: Write>(
    pipeline: &mut Pipeline,
    frames: &[crate::ascii::PixelBuffer],
    config: &Config,
    style: OutputStyle,
    interval: Duration,
    out: &mut W,
) -> Result<(), CliError> {
    for frame in frames.iter().cycle() {
        if ctrlc_received() {
            break;
        }
        let tick = Instant::now();
        match pipeline.render(frame, &config.render) {
            Ok(grid) => renderer::write_frame(out, &grid, style, true)?,
            // A bad frame is skipped; the next one is tried on the next tick
            Err(e) => log::warn!("Skipping frame: {}", e),
        }
        if let Some(rest) = interval.checked_sub(tick.elapsed()) {
            std::thread::sleep(rest);
        }
    }
    Ok(())
}

/// Print every charset with a sample of its glyphs.
pub fn list_charsets() {
    println!("Available charsets:");
    for charset in Charset::ALL {
        match charset.glyphs() {
            Some(glyphs) => {
                let sample: String = glyphs.chars().take(24).collect();
                println!("  {:<9} {}", charset.name(), sample);
            }
            None => println!("  {:<9} (glyphs from --chars or manual_chars)", charset.name()),
        }
    }
    println!();
    println!("Use --charset <name> to select one.");
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: &ConfigAction, path: Option<&Path>) -> Result<(), CliError> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_path);
    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(config_path.as_path()))?;
            if config_path.exists() {
                println!("# Config file: {} (exists)", config_path.display());
            } else {
                println!("# Config file: {} (not found, showing defaults)", config_path.display());
            }
            println!();
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Init => {
            Config::init(&config_path)?;
            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}
