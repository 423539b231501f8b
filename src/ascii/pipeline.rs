//! Frame pipeline: drives every stage and owns the reusable scratch buffers.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use super::buffer::PixelBuffer;
use super::color::{colors_into, CellColor, Clock, ColorMode, SystemClock};
use super::dither;
use super::downsample::resample_into;
use super::edges::{detect_into, EdgeScratch};
use super::error::RenderError;
use super::grayscale::tone_map_into;
use super::grid::{Cell, CharacterGrid, EdgeMask, FrameQuality, LuminanceField, Stage};
use super::mapping::cell_intensity;
use super::settings::RenderSettings;

/// Buffers reused from frame to frame.
///
/// They grow to the largest grid rendered so far and are never shrunk.
#[derive(Debug, Default)]
pub struct FrameScratch {
    cells: PixelBuffer,
    plane: Vec<f32>,
    tmp: Vec<f32>,
    field: LuminanceField,
    edges: EdgeMask,
    edge_scratch: EdgeScratch,
    glyphs: Vec<char>,
    colors: Vec<CellColor>,
    max_cells: usize,
}

impl FrameScratch {
    /// Largest grid, in cells, these buffers have been sized for.
    pub fn max_cells(&self) -> usize {
        self.max_cells
    }

    fn ensure(&mut self, cells: usize) {
        if cells <= self.max_cells {
            return;
        }
        log::debug!("Growing frame scratch from {} to {} cells", self.max_cells, cells);
        self.max_cells = cells;
        self.glyphs.reserve(cells);
        self.colors.reserve(cells);
    }
}

/// Converts pixel buffers into character grids.
///
/// Randomness (noise dithering) and time (rainbow colors) come from
/// injected sources so frames can be made reproducible.
///
/// # Example
/// ```ignore
/// let mut pipeline = Pipeline::new().with_seed(42);
/// let grid = pipeline.render(&frame, &RenderSettings::default())?;
/// println!("{grid}");
/// ```
pub struct Pipeline {
    scratch: FrameScratch,
    rng: Box<dyn RngCore + Send>,
    clock: Box<dyn Clock>,
    deadline: Option<Duration>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// A pipeline with an entropy-seeded RNG and the system clock.
    pub fn new() -> Self {
        Self {
            scratch: FrameScratch::default(),
            rng: Box::new(StdRng::from_entropy()),
            clock: Box::new(SystemClock),
            deadline: None,
        }
    }

    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Make noise dithering reproducible.
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Skip edge detection and dithering once a frame has run this long.
    ///
    /// Frames that hit the deadline are tagged [`FrameQuality::Degraded`].
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn scratch(&self) -> &FrameScratch {
        &self.scratch
    }

    /// Render one frame.
    ///
    /// Settings are validated before any stage runs. A failed frame produces
    /// no output; callers move on to the next frame.
    pub fn render(
        &mut self,
        frame: &PixelBuffer,
        settings: &RenderSettings,
    ) -> Result<CharacterGrid, RenderError> {
        settings.validate()?;
        let mapper = settings.glyph_mapper()?;
        if frame.pixel_count() == 0 {
            return Err(RenderError::EmptyBuffer {
                width: frame.width(),
                height: frame.height(),
            });
        }

        let start = Instant::now();
        let deadline = self.deadline;
        let over_budget = || deadline.is_some_and(|d| start.elapsed() >= d);

        let (grid_w, grid_h) = settings.grid_size(frame.width(), frame.height());
        self.scratch.ensure(grid_w * grid_h);
        let FrameScratch {
            cells,
            plane,
            tmp,
            field,
            edges,
            edge_scratch,
            glyphs,
            colors,
            ..
        } = &mut self.scratch;

        resample_into(frame, grid_w, grid_h, settings.blur_radius, cells, plane, tmp);
        tone_map_into(cells, &settings.tone_curve(), field);

        let mut skipped = Vec::new();

        let edge_params = settings.edge_params();
        let has_edges = if !edge_params.method.is_enabled() {
            false
        } else if over_budget() {
            skipped.push(Stage::EdgeDetect);
            false
        } else {
            detect_into(field, &edge_params, edges, edge_scratch)
        };

        if let Some(algo) = settings.dither() {
            if over_budget() {
                skipped.push(Stage::Dither);
            } else {
                dither::apply(field, algo, &mut *self.rng);
            }
        }

        let edge_mask = has_edges.then_some(&*edges);
        mapper.map_into(field, edge_mask, glyphs);

        let time_ms = match settings.color_mode {
            ColorMode::Rainbow => self.clock.now_ms(),
            _ => 0.0,
        };
        colors_into(cells, settings.color_mode, settings.theme_color, time_ms, colors);

        let values = field.values();
        let glyphs: &[char] = glyphs;
        let colors: &[CellColor] = colors;
        let out: Vec<Cell> = (0..grid_w * grid_h)
            .into_par_iter()
            .map(|i| {
                let edge = edge_mask.is_some_and(|m| m.is_edge(i % grid_w, i / grid_w));
                Cell {
                    glyph: glyphs[i],
                    color: colors[i],
                    intensity: cell_intensity(values[i], edge),
                }
            })
            .collect();

        let quality = if skipped.is_empty() {
            FrameQuality::Full
        } else {
            log::warn!(
                "Frame deadline exceeded after {:?}, skipped: {}",
                start.elapsed(),
                skipped.iter().map(|s| s.name()).collect::<Vec<_>>().join(", ")
            );
            FrameQuality::Degraded { skipped }
        };

        log::trace!(
            "Rendered {}x{} frame to {}x{} grid in {:?}",
            frame.width(),
            frame.height(),
            grid_w,
            grid_h,
            start.elapsed()
        );

        Ok(CharacterGrid::new(grid_w, grid_h, out, quality))
    }
}
