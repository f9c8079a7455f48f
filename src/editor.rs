// One logo-editing session: canvas, brush, and the pointer state machine.
//
// The host feeds pointer events in order and polls `Editor::take_redraw`
// to learn when the canvas changed. The editor never talks to a window.

use crate::brush::{self, BrushState};
use crate::codec;
use crate::composite::{self, BlendMode};
use crate::config::Config;
use crate::error::Result;
use crate::palette::{Palette, Tool};
use crate::types::{Color, PixelBuffer};
use log::{debug, info};

pub const DEFAULT_WIDTH: usize = 500;
pub const DEFAULT_HEIGHT: usize = 500;

/// Where a stroke stands between pointer events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrokeState {
    Idle,
    /// Pointer is down; `last` anchors the next segment.
    Drawing { last: (f32, f32) },
}

#[derive(Debug)]
pub struct Editor {
    canvas: PixelBuffer,
    brush: BrushState,
    state: StrokeState,
    palette: Palette,
    blend: BlendMode,
    radius_range: (f32, f32),
    radius_step: f32,
    needs_redraw: bool,
}

impl Editor {
    /// Blank `width` x `height` canvas in `background`, black 3px brush.
    pub fn new(width: usize, height: usize, background: Color) -> Result<Self> {
        Ok(Self {
            canvas: PixelBuffer::new(width, height, background)?,
            brush: BrushState::default(),
            state: StrokeState::Idle,
            palette: Palette::standard(),
            blend: BlendMode::default(),
            radius_range: (1.0, 20.0),
            radius_step: 1.0,
            needs_redraw: true,
        })
    }

    /// Session with size, colors, radius limits and blend mode taken from `config`.
    ///
    /// Expects a config that went through `validate_and_clamp`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut editor = Self::new(config.canvas.width, config.canvas.height, config.background())?;
        editor.brush = BrushState::new(config.brush_color(), config.brush.default_radius)?;
        editor.radius_range = (config.brush.min_radius, config.brush.max_radius);
        editor.radius_step = config.brush.radius_step;
        editor.blend = config.import.blend;
        Ok(editor)
    }

    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    pub fn brush(&self) -> &BrushState {
        &self.brush
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    /// Returns whether the canvas changed since the last call, and resets the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Starts a stroke: stamps once and anchors the cursor here.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        brush::stamp_at(
            &mut self.canvas,
            x.floor() as i32,
            y.floor() as i32,
            self.brush.color(),
            self.brush.radius(),
        );
        self.state = StrokeState::Drawing { last: (x, y) };
        self.needs_redraw = true;
    }

    /// Extends the active stroke to (x, y). Ignored while idle.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let StrokeState::Drawing { last } = &mut self.state {
            brush::stroke_to(
                &mut self.canvas,
                *last,
                (x, y),
                self.brush.color(),
                self.brush.radius(),
            );
            *last = (x, y);
            self.needs_redraw = true;
        }
    }

    /// Ends the stroke. The canvas is not touched.
    pub fn pointer_up(&mut self) {
        self.state = StrokeState::Idle;
    }

    pub fn set_color(&mut self, color: Color) {
        self.brush.set_color(color);
    }

    /// Any finite radius > 0; the configured range only bounds `adjust_radius`.
    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        self.brush.set_radius(radius)
    }

    /// Step the radius by `steps` configured increments, clamped to the configured range.
    pub fn adjust_radius(&mut self, steps: i32) -> f32 {
        let (lo, hi) = self.radius_range;
        let target = (self.brush.radius() + steps as f32 * self.radius_step).clamp(lo, hi);
        if self.brush.set_radius(target).is_ok() {
            debug!("Brush radius now {:.1}", target);
        }
        self.brush.radius()
    }

    /// The eraser is just the background color.
    pub fn select_eraser(&mut self) {
        self.brush.set_color(self.canvas.background());
    }

    /// Apply palette slot `index`. Returns false for an empty slot.
    pub fn select_tool(&mut self, index: usize) -> bool {
        let Some(entry) = self.palette.get(index) else {
            return false;
        };
        debug!("Selected tool '{}'", entry.name);
        match entry.tool {
            Tool::Pen(color) => self.brush.set_color(color),
            Tool::Eraser => self.select_eraser(),
        }
        true
    }

    /// Replace the canvas with `bytes` centered on a blank background.
    ///
    /// Empty bytes mean "no logo yet" and just blank the canvas. On a decode
    /// error the canvas is left blank and the error is returned.
    pub fn load(&mut self, bytes: &[u8]) -> Result<()> {
        self.state = StrokeState::Idle;
        self.needs_redraw = true;
        composite::load_composite(&mut self.canvas, bytes, self.blend)?;
        info!("Loaded {} image bytes onto canvas", bytes.len());
        Ok(())
    }

    /// Blank the canvas to the background.
    pub fn clear(&mut self) {
        self.state = StrokeState::Idle;
        self.canvas.clear_to_background();
        self.needs_redraw = true;
    }

    /// Snapshot the canvas as PNG bytes for persistence.
    pub fn export(&self) -> Result<Vec<u8>> {
        codec::encode(&self.canvas)
    }
}
