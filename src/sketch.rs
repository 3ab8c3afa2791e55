// src/sketch.rs

//! The per-figure frame loop.
//!
//! A host (browser animation loop, the static renderer in `main.rs`, a test)
//! drives a [`Sketch`] by calling [`Sketch::frame`] at its own cadence and
//! forwarding pointer and resize events as they arrive. Everything runs on
//! one thread, in the order the host calls it; nothing spans frames.

use anyhow::Result;
use log::{debug, trace};

use crate::overlay::OverlayHost;
use crate::surface::Surface;

/// What a figure sees while drawing.
pub struct FrameContext<'a> {
    pub surface: &'a mut dyn Surface,
    pub overlay: &'a mut dyn OverlayHost,
    /// Number of frames drawn before this one.
    pub frame: u64,
}

/// A figure's answer to a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Response {
    #[default]
    Continue,
    TogglePause,
}

/// A single interactive illustration.
pub trait Figure {
    fn name(&self) -> &'static str;

    /// Runs once before the first frame.
    fn setup(&mut self, ctx: &mut FrameContext<'_>) -> Result<()>;

    /// Draws one frame.
    fn draw(&mut self, ctx: &mut FrameContext<'_>) -> Result<()>;

    fn pointer_pressed(&mut self, _x: f64, _y: f64) -> Result<Response> {
        Ok(Response::Continue)
    }

    fn pointer_dragged(&mut self, _x: f64, _y: f64) -> Result<Response> {
        Ok(Response::Continue)
    }

    fn pointer_released(&mut self, _x: f64, _y: f64) -> Result<Response> {
        Ok(Response::Continue)
    }

    /// Called after the surface has been resized.
    fn resized(&mut self, _width: f64, _height: f64) -> Result<()> {
        Ok(())
    }
}

impl<F: Figure + ?Sized> Figure for Box<F> {
    fn name(&self) -> &'static str {
        (**self).name()
    }
    fn setup(&mut self, ctx: &mut FrameContext<'_>) -> Result<()> {
        (**self).setup(ctx)
    }
    fn draw(&mut self, ctx: &mut FrameContext<'_>) -> Result<()> {
        (**self).draw(ctx)
    }
    fn pointer_pressed(&mut self, x: f64, y: f64) -> Result<Response> {
        (**self).pointer_pressed(x, y)
    }
    fn pointer_dragged(&mut self, x: f64, y: f64) -> Result<Response> {
        (**self).pointer_dragged(x, y)
    }
    fn pointer_released(&mut self, x: f64, y: f64) -> Result<Response> {
        (**self).pointer_released(x, y)
    }
    fn resized(&mut self, width: f64, height: f64) -> Result<()> {
        (**self).resized(width, height)
    }
}

/// Drives a [`Figure`]: one-time setup, per-frame draws, pause state.
pub struct Sketch<F> {
    figure: F,
    frame: u64,
    paused: bool,
    is_set_up: bool,
}

impl<F: Figure> Sketch<F> {
    pub fn new(figure: F) -> Self {
        Sketch {
            figure,
            frame: 0,
            paused: false,
            is_set_up: false,
        }
    }

    pub fn figure(&self) -> &F {
        &self.figure
    }

    pub fn figure_mut(&mut self) -> &mut F {
        &mut self.figure
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        debug!(
            "Sketch '{}' {}",
            self.figure.name(),
            if self.paused { "paused" } else { "resumed" }
        );
    }

    /// Runs the figure's setup. Later calls are no-ops.
    pub fn setup(&mut self, surface: &mut dyn Surface, overlay: &mut dyn OverlayHost) -> Result<()> {
        if self.is_set_up {
            return Ok(());
        }
        debug!("Setting up sketch '{}'", self.figure.name());
        let mut ctx = FrameContext {
            surface,
            overlay,
            frame: self.frame,
        };
        self.figure.setup(&mut ctx)?;
        self.is_set_up = true;
        Ok(())
    }

    /// Draws one frame unless paused. Returns whether the figure drew.
    pub fn frame(&mut self, surface: &mut dyn Surface, overlay: &mut dyn OverlayHost) -> Result<bool> {
        self.setup(surface, overlay)?;
        if self.paused {
            trace!("Sketch '{}' paused; skipping frame", self.figure.name());
            return Ok(false);
        }
        let mut ctx = FrameContext {
            surface,
            overlay,
            frame: self.frame,
        };
        self.figure.draw(&mut ctx)?;
        self.frame += 1;
        Ok(true)
    }

    pub fn pointer_pressed(&mut self, x: f64, y: f64) -> Result<()> {
        let response = self.figure.pointer_pressed(x, y)?;
        self.apply(response);
        Ok(())
    }

    pub fn pointer_dragged(&mut self, x: f64, y: f64) -> Result<()> {
        let response = self.figure.pointer_dragged(x, y)?;
        self.apply(response);
        Ok(())
    }

    pub fn pointer_released(&mut self, x: f64, y: f64) -> Result<()> {
        let response = self.figure.pointer_released(x, y)?;
        self.apply(response);
        Ok(())
    }

    /// Resizes the surface, then lets the figure adapt its geometry.
    pub fn resize(&mut self, surface: &mut dyn Surface, width: f64, height: f64) -> Result<()> {
        surface.resize(width, height)?;
        self.figure.resized(width, height)
    }

    fn apply(&mut self, response: Response) {
        if response == Response::TogglePause {
            self.toggle_pause();
        }
    }
}
