// src/surface.rs

//! The immediate-mode drawing primitives figures and plots render through.
//!
//! A `Surface` draws exactly what it is told, in pixel coordinates (origin
//! top-left, y down), with whatever stroke and fill state was last set.
//! Clipping of out-of-bounds geometry is the surface's business; callers
//! never pre-filter.

use anyhow::Result;

use crate::color::Rgb;

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextAlign {
    pub h: HAlign,
    pub v: VAlign,
}

impl TextAlign {
    pub const fn new(h: HAlign, v: VAlign) -> Self {
        Self { h, v }
    }
}

impl Default for TextAlign {
    fn default() -> Self {
        TextAlign::new(HAlign::Left, VAlign::Bottom)
    }
}

/// Drawing backend used by [`crate::plot::Plot`] and the figures.
pub trait Surface {
    /// Canvas size in pixels.
    fn size(&self) -> (f64, f64);

    /// Resizes the canvas; backends may discard previously drawn content.
    fn resize(&mut self, width: f64, height: f64) -> Result<()>;

    /// Clears everything drawn so far.
    fn clear(&mut self) -> Result<()>;

    /// Fills the whole canvas with `color`.
    fn background(&mut self, color: Rgb) -> Result<()>;

    fn stroke(&mut self, color: Rgb) -> Result<()>;
    fn no_stroke(&mut self) -> Result<()>;
    fn fill(&mut self, color: Rgb) -> Result<()>;
    fn no_fill(&mut self) -> Result<()>;
    fn stroke_weight(&mut self, weight: f64) -> Result<()>;

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()>;

    /// Circle centred at `(cx, cy)` with the given diameter.
    fn circle(&mut self, cx: f64, cy: f64, diameter: f64) -> Result<()>;

    /// A single stroked point, sized by the current stroke weight.
    fn point(&mut self, x: f64, y: f64) -> Result<()>;

    fn triangle(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> Result<()>;

    fn text(&mut self, text: &str, x: f64, y: f64, align: TextAlign) -> Result<()>;
}
