// src/overlay.rs

//! Floating text labels positioned in page space against plot coordinates.
//!
//! Labels live outside the canvas (markup rendered by the host), so their
//! placement goes plot space -> canvas pixels -> page space, then shifts by
//! the label's own measured box according to an [`Anchor`]. Placement is not
//! reactive: call [`LabelOverlay::set_position`] every frame the backing
//! coordinate moves, and after any canvas move or resize.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::VisError;
use crate::plot::Plot;

/// Handle to a label element created by an [`OverlayHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelId(pub usize);

/// The page that hosts the canvas and its overlay elements.
pub trait OverlayHost {
    /// Creates one absolutely positioned text element.
    fn create_label(&mut self, content: &str) -> Result<LabelId>;

    /// Page position of the canvas's top-left corner, measured now.
    fn canvas_origin(&self) -> (f64, f64);

    /// Current rendered width and height of a label.
    fn label_size(&self, id: LabelId) -> (f64, f64);

    /// Moves a label's top-left corner to a page position.
    fn place_label(&mut self, id: LabelId, x: f64, y: f64) -> Result<()>;

    fn set_label_color(&mut self, id: LabelId, color: Rgb) -> Result<()>;
}

/// Which point of a label's box lands on the target position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    #[default]
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::Center,
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
        Anchor::Top,
        Anchor::Bottom,
        Anchor::Left,
        Anchor::Right,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::Center => "center",
            Anchor::TopLeft => "top-left",
            Anchor::TopRight => "top-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomRight => "bottom-right",
            Anchor::Top => "top",
            Anchor::Bottom => "bottom",
            Anchor::Left => "left",
            Anchor::Right => "right",
        }
    }

    /// Offset of the box's top-left corner from the target, as fractions of
    /// the box's width and height.
    pub fn fractions(&self) -> (f64, f64) {
        match self {
            Anchor::Center => (-0.5, -0.5),
            Anchor::TopLeft => (0.0, 0.0),
            Anchor::TopRight => (-1.0, 0.0),
            Anchor::BottomLeft => (0.0, -1.0),
            Anchor::BottomRight => (-1.0, -1.0),
            Anchor::Top => (-0.5, 0.0),
            Anchor::Bottom => (-0.5, -1.0),
            Anchor::Left => (0.0, -0.5),
            Anchor::Right => (-1.0, -0.5),
        }
    }

    pub fn offset(&self, width: f64, height: f64) -> (f64, f64) {
        let (fx, fy) = self.fractions();
        (fx * width, fy * height)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anchor {
    type Err = VisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Anchor::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| VisError::UnknownAnchor(s.to_string()))
    }
}

/// An ordered set of labels, one per content string given at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelOverlay {
    labels: Vec<LabelId>,
}

impl LabelOverlay {
    pub fn new<S: AsRef<str>>(host: &mut dyn OverlayHost, contents: &[S]) -> Result<Self> {
        let labels = contents
            .iter()
            .map(|c| host.create_label(c.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, index: usize) -> Result<LabelId, VisError> {
        self.labels
            .get(index)
            .copied()
            .ok_or(VisError::LabelIndexOutOfBounds {
                index,
                len: self.labels.len(),
            })
    }

    /// Plot coordinates to page coordinates, using the canvas position as
    /// measured right now.
    pub fn page_position(host: &dyn OverlayHost, plot: &Plot, x: f64, y: f64) -> (f64, f64) {
        let (px, py) = plot.to_pixel(x, y);
        let (ox, oy) = host.canvas_origin();
        (px + ox, py + oy)
    }

    /// Places label `index` so that its `anchor` point sits on plot
    /// coordinate `(x, y)`.
    pub fn set_position(
        &self,
        host: &mut dyn OverlayHost,
        plot: &Plot,
        index: usize,
        x: f64,
        y: f64,
        anchor: Anchor,
    ) -> Result<()> {
        let id = self.label(index)?;
        let (page_x, page_y) = Self::page_position(host, plot, x, y);
        let (w, h) = host.label_size(id);
        let (dx, dy) = anchor.offset(w, h);
        trace!(
            "Overlay: label {} at ({}, {}) anchored {} -> ({}, {})",
            index,
            x,
            y,
            anchor,
            page_x + dx,
            page_y + dy
        );
        host.place_label(id, page_x + dx, page_y + dy)
    }

    pub fn set_color(&self, host: &mut dyn OverlayHost, index: usize, color: Rgb) -> Result<()> {
        let id = self.label(index)?;
        host.set_label_color(id, color)
    }
}
