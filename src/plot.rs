// src/plot.rs

//! This module defines `Plot`, the coordinate space of a figure.
//!
//! A `Plot` maps a logical rectangle (`x_range` by `y_range`, y pointing up)
//! onto a pixel rectangle of a [`Surface`] (y pointing down), shrunk on every
//! side by an inner padding. All drawing helpers take logical coordinates,
//! convert them, and hand pixel geometry to the surface.
//!
//! Conversions are recomputed from the current ranges and rectangle on every
//! call. Figures are free to mutate the ranges or resize the plot between
//! frames (or between calls within a frame) and subsequent conversions follow.

use std::fmt;
use std::rc::Rc;

use anyhow::Result;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::VisError;
use crate::surface::{HAlign, Surface, TextAlign, VAlign};

/// Labels closer than this to the suppression point (in pixels) are skipped.
pub const LABEL_SUPPRESS_RADIUS_PX: f64 = 20.0;
/// Gap between an axis and its tick labels, in pixels.
pub const LABEL_OFFSET_PX: f64 = 5.0;
/// Padding applied when none is specified.
pub const DEFAULT_PADDING_PX: f64 = 2.0;
/// Diameter of points drawn by `draw_point`/`scatter` by default.
pub const DEFAULT_POINT_RADIUS_PX: f64 = 10.0;
/// Upper bound on the steps a tick or grid walk may take.
pub const MAX_WALK_STEPS: f64 = 100_000.0;

/// A closed logical interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// The default `[-1, 1]` range.
    pub const UNIT: Range = Range { min: -1.0, max: 1.0 };

    /// Creates a range, rejecting non-finite or non-increasing bounds.
    pub fn new(min: f64, max: f64) -> Result<Self, VisError> {
        let range = Range { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn validate(&self) -> Result<(), VisError> {
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max {
            Ok(())
        } else {
            Err(VisError::DegenerateRange {
                min: self.min,
                max: self.max,
            })
        }
    }

    // Loop bounds for ticks and grids only need to be finite.
    fn ensure_finite(&self) -> Result<(), VisError> {
        if self.min.is_finite() && self.max.is_finite() {
            Ok(())
        } else {
            Err(VisError::DegenerateRange {
                min: self.min,
                max: self.max,
            })
        }
    }
}

impl Default for Range {
    fn default() -> Self {
        Range::UNIT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Where tick labels go relative to the axis line.
///
/// `Below`/`Above` apply to the x axis, `Left`/`Right` to the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSide {
    None,
    Below,
    Above,
    Left,
    Right,
}

impl LabelSide {
    fn valid_for(self, axis: Axis) -> bool {
        matches!(
            (axis, self),
            (_, LabelSide::None)
                | (Axis::X, LabelSide::Below | LabelSide::Above)
                | (Axis::Y, LabelSide::Left | LabelSide::Right)
        )
    }
}

/// Construction options for [`Plot`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    pub x_range: Range,
    pub y_range: Range,
    pub top_left: (f64, f64),
    pub padding: f64,
}

impl Default for PlotOptions {
    fn default() -> Self {
        PlotOptions {
            x_range: Range::UNIT,
            y_range: Range::UNIT,
            top_left: (0.0, 0.0),
            padding: DEFAULT_PADDING_PX,
        }
    }
}

/// Options for [`Plot::draw_axis`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisOptions {
    /// Extent of the axis line; defaults to the plot's range on that axis.
    pub range: Option<Range>,
    /// Coordinate on the other axis where the line sits.
    pub at: f64,
    pub start_arrow: bool,
    pub end_arrow: bool,
    /// Half-width of an arrowhead, in pixels.
    pub arrow_width: f64,
    /// Length of an arrowhead along the axis, in pixels.
    pub arrow_length: f64,
}

impl Default for AxisOptions {
    fn default() -> Self {
        AxisOptions {
            range: None,
            at: 0.0,
            start_arrow: true,
            end_arrow: true,
            arrow_width: 5.0,
            arrow_length: 10.0,
        }
    }
}

/// Formats a tick value into its label.
pub type LabelFormatter = Rc<dyn Fn(f64) -> String>;

/// Options for [`Plot::draw_ticks`].
#[derive(Clone)]
pub struct TickOptions {
    pub spacing: f64,
    /// Coordinate on the other axis where ticks are centred.
    pub at: f64,
    /// Tick mark length in pixels.
    pub length: f64,
    /// Interval walked; defaults to the plot's range on that axis.
    pub interval: Option<Range>,
    pub labels: LabelSide,
    /// Skip labels within [`LABEL_SUPPRESS_RADIUS_PX`] of this value.
    pub suppress_near: Option<f64>,
    pub formatter: LabelFormatter,
    pub tick_weight: f64,
}

impl TickOptions {
    /// Defaults for the given axis (labels below the x axis, left of the y
    /// axis).
    pub fn for_axis(axis: Axis) -> Self {
        TickOptions {
            spacing: 0.1,
            at: 0.0,
            length: 8.0,
            interval: None,
            labels: match axis {
                Axis::X => LabelSide::Below,
                Axis::Y => LabelSide::Left,
            },
            suppress_near: None,
            formatter: Rc::new(|v| format!("{:.2}", v)),
            tick_weight: 1.0,
        }
    }
}

impl fmt::Debug for TickOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickOptions")
            .field("spacing", &self.spacing)
            .field("at", &self.at)
            .field("length", &self.length)
            .field("interval", &self.interval)
            .field("labels", &self.labels)
            .field("suppress_near", &self.suppress_near)
            .field("tick_weight", &self.tick_weight)
            .finish_non_exhaustive()
    }
}

/// Options for [`Plot::draw_grid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOptions {
    pub x_interval: Option<Range>,
    pub y_interval: Option<Range>,
    pub x_spacing: f64,
    pub y_spacing: f64,
}

impl Default for GridOptions {
    fn default() -> Self {
        GridOptions {
            x_interval: None,
            y_interval: None,
            x_spacing: 0.1,
            y_spacing: 0.1,
        }
    }
}

/// Maps logical coordinates onto a pixel rectangle and draws in them.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    size: (f64, f64),
    top_left: (f64, f64),
    padding: f64,
    x_range: Range,
    y_range: Range,
}

impl Plot {
    /// A plot of the given pixel size with default ranges and padding.
    pub fn new(size: (f64, f64)) -> Result<Self, VisError> {
        Self::with_options(size, PlotOptions::default())
    }

    pub fn with_options(size: (f64, f64), options: PlotOptions) -> Result<Self, VisError> {
        options.x_range.validate()?;
        options.y_range.validate()?;
        check_size(size, options.padding)?;
        Ok(Plot {
            size,
            top_left: options.top_left,
            padding: options.padding,
            x_range: options.x_range,
            y_range: options.y_range,
        })
    }

    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    /// Resizes the pixel rectangle. Fails, leaving the plot unchanged, when
    /// the padding would swallow the whole rectangle.
    pub fn set_size(&mut self, width: f64, height: f64) -> Result<(), VisError> {
        check_size((width, height), self.padding)?;
        self.size = (width, height);
        Ok(())
    }

    pub fn top_left(&self) -> (f64, f64) {
        self.top_left
    }

    pub fn set_top_left(&mut self, x: f64, y: f64) {
        self.top_left = (x, y);
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn x_range(&self) -> Range {
        self.x_range
    }

    pub fn y_range(&self) -> Range {
        self.y_range
    }

    pub fn set_x_range(&mut self, range: Range) -> Result<(), VisError> {
        range.validate()?;
        self.x_range = range;
        Ok(())
    }

    pub fn set_y_range(&mut self, range: Range) -> Result<(), VisError> {
        range.validate()?;
        self.y_range = range;
        Ok(())
    }

    pub fn range(&self, axis: Axis) -> Range {
        match axis {
            Axis::X => self.x_range,
            Axis::Y => self.y_range,
        }
    }

    pub fn inner_top_left(&self) -> (f64, f64) {
        (self.top_left.0 + self.padding, self.top_left.1 + self.padding)
    }

    pub fn inner_size(&self) -> (f64, f64) {
        (
            self.size.0 - 2.0 * self.padding,
            self.size.1 - 2.0 * self.padding,
        )
    }

    /// Pixels per logical unit along x.
    pub fn x_scale(&self) -> f64 {
        self.inner_size().0 / self.x_range.span()
    }

    /// Pixels per logical unit along y.
    pub fn y_scale(&self) -> f64 {
        self.inner_size().1 / self.y_range.span()
    }

    pub fn scale(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x_scale(),
            Axis::Y => self.y_scale(),
        }
    }

    /// Logical x to pixel x.
    pub fn cx(&self, x: f64) -> f64 {
        (x - self.x_range.min) * self.x_scale() + self.inner_top_left().0
    }

    /// Logical y to pixel y (flipped).
    pub fn cy(&self, y: f64) -> f64 {
        self.inner_size().1 - (y - self.y_range.min) * self.y_scale() + self.inner_top_left().1
    }

    /// Pixel x to logical x.
    pub fn px(&self, px: f64) -> f64 {
        (px - self.inner_top_left().0) / self.x_scale() + self.x_range.min
    }

    /// Pixel y to logical y.
    pub fn py(&self, py: f64) -> f64 {
        (self.inner_size().1 - py + self.inner_top_left().1) / self.y_scale() + self.y_range.min
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        (self.cx(x), self.cy(y))
    }

    pub fn to_logical(&self, px: f64, py: f64) -> (f64, f64) {
        (self.px(px), self.py(py))
    }

    /// Draws a circle of the given pixel diameter centred at `(x, y)`.
    pub fn draw_point(&self, surface: &mut dyn Surface, x: f64, y: f64, radius: f64) -> Result<()> {
        let (cx, cy) = self.to_pixel(x, y);
        surface.circle(cx, cy, radius)
    }

    pub fn draw_line(
        &self,
        surface: &mut dyn Surface,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    ) -> Result<()> {
        let (a, b) = self.to_pixel(x1, y1);
        let (c, d) = self.to_pixel(x2, y2);
        surface.line(a, b, c, d)
    }

    /// Line plot: joins consecutive `(xs[i], ys[i])` with segments.
    pub fn draw_series(&self, surface: &mut dyn Surface, xs: &[f64], ys: &[f64]) -> Result<()> {
        check_lengths(xs, ys)?;
        trace!("Plot: series of {} points", xs.len());
        for i in 1..xs.len() {
            self.draw_line(surface, xs[i - 1], ys[i - 1], xs[i], ys[i])?;
        }
        Ok(())
    }

    /// Scatter plot: one point per `(xs[i], ys[i])`.
    pub fn scatter(
        &self,
        surface: &mut dyn Surface,
        xs: &[f64],
        ys: &[f64],
        radius: f64,
    ) -> Result<()> {
        check_lengths(xs, ys)?;
        trace!("Plot: scatter of {} points", xs.len());
        for (&x, &y) in xs.iter().zip(ys) {
            self.draw_point(surface, x, y, radius)?;
        }
        Ok(())
    }

    /// Draws an axis line with optional arrowheads.
    pub fn draw_axis(&self, surface: &mut dyn Surface, axis: Axis, opts: &AxisOptions) -> Result<()> {
        let range = opts.range.unwrap_or_else(|| self.range(axis));
        let ((sx, sy), (ex, ey)) = match axis {
            Axis::X => ((range.min, opts.at), (range.max, opts.at)),
            Axis::Y => ((opts.at, range.min), (opts.at, range.max)),
        };
        self.draw_line(surface, sx, sy, ex, ey)?;

        let (end_angle, start_angle) = match axis {
            Axis::X => (0.0, std::f64::consts::PI),
            Axis::Y => (std::f64::consts::FRAC_PI_2, -std::f64::consts::FRAC_PI_2),
        };
        if opts.end_arrow {
            self.draw_arrowhead(surface, ex, ey, end_angle, opts.arrow_width, opts.arrow_length)?;
        }
        if opts.start_arrow {
            self.draw_arrowhead(surface, sx, sy, start_angle, opts.arrow_width, opts.arrow_length)?;
        }
        Ok(())
    }

    /// Two strokes from the tip at `(x, y)`, pointing along `angle`
    /// (radians, counter-clockwise from +x on screen).
    ///
    /// Geometry is built in pixel space so the arrowhead keeps its on-screen
    /// size at any zoom.
    fn draw_arrowhead(
        &self,
        surface: &mut dyn Surface,
        x: f64,
        y: f64,
        angle: f64,
        width: f64,
        length: f64,
    ) -> Result<()> {
        let (tip_x, tip_y) = self.to_pixel(x, y);
        let (sin, cos) = angle.sin_cos();
        for (dx, dy) in [(-length, width), (-length, -width)] {
            let tail_x = dx * cos + dy * sin + tip_x;
            let tail_y = -dx * sin + dy * cos + tip_y;
            let (lx, ly) = self.to_logical(tail_x, tail_y);
            let (tx, ty) = self.to_logical(tip_x, tip_y);
            self.draw_line(surface, tx, ty, lx, ly)?;
        }
        Ok(())
    }

    /// Draws evenly spaced tick marks and, in a second pass, their labels.
    ///
    /// Ticks start at `interval.min + spacing` and stop before
    /// `interval.max`; they are not snapped to multiples of `spacing`.
    pub fn draw_ticks(&self, surface: &mut dyn Surface, axis: Axis, opts: &TickOptions) -> Result<()> {
        if !opts.labels.valid_for(axis) {
            return Err(VisError::InvalidLabelSide {
                axis,
                side: opts.labels,
            }
            .into());
        }
        let interval = opts.interval.unwrap_or_else(|| self.range(axis));
        check_walk(interval, opts.spacing)?;

        let half = opts.length / 2.0;
        let mut v = interval.min + opts.spacing;
        while v < interval.max {
            surface.stroke_weight(opts.tick_weight)?;
            match axis {
                Axis::X => {
                    let (px, py) = self.to_pixel(v, opts.at);
                    surface.line(px, py - half, px, py + half)?;
                }
                Axis::Y => {
                    let (px, py) = self.to_pixel(opts.at, v);
                    surface.line(px - half, py, px + half, py)?;
                }
            }
            v += opts.spacing;
        }

        // Labels go in their own pass so label styling never leaks into
        // tick marks.
        if opts.labels == LabelSide::None {
            return Ok(());
        }
        let scale = self.scale(axis);
        let mut v = interval.min + opts.spacing;
        while v < interval.max {
            let show = opts
                .suppress_near
                .map_or(true, |near| (v - near).abs() * scale > LABEL_SUPPRESS_RADIUS_PX);
            if show {
                let label = (opts.formatter)(v);
                surface.no_stroke()?;
                let (x, y, align) = self.label_placement(axis, opts.labels, v, opts.at);
                surface.text(&label, x, y, align)?;
            } else {
                trace!("Plot: label at {} suppressed", v);
            }
            v += opts.spacing;
        }
        Ok(())
    }

    fn label_placement(&self, axis: Axis, side: LabelSide, v: f64, at: f64) -> (f64, f64, TextAlign) {
        let (px, py) = match axis {
            Axis::X => self.to_pixel(v, at),
            Axis::Y => self.to_pixel(at, v),
        };
        match side {
            LabelSide::Above => (px, py - LABEL_OFFSET_PX, TextAlign::new(HAlign::Center, VAlign::Bottom)),
            LabelSide::Left => (px - LABEL_OFFSET_PX, py, TextAlign::new(HAlign::Right, VAlign::Center)),
            LabelSide::Right => (px + LABEL_OFFSET_PX, py, TextAlign::new(HAlign::Left, VAlign::Center)),
            // `None` never reaches here.
            LabelSide::Below | LabelSide::None => {
                (px, py + LABEL_OFFSET_PX, TextAlign::new(HAlign::Center, VAlign::Top))
            }
        }
    }

    /// Draws grid lines across the intervals, upper bounds inclusive.
    pub fn draw_grid(&self, surface: &mut dyn Surface, opts: &GridOptions) -> Result<()> {
        let xi = opts.x_interval.unwrap_or(self.x_range);
        let yi = opts.y_interval.unwrap_or(self.y_range);
        check_walk(xi, opts.x_spacing)?;
        check_walk(yi, opts.y_spacing)?;

        let mut x = xi.min;
        while x <= xi.max {
            self.draw_line(surface, x, yi.min, x, yi.max)?;
            x += opts.x_spacing;
        }
        let mut y = yi.min;
        while y <= yi.max {
            self.draw_line(surface, xi.min, y, xi.max, y)?;
            y += opts.y_spacing;
        }
        Ok(())
    }
}

fn check_lengths(xs: &[f64], ys: &[f64]) -> Result<(), VisError> {
    if xs.len() == ys.len() {
        Ok(())
    } else {
        Err(VisError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        })
    }
}

fn check_size(size: (f64, f64), padding: f64) -> Result<(), VisError> {
    let inner_w = size.0 - 2.0 * padding;
    let inner_h = size.1 - 2.0 * padding;
    if inner_w.is_finite() && inner_h.is_finite() && inner_w > 0.0 && inner_h > 0.0 {
        Ok(())
    } else {
        Err(VisError::InvalidSize {
            width: size.0,
            height: size.1,
            padding,
        })
    }
}

/// Checks that walking `interval` in `spacing` steps terminates: the step
/// must move the accumulator at both ends, and the step count is capped.
fn check_walk(interval: Range, spacing: f64) -> Result<(), VisError> {
    interval.ensure_finite()?;
    let invalid = Err(VisError::InvalidSpacing(spacing));
    if !(spacing.is_finite() && spacing > 0.0) {
        return invalid;
    }
    // Float steps are widest at the endpoint of largest magnitude.
    if interval.min + spacing == interval.min || interval.max + spacing == interval.max {
        return invalid;
    }
    if interval.span() / spacing > MAX_WALK_STEPS {
        return invalid;
    }
    Ok(())
}

/// `num` evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num).map(|i| start + step * i as f64).collect()
        }
    }
}
