// src/figures/plot_example.rs

//! Demonstrates the plotting helpers: a grid, both axes with ticks, the curve
//! `a * sin(pi * x)`, and two labelled markers sliding along it.
//!
//! Pressing the pointer pauses or resumes the animation.

use std::f64::consts::PI;

use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::ColorName;
use crate::error::VisError;
use crate::overlay::{Anchor, LabelOverlay};
use crate::palette::Palette;
use crate::plot::{
    linspace, Axis, AxisOptions, GridOptions, LabelSide, Plot, PlotOptions, TickOptions,
    DEFAULT_POINT_RADIUS_PX,
};
use crate::sketch::{Figure, FrameContext, Response};
use crate::theme::ThemeProvider;

pub const NAME: &str = "plot-example";

/// A marker that moves from `start` toward `stop` and then rests there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub label: String,
    pub start: f64,
    pub stop: f64,
}

/// Layout, styling and animation constants of the figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotExampleConfig {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub grid_spacing: f64,
    /// Blend factor of the grid lines toward the foreground.
    pub grid_blend: f64,
    pub grid_weight: f64,
    pub axis_weight: f64,
    pub tick_spacing: f64,
    pub amplitude: f64,
    pub samples: usize,
    pub curve_weight: f64,
    /// Frames needed for a marker to travel one logical unit.
    pub frames_per_unit: f64,
    /// The animation restarts after this many frames.
    pub loop_frames: u64,
    pub marker_radius: f64,
    pub marker_blend: f64,
    pub markers: Vec<MarkerConfig>,
}

impl Default for PlotExampleConfig {
    fn default() -> Self {
        PlotExampleConfig {
            width: 400.0,
            height: 300.0,
            padding: 10.0,
            grid_spacing: 0.25,
            grid_blend: 0.15,
            grid_weight: 1.0,
            axis_weight: 2.0,
            tick_spacing: 0.25,
            amplitude: 0.9,
            samples: 100,
            curve_weight: 2.0,
            frames_per_unit: 200.0,
            loop_frames: 500,
            marker_radius: DEFAULT_POINT_RADIUS_PX,
            marker_blend: 0.2,
            markers: vec![
                MarkerConfig {
                    label: "x₁".to_string(),
                    start: -1.0,
                    stop: 0.8,
                },
                MarkerConfig {
                    label: "x₂".to_string(),
                    start: -0.8,
                    stop: 1.0,
                },
            ],
        }
    }
}

pub struct PlotExample<P> {
    palette: Palette<P>,
    plot: Plot,
    config: PlotExampleConfig,
    labels: Option<LabelOverlay>,
    xs: Vec<f64>,
    ys: Vec<f64>,
    clock: u64,
}

impl<P: ThemeProvider> PlotExample<P> {
    pub fn new(palette: Palette<P>, config: PlotExampleConfig) -> Result<Self, VisError> {
        let plot = Plot::with_options(
            (config.width, config.height),
            PlotOptions {
                padding: config.padding,
                ..Default::default()
            },
        )?;
        let range = plot.x_range();
        let xs = linspace(range.min, range.max, config.samples);
        let ys = xs.iter().map(|&x| curve(config.amplitude, x)).collect();
        Ok(PlotExample {
            palette,
            plot,
            config,
            labels: None,
            xs,
            ys,
            clock: 0,
        })
    }

    pub fn plot(&self) -> &Plot {
        &self.plot
    }

    /// Current logical x of every marker.
    pub fn marker_positions(&self) -> Vec<f64> {
        let travelled = self.clock as f64 / self.config.frames_per_unit;
        self.config
            .markers
            .iter()
            .map(|m| (m.start + travelled).min(m.stop))
            .collect()
    }

    fn draw_frame(&self, ctx: &mut FrameContext<'_>) -> Result<()> {
        let s = &mut *ctx.surface;
        let cfg = &self.config;
        s.clear()?;
        s.background(self.palette.bg(1.0)?)?;

        s.stroke(self.palette.fg(cfg.grid_blend)?)?;
        s.stroke_weight(cfg.grid_weight)?;
        self.plot.draw_grid(
            s,
            &GridOptions {
                x_spacing: cfg.grid_spacing,
                y_spacing: cfg.grid_spacing,
                ..Default::default()
            },
        )?;

        let fg = self.palette.fg(1.0)?;
        s.stroke(fg)?;
        s.stroke_weight(cfg.axis_weight)?;
        self.plot.draw_axis(s, Axis::X, &AxisOptions::default())?;
        self.plot.draw_axis(s, Axis::Y, &AxisOptions::default())?;

        for (axis, labels) in [(Axis::X, LabelSide::Below), (Axis::Y, LabelSide::Left)] {
            s.fill(fg)?;
            s.stroke(fg)?;
            let ticks = TickOptions {
                spacing: cfg.tick_spacing,
                labels,
                suppress_near: Some(0.0),
                ..TickOptions::for_axis(axis)
            };
            self.plot.draw_ticks(s, axis, &ticks)?;
        }

        let indigo = self.palette.resolve(ColorName::Indigo)?;
        s.stroke_weight(cfg.curve_weight)?;
        s.stroke(indigo)?;
        self.plot.draw_series(s, &self.xs, &self.ys)?;

        let mx = self.marker_positions();
        let my: Vec<f64> = mx.iter().map(|&x| curve(cfg.amplitude, x)).collect();
        s.fill(self.palette.resolve_blend(ColorName::Indigo, cfg.marker_blend)?)?;
        self.plot.scatter(s, &mx, &my, cfg.marker_radius)?;

        if let Some(labels) = &self.labels {
            for (i, (&x, &y)) in mx.iter().zip(&my).enumerate() {
                labels.set_color(ctx.overlay, i, fg)?;
                labels.set_position(ctx.overlay, &self.plot, i, x, y, Anchor::Top)?;
            }
        }
        Ok(())
    }
}

fn curve(amplitude: f64, x: f64) -> f64 {
    amplitude * (x * PI).sin()
}

impl<P: ThemeProvider> Figure for PlotExample<P> {
    fn name(&self) -> &'static str {
        NAME
    }

    fn setup(&mut self, ctx: &mut FrameContext<'_>) -> Result<()> {
        ctx.surface.resize(self.config.width, self.config.height)?;
        ctx.surface.clear()?;
        let contents: Vec<&str> = self.config.markers.iter().map(|m| m.label.as_str()).collect();
        let labels = LabelOverlay::new(ctx.overlay, contents.as_slice())?;
        if !labels.is_empty() {
            labels.set_position(ctx.overlay, &self.plot, 0, 1.0, 0.0, Anchor::Center)?;
        }
        debug!("{}: created {} labels", NAME, labels.len());
        self.labels = Some(labels);
        Ok(())
    }

    fn draw(&mut self, ctx: &mut FrameContext<'_>) -> Result<()> {
        self.draw_frame(ctx)?;
        self.clock += 1;
        if self.clock > self.config.loop_frames {
            self.clock = 0;
        }
        Ok(())
    }

    fn pointer_pressed(&mut self, _x: f64, _y: f64) -> Result<Response> {
        Ok(Response::TogglePause)
    }

    fn resized(&mut self, width: f64, height: f64) -> Result<()> {
        self.plot.set_size(width, height)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::ThemeColors;
    use crate::sketch::Sketch;
    use crate::testing::{RecordingOverlay, RecordingSurface, SurfaceCall};
    use crate::theme::{ThemeId, ThemeState};
    use test_log::test;

    fn sketch(theme: &ThemeState) -> Sketch<PlotExample<ThemeState>> {
        let palette = Palette::new(theme.clone());
        Sketch::new(PlotExample::new(palette, PlotExampleConfig::default()).unwrap())
    }

    #[test]
    fn test_first_frame_draws_curve_markers_and_labels() {
        let theme = ThemeState::new(ThemeId::Light);
        let mut sketch = sketch(&theme);
        let mut surface = RecordingSurface::new(0.0, 0.0);
        let mut overlay = RecordingOverlay::new((0.0, 0.0), (10.0, 10.0));
        sketch.frame(&mut surface, &mut overlay).unwrap();

        assert_eq!((surface.width, surface.height), (400.0, 300.0));
        assert_eq!(overlay.contents(), vec!["x₁", "x₂"]);
        assert_eq!(surface.circles().len(), 2);
        assert!(surface
            .calls
            .contains(&SurfaceCall::Background(ThemeColors::LIGHT.bg)));

        // Marker 1 starts at x = -1, curve value 0: its label's top-centre
        // sits on (10, 150).
        let (x, y) = overlay.position(crate::overlay::LabelId(0)).unwrap();
        assert!((x - 5.0).abs() < 1e-9 && (y - 150.0).abs() < 1e-9);
        assert_eq!(overlay.labels[0].color, Some(ThemeColors::LIGHT.fg));
    }

    #[test]
    fn test_markers_advance_clamp_and_loop() {
        let theme = ThemeState::new(ThemeId::Light);
        let mut sketch = sketch(&theme);
        let mut surface = RecordingSurface::new(0.0, 0.0);
        let mut overlay = RecordingOverlay::new((0.0, 0.0), (10.0, 10.0));

        for _ in 0..100 {
            sketch.frame(&mut surface, &mut overlay).unwrap();
        }
        let pos = sketch.figure().marker_positions();
        assert!((pos[0] + 0.5).abs() < 1e-12);
        assert!((pos[1] + 0.3).abs() < 1e-12);

        for _ in 100..450 {
            sketch.frame(&mut surface, &mut overlay).unwrap();
        }
        assert_eq!(sketch.figure().marker_positions(), vec![0.8, 1.0]);

        for _ in 450..501 {
            sketch.frame(&mut surface, &mut overlay).unwrap();
        }
        assert_eq!(sketch.figure().marker_positions(), vec![-1.0, -0.8]);
    }

    #[test]
    fn test_theme_switch_restyles_next_frame() {
        let theme = ThemeState::new(ThemeId::Light);
        let mut sketch = sketch(&theme);
        let mut surface = RecordingSurface::new(0.0, 0.0);
        let mut overlay = RecordingOverlay::new((0.0, 0.0), (10.0, 10.0));
        sketch.frame(&mut surface, &mut overlay).unwrap();

        theme.set(ThemeId::Dark);
        surface.calls.clear();
        sketch.frame(&mut surface, &mut overlay).unwrap();
        assert!(surface
            .calls
            .contains(&SurfaceCall::Background(ThemeColors::DARK.bg)));
        assert_eq!(overlay.labels[1].color, Some(ThemeColors::DARK.fg));
    }

    #[test]
    fn test_resize_into_padding_is_an_error() {
        let theme = ThemeState::new(ThemeId::Light);
        let mut sketch = sketch(&theme);
        let mut surface = RecordingSurface::new(0.0, 0.0);
        assert!(sketch.resize(&mut surface, 20.0, 20.0).is_err());
        assert_eq!(sketch.figure().plot().size(), (400.0, 300.0));
        sketch.resize(&mut surface, 200.0, 100.0).unwrap();
        assert_eq!(sketch.figure().plot().size(), (200.0, 100.0));
    }

    #[test]
    fn test_pointer_press_pauses_animation() {
        let theme = ThemeState::new(ThemeId::Light);
        let mut sketch = sketch(&theme);
        let mut surface = RecordingSurface::new(0.0, 0.0);
        let mut overlay = RecordingOverlay::new((0.0, 0.0), (10.0, 10.0));
        sketch.frame(&mut surface, &mut overlay).unwrap();
        let before = sketch.figure().marker_positions();

        sketch.pointer_pressed(200.0, 150.0).unwrap();
        sketch.frame(&mut surface, &mut overlay).unwrap();
        assert_eq!(sketch.figure().marker_positions(), before);
    }
}
