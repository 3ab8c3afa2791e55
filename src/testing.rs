// src/testing.rs

//! Recording doubles for the drawing surface and the overlay host, shared by
//! the unit tests.

use anyhow::Result;

use crate::color::Rgb;
use crate::overlay::{LabelId, OverlayHost};
use crate::surface::{Surface, TextAlign};

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Resize { width: f64, height: f64 },
    Clear,
    Background(Rgb),
    Stroke(Rgb),
    NoStroke,
    Fill(Rgb),
    NoFill,
    StrokeWeight(f64),
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Circle { cx: f64, cy: f64, diameter: f64 },
    Point { x: f64, y: f64 },
    Triangle([f64; 6]),
    Text { text: String, x: f64, y: f64, align: TextAlign },
}

pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        RecordingSurface {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn lines(&self) -> Vec<(f64, f64, f64, f64)> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                SurfaceCall::Line { x1, y1, x2, y2 } => Some((x1, y1, x2, y2)),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self) -> Vec<(f64, f64, f64)> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                SurfaceCall::Circle { cx, cy, diameter } => Some((cx, cy, diameter)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
    fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        self.width = width;
        self.height = height;
        self.calls.push(SurfaceCall::Resize { width, height });
        Ok(())
    }
    fn clear(&mut self) -> Result<()> {
        self.calls.push(SurfaceCall::Clear);
        Ok(())
    }
    fn background(&mut self, color: Rgb) -> Result<()> {
        self.calls.push(SurfaceCall::Background(color));
        Ok(())
    }
    fn stroke(&mut self, color: Rgb) -> Result<()> {
        self.calls.push(SurfaceCall::Stroke(color));
        Ok(())
    }
    fn no_stroke(&mut self) -> Result<()> {
        self.calls.push(SurfaceCall::NoStroke);
        Ok(())
    }
    fn fill(&mut self, color: Rgb) -> Result<()> {
        self.calls.push(SurfaceCall::Fill(color));
        Ok(())
    }
    fn no_fill(&mut self) -> Result<()> {
        self.calls.push(SurfaceCall::NoFill);
        Ok(())
    }
    fn stroke_weight(&mut self, weight: f64) -> Result<()> {
        self.calls.push(SurfaceCall::StrokeWeight(weight));
        Ok(())
    }
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        self.calls.push(SurfaceCall::Line { x1, y1, x2, y2 });
        Ok(())
    }
    fn circle(&mut self, cx: f64, cy: f64, diameter: f64) -> Result<()> {
        self.calls.push(SurfaceCall::Circle { cx, cy, diameter });
        Ok(())
    }
    fn point(&mut self, x: f64, y: f64) -> Result<()> {
        self.calls.push(SurfaceCall::Point { x, y });
        Ok(())
    }
    fn triangle(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> Result<()> {
        self.calls
            .push(SurfaceCall::Triangle([x1, y1, x2, y2, x3, y3]));
        Ok(())
    }
    fn text(&mut self, text: &str, x: f64, y: f64, align: TextAlign) -> Result<()> {
        self.calls.push(SurfaceCall::Text {
            text: text.to_string(),
            x,
            y,
            align,
        });
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedLabel {
    pub content: String,
    pub position: Option<(f64, f64)>,
    pub color: Option<Rgb>,
}

/// Overlay host with a fixed label size for every label.
pub struct RecordingOverlay {
    pub origin: (f64, f64),
    pub label_size: (f64, f64),
    pub labels: Vec<RecordedLabel>,
}

impl RecordingOverlay {
    pub fn new(origin: (f64, f64), label_size: (f64, f64)) -> Self {
        RecordingOverlay {
            origin,
            label_size,
            labels: Vec::new(),
        }
    }

    pub fn contents(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.content.as_str()).collect()
    }

    pub fn position(&self, id: LabelId) -> Option<(f64, f64)> {
        self.labels.get(id.0).and_then(|l| l.position)
    }
}

impl OverlayHost for RecordingOverlay {
    fn create_label(&mut self, content: &str) -> Result<LabelId> {
        self.labels.push(RecordedLabel {
            content: content.to_string(),
            position: None,
            color: None,
        });
        Ok(LabelId(self.labels.len() - 1))
    }
    fn canvas_origin(&self) -> (f64, f64) {
        self.origin
    }
    fn label_size(&self, _id: LabelId) -> (f64, f64) {
        self.label_size
    }
    fn place_label(&mut self, id: LabelId, x: f64, y: f64) -> Result<()> {
        if let Some(label) = self.labels.get_mut(id.0) {
            label.position = Some((x, y));
        }
        Ok(())
    }
    fn set_label_color(&mut self, id: LabelId, color: Rgb) -> Result<()> {
        if let Some(label) = self.labels.get_mut(id.0) {
            label.color = Some(color);
        }
        Ok(())
    }
}
