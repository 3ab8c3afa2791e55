// src/svg.rs

//! Static rendering backend: a [`Surface`] and an [`OverlayHost`] that
//! together produce a standalone SVG document for one frame.
//!
//! Drawing state follows the usual canvas defaults (black stroke, white fill,
//! weight 1). A primitive with neither stroke nor fill emits nothing.

use anyhow::Result;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::color::{Rgb, BLACK, WHITE};
use crate::overlay::{LabelId, OverlayHost};
use crate::surface::{HAlign, Surface, TextAlign, VAlign};

/// Text metrics used when rendering and measuring labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    pub font_family: String,
    /// Font size of tick labels drawn on the surface.
    pub font_size: f64,
    /// Font size of overlay labels.
    pub label_font_size: f64,
    /// Average glyph advance as a fraction of the font size.
    pub char_width_ratio: f64,
    /// Line box height as a fraction of the font size.
    pub line_height_ratio: f64,
}

impl Default for SvgConfig {
    fn default() -> Self {
        SvgConfig {
            font_family: "sans-serif".to_string(),
            font_size: 12.0,
            label_font_size: 16.0,
            char_width_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Style {
    stroke: Option<Rgb>,
    fill: Option<Rgb>,
    weight: f64,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            stroke: Some(BLACK),
            fill: Some(WHITE),
            weight: 1.0,
        }
    }
}

impl Style {
    fn stroke_attrs(&self) -> String {
        match self.stroke {
            Some(c) => format!(r#"stroke="{}" stroke-width="{}""#, c, num(self.weight)),
            None => r#"stroke="none""#.to_string(),
        }
    }

    fn fill_attr(&self) -> String {
        match self.fill {
            Some(c) => format!(r#"fill="{}""#, c),
            None => r#"fill="none""#.to_string(),
        }
    }
}

/// Accumulates SVG elements for the current frame.
pub struct SvgSurface {
    width: f64,
    height: f64,
    style: Style,
    elements: Vec<String>,
    config: SvgConfig,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64, config: SvgConfig) -> Self {
        SvgSurface {
            width,
            height,
            style: Style::default(),
            elements: Vec::new(),
            config,
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Serializes the frame, with overlay labels on top when given.
    pub fn to_svg(&self, overlay: Option<&SvgOverlay>) -> String {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = num(self.width),
            h = num(self.height)
        );
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        if let Some(overlay) = overlay {
            for element in overlay.elements() {
                out.push_str("  ");
                out.push_str(&element);
                out.push('\n');
            }
        }
        out.push_str("</svg>\n");
        out
    }

    fn push(&mut self, element: String) {
        trace!("svg: {}", element);
        self.elements.push(element);
    }

    fn draws_nothing(&self) -> bool {
        self.style.stroke.is_none() && self.style.fill.is_none()
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        self.width = width;
        self.height = height;
        self.elements.clear();
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.elements.clear();
        Ok(())
    }

    fn background(&mut self, color: Rgb) -> Result<()> {
        self.push(format!(
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            num(self.width),
            num(self.height),
            color
        ));
        Ok(())
    }

    fn stroke(&mut self, color: Rgb) -> Result<()> {
        self.style.stroke = Some(color);
        Ok(())
    }

    fn no_stroke(&mut self) -> Result<()> {
        self.style.stroke = None;
        Ok(())
    }

    fn fill(&mut self, color: Rgb) -> Result<()> {
        self.style.fill = Some(color);
        Ok(())
    }

    fn no_fill(&mut self) -> Result<()> {
        self.style.fill = None;
        Ok(())
    }

    fn stroke_weight(&mut self, weight: f64) -> Result<()> {
        self.style.weight = weight;
        Ok(())
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        if self.style.stroke.is_none() {
            return Ok(());
        }
        let attrs = self.style.stroke_attrs();
        self.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {} stroke-linecap="round"/>"#,
            num(x1),
            num(y1),
            num(x2),
            num(y2),
            attrs
        ));
        Ok(())
    }

    fn circle(&mut self, cx: f64, cy: f64, diameter: f64) -> Result<()> {
        if self.draws_nothing() {
            return Ok(());
        }
        let element = format!(
            r#"<circle cx="{}" cy="{}" r="{}" {} {}/>"#,
            num(cx),
            num(cy),
            num(diameter / 2.0),
            self.style.fill_attr(),
            self.style.stroke_attrs()
        );
        self.push(element);
        Ok(())
    }

    fn point(&mut self, x: f64, y: f64) -> Result<()> {
        let Some(color) = self.style.stroke else {
            return Ok(());
        };
        let element = format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            num(x),
            num(y),
            num(self.style.weight / 2.0),
            color
        );
        self.push(element);
        Ok(())
    }

    fn triangle(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> Result<()> {
        if self.draws_nothing() {
            return Ok(());
        }
        let element = format!(
            r#"<polygon points="{},{} {},{} {},{}" {} {}/>"#,
            num(x1),
            num(y1),
            num(x2),
            num(y2),
            num(x3),
            num(y3),
            self.style.fill_attr(),
            self.style.stroke_attrs()
        );
        self.push(element);
        Ok(())
    }

    fn text(&mut self, text: &str, x: f64, y: f64, align: TextAlign) -> Result<()> {
        let Some(fill) = self.style.fill else {
            return Ok(());
        };
        let anchor = match align.h {
            HAlign::Left => "start",
            HAlign::Center => "middle",
            HAlign::Right => "end",
        };
        let baseline = match align.v {
            VAlign::Top => "hanging",
            VAlign::Center => "middle",
            VAlign::Bottom => "alphabetic",
        };
        let element = format!(
            r#"<text x="{}" y="{}" fill="{}" font-family="{}" font-size="{}" text-anchor="{}" dominant-baseline="{}">{}</text>"#,
            num(x),
            num(y),
            fill,
            escape(&self.config.font_family),
            num(self.config.font_size),
            anchor,
            baseline,
            escape(text)
        );
        self.push(element);
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct SvgLabel {
    content: String,
    position: (f64, f64),
    color: Rgb,
}

/// Overlay host that renders labels as SVG text on top of the canvas.
///
/// Label boxes are estimated from character count and the configured font
/// metrics.
pub struct SvgOverlay {
    origin: (f64, f64),
    labels: Vec<SvgLabel>,
    config: SvgConfig,
}

impl SvgOverlay {
    /// `origin` is the page position of the canvas; label positions are
    /// translated back by it when rendered into the canvas's SVG.
    pub fn new(origin: (f64, f64), config: SvgConfig) -> Self {
        SvgOverlay {
            origin,
            labels: Vec::new(),
            config,
        }
    }

    pub fn set_origin(&mut self, x: f64, y: f64) {
        self.origin = (x, y);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn position(&self, id: LabelId) -> Option<(f64, f64)> {
        self.labels.get(id.0).map(|l| l.position)
    }

    fn elements(&self) -> Vec<String> {
        self.labels
            .iter()
            .map(|label| {
                format!(
                    r#"<text x="{}" y="{}" fill="{}" font-family="{}" font-size="{}" dominant-baseline="hanging">{}</text>"#,
                    num(label.position.0 - self.origin.0),
                    num(label.position.1 - self.origin.1),
                    label.color,
                    escape(&self.config.font_family),
                    num(self.config.label_font_size),
                    escape(&label.content)
                )
            })
            .collect()
    }
}

impl OverlayHost for SvgOverlay {
    fn create_label(&mut self, content: &str) -> Result<LabelId> {
        self.labels.push(SvgLabel {
            content: content.to_string(),
            position: self.origin,
            color: BLACK,
        });
        Ok(LabelId(self.labels.len() - 1))
    }

    fn canvas_origin(&self) -> (f64, f64) {
        self.origin
    }

    fn label_size(&self, id: LabelId) -> (f64, f64) {
        let chars = self
            .labels
            .get(id.0)
            .map_or(0, |l| l.content.chars().count());
        let size = self.config.label_font_size;
        (
            chars as f64 * size * self.config.char_width_ratio,
            size * self.config.line_height_ratio,
        )
    }

    fn place_label(&mut self, id: LabelId, x: f64, y: f64) -> Result<()> {
        let label = self
            .labels
            .get_mut(id.0)
            .ok_or_else(|| anyhow::anyhow!("no label with id {}", id.0))?;
        label.position = (x, y);
        Ok(())
    }

    fn set_label_color(&mut self, id: LabelId, color: Rgb) -> Result<()> {
        let label = self
            .labels
            .get_mut(id.0)
            .ok_or_else(|| anyhow::anyhow!("no label with id {}", id.0))?;
        label.color = color;
        Ok(())
    }
}

/// Formats a coordinate with at most three decimals.
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_num_trims_trailing_zeros() {
        assert_eq!(num(200.0), "200");
        assert_eq!(num(1.5), "1.5");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(2.34567), "2.346");
    }

    #[test]
    fn test_lines_need_a_stroke() {
        let mut svg = SvgSurface::new(100.0, 50.0, SvgConfig::default());
        svg.line(0.0, 0.0, 10.0, 10.0).unwrap();
        svg.no_stroke().unwrap();
        svg.line(0.0, 0.0, 10.0, 10.0).unwrap();
        assert_eq!(svg.element_count(), 1);
        let doc = svg.to_svg(None);
        assert!(doc.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\" height=\"50\""));
        assert!(doc.contains(r##"<line x1="0" y1="0" x2="10" y2="10" stroke="#000000" stroke-width="1""##));
        assert!(doc.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_circle_uses_radius_and_current_style() {
        let mut svg = SvgSurface::new(100.0, 100.0, SvgConfig::default());
        svg.fill(Rgb::new(0x66, 0x10, 0xf2)).unwrap();
        svg.stroke_weight(2.0).unwrap();
        svg.circle(50.0, 40.0, 10.0).unwrap();
        let doc = svg.to_svg(None);
        assert!(doc.contains(
            r##"<circle cx="50" cy="40" r="5" fill="#6610f2" stroke="#000000" stroke-width="2"/>"##
        ));
    }

    #[test]
    fn test_text_is_escaped_and_aligned() {
        let mut svg = SvgSurface::new(100.0, 100.0, SvgConfig::default());
        svg.fill(BLACK).unwrap();
        svg.text("a<b & c", 5.0, 6.0, TextAlign::new(HAlign::Right, VAlign::Center))
            .unwrap();
        let doc = svg.to_svg(None);
        assert!(doc.contains("a&lt;b &amp; c</text>"));
        assert!(doc.contains(r#"text-anchor="end" dominant-baseline="middle""#));
    }

    #[test]
    fn test_clear_drops_previous_frame() {
        let mut svg = SvgSurface::new(10.0, 10.0, SvgConfig::default());
        svg.background(WHITE).unwrap();
        svg.clear().unwrap();
        svg.no_fill().unwrap();
        svg.no_stroke().unwrap();
        svg.circle(1.0, 1.0, 1.0).unwrap();
        assert_eq!(svg.element_count(), 0);
    }

    #[test]
    fn test_overlay_measures_and_renders_relative_to_canvas() {
        let config = SvgConfig::default();
        let mut overlay = SvgOverlay::new((50.0, 20.0), config.clone());
        let id = overlay.create_label("abc").unwrap();
        let (w, h) = overlay.label_size(id);
        assert!((w - 3.0 * 16.0 * 0.6).abs() < 1e-9);
        assert!((h - 16.0 * 1.2).abs() < 1e-9);

        overlay.place_label(id, 60.0, 30.0).unwrap();
        overlay.set_label_color(id, WHITE).unwrap();
        let svg = SvgSurface::new(10.0, 10.0, config);
        let doc = svg.to_svg(Some(&overlay));
        assert!(doc.contains(r##"<text x="10" y="10" fill="#ffffff""##));
        assert!(overlay.place_label(LabelId(3), 0.0, 0.0).is_err());
    }
}
