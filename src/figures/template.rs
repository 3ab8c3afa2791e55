// src/figures/template.rs

//! The starting point for a new figure: a themed, empty canvas.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::palette::Palette;
use crate::plot::{Plot, PlotOptions};
use crate::sketch::{Figure, FrameContext};
use crate::theme::ThemeProvider;

pub const NAME: &str = "template";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        TemplateConfig {
            width: 400.0,
            height: 300.0,
            padding: 10.0,
        }
    }
}

pub struct Template<P> {
    palette: Palette<P>,
    plot: Plot,
    config: TemplateConfig,
}

impl<P: ThemeProvider> Template<P> {
    pub fn new(palette: Palette<P>, config: TemplateConfig) -> Result<Self, crate::error::VisError> {
        let plot = Plot::with_options(
            (config.width, config.height),
            PlotOptions {
                padding: config.padding,
                ..Default::default()
            },
        )?;
        Ok(Template {
            palette,
            plot,
            config,
        })
    }

    pub fn plot(&self) -> &Plot {
        &self.plot
    }
}

impl<P: ThemeProvider> Figure for Template<P> {
    fn name(&self) -> &'static str {
        NAME
    }

    fn setup(&mut self, ctx: &mut FrameContext<'_>) -> Result<()> {
        ctx.surface.resize(self.config.width, self.config.height)?;
        ctx.surface.clear()
    }

    fn draw(&mut self, ctx: &mut FrameContext<'_>) -> Result<()> {
        ctx.surface.clear()?;
        ctx.surface.background(self.palette.bg(1.0)?)
    }

    fn resized(&mut self, width: f64, height: f64) -> Result<()> {
        self.plot.set_size(width, height)?;
        Ok(())
    }
}
