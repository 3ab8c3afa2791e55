//! Plotting helpers for the book's interactive teaching figures.
//!
//! A figure owns a [`palette::Palette`] bound to a [`theme::ThemeProvider`]
//! and a [`plot::Plot`] coordinate space. Each frame it resolves colors,
//! converts logical coordinates to pixels and issues primitives to a
//! [`surface::Surface`]. Floating text that must follow plot positions goes
//! through an [`overlay::LabelOverlay`].
//!
//! The [`svg`] backend renders any figure to a static SVG document; the
//! `mlbook-vis` binary wraps it for the command line.

pub mod color;
pub mod config;
pub mod error;
pub mod figures;
pub mod overlay;
pub mod palette;
pub mod plot;
pub mod sketch;
pub mod surface;
pub mod svg;
pub mod theme;

#[cfg(test)]
pub(crate) mod testing;

pub use color::{ColorName, Rgb};
pub use config::VisConfig;
pub use error::VisError;
pub use overlay::{Anchor, LabelId, LabelOverlay, OverlayHost};
pub use palette::{Palette, PaletteConfig, ThemeColors};
pub use plot::{
    linspace, Axis, AxisOptions, GridOptions, LabelSide, Plot, PlotOptions, Range, TickOptions,
};
pub use sketch::{Figure, FrameContext, Response, Sketch};
pub use surface::{HAlign, Surface, TextAlign, VAlign};
pub use svg::{SvgConfig, SvgOverlay, SvgSurface};
pub use theme::{FnTheme, ThemeId, ThemeProvider, ThemeState};
