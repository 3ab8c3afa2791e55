// src/error.rs

//! Error type shared by the palette, plot and overlay layers.
//!
//! All of these are programmer errors (bad names, mismatched data, bad
//! indices). They are reported at the point of misuse instead of silently
//! drawing nothing.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VisError {
    #[error("unknown color name: {0:?}")]
    UnknownColor(String),
    #[error("unsupported theme: {0:?} (expected \"light\" or \"dark\")")]
    UnsupportedTheme(String),
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
    #[error("blend factor {0} is outside [-1, 1]")]
    InvalidFactor(f64),
    #[error("degenerate range [{min}, {max}]: bounds must be finite with min < max")]
    DegenerateRange { min: f64, max: f64 },
    #[error("series length mismatch: {xs} x values but {ys} y values")]
    LengthMismatch { xs: usize, ys: usize },
    #[error("invalid spacing {0}: must be positive, finite and resolvable over the interval")]
    InvalidSpacing(f64),
    #[error("plot size {width}x{height} leaves no room inside padding {padding}")]
    InvalidSize { width: f64, height: f64, padding: f64 },
    #[error("label side {side:?} is not valid for the {axis:?} axis")]
    InvalidLabelSide {
        axis: crate::plot::Axis,
        side: crate::plot::LabelSide,
    },
    #[error("label index {index} out of bounds ({len} labels)")]
    LabelIndexOutOfBounds { index: usize, len: usize },
    #[error("unknown anchor: {0:?}")]
    UnknownAnchor(String),
    #[error("unknown figure: {0:?}")]
    UnknownFigure(String),
}
