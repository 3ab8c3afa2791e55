// src/figures/mod.rs

//! Built-in figures and the name registry used by the command-line renderer.

pub mod plot_example;
pub mod template;

pub use plot_example::{PlotExample, PlotExampleConfig};
pub use template::Template;

use crate::config::VisConfig;
use crate::error::VisError;
use crate::palette::Palette;
use crate::sketch::Figure;
use crate::theme::ThemeState;

/// Names accepted by [`figure_by_name`].
pub const FIGURE_NAMES: [&str; 2] = [plot_example::NAME, template::NAME];

/// Builds the named figure with a palette bound to `theme`.
pub fn figure_by_name(
    name: &str,
    theme: ThemeState,
    config: &VisConfig,
) -> Result<Box<dyn Figure>, VisError> {
    let palette = Palette::with_config(theme, config.palette);
    match name {
        plot_example::NAME => Ok(Box::new(PlotExample::new(
            palette,
            config.plot_example.clone(),
        )?)),
        template::NAME => Ok(Box::new(Template::new(palette, config.template)?)),
        other => Err(VisError::UnknownFigure(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeId;
    use test_log::test;

    #[test]
    fn test_registry_knows_every_listed_name() {
        let config = VisConfig::default();
        for name in FIGURE_NAMES {
            let figure = figure_by_name(name, ThemeState::new(ThemeId::Light), &config).unwrap();
            assert_eq!(figure.name(), name);
        }
    }

    #[test]
    fn test_unknown_figure() {
        let err = figure_by_name("gesture", ThemeState::default(), &VisConfig::default())
            .err()
            .unwrap();
        assert_eq!(err, VisError::UnknownFigure("gesture".to_string()));
    }
}
