// src/config.rs

//! Defines the configuration structures for the figure renderer.
//!
//! Every struct can be deserialized from JSON and carries `#[serde(default)]`,
//! so a config file only needs the settings it changes. Defaults reproduce the
//! book's stock look.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::figures::plot_example::PlotExampleConfig;
use crate::figures::template::TemplateConfig;
use crate::palette::PaletteConfig;
use crate::svg::SvgConfig;
use crate::theme::{initial_theme, ThemeId};

// --- Top-Level Configuration Structure ---

/// Represents the complete renderer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VisConfig {
    /// Stored theme preference ("light" or "dark"). Invalid values are
    /// ignored with a warning.
    pub theme: Option<String>,
    /// Stand-in for the operating system's dark-mode preference, consulted
    /// when no valid theme is stored.
    pub prefers_dark: bool,
    /// Foreground/background tables per theme.
    pub palette: PaletteConfig,
    /// Font metrics for static SVG output.
    pub svg: SvgConfig,
    /// Page position of the canvas, used by overlay labels.
    pub canvas_origin: (f64, f64),
    pub plot_example: PlotExampleConfig,
    pub template: TemplateConfig,
}

impl VisConfig {
    /// Reads a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: VisConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Loads `path` when given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                info!("Configuration loaded (using default).");
                Ok(Self::default())
            }
        }
    }

    /// The theme to start in: stored preference, else the dark-mode hint.
    pub fn initial_theme(&self) -> ThemeId {
        initial_theme(self.theme.as_deref(), self.prefers_dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use test_log::test;

    #[test]
    fn test_empty_json_yields_defaults() {
        let config: VisConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, VisConfig::default());
        assert_eq!(config.initial_theme(), ThemeId::Light);
    }

    #[test]
    fn test_defaults_round_trip_through_json() {
        let json = serde_json::to_string_pretty(&VisConfig::default()).unwrap();
        let back: VisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, VisConfig::default());
    }

    #[test]
    fn test_partial_overrides() {
        let json = r##"{
            "theme": "dark",
            "palette": { "dark": { "fg": "#eeeeee", "bg": "#101010" } },
            "plot_example": { "tick_spacing": 0.5 }
        }"##;
        let config: VisConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.initial_theme(), ThemeId::Dark);
        assert_eq!(config.palette.dark.bg, Rgb::new(0x10, 0x10, 0x10));
        assert_eq!(config.palette.light, PaletteConfig::default().light);
        assert_eq!(config.plot_example.tick_spacing, 0.5);
        assert_eq!(config.plot_example.samples, 100);
    }

    #[test]
    fn test_invalid_stored_theme_falls_back_to_os_hint() {
        let config = VisConfig {
            theme: Some("sepia".to_string()),
            prefers_dark: true,
            ..Default::default()
        };
        assert_eq!(config.initial_theme(), ThemeId::Dark);
    }

    #[test]
    fn test_bad_color_in_config_is_rejected() {
        let json = r#"{ "palette": { "light": { "fg": "black", "bg": "white" } } }"#;
        assert!(serde_json::from_str::<VisConfig>(json).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = VisConfig::load(Path::new("/nonexistent/mlbook-vis.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/mlbook-vis.json"));
    }
}
