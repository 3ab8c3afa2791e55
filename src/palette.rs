// src/palette.rs

//! Resolves color names to concrete colors for the current theme.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::color::{ColorName, Rgb, BLACK, WHITE};
use crate::error::VisError;
use crate::theme::{ThemeId, ThemeProvider, ThemeState};

/// Foreground and background of one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub fg: Rgb,
    pub bg: Rgb,
}

impl ThemeColors {
    pub const LIGHT: ThemeColors = ThemeColors { fg: BLACK, bg: WHITE };
    pub const DARK: ThemeColors = ThemeColors {
        fg: WHITE,
        bg: Rgb::new(0x21, 0x25, 0x29),
    };
}

/// Per-theme foreground/background tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub light: ThemeColors,
    pub dark: ThemeColors,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        PaletteConfig {
            light: ThemeColors::LIGHT,
            dark: ThemeColors::DARK,
        }
    }
}

impl PaletteConfig {
    pub fn for_theme(&self, theme: ThemeId) -> ThemeColors {
        match theme {
            ThemeId::Light => self.light,
            ThemeId::Dark => self.dark,
        }
    }
}

/// Theme-aware color lookup.
///
/// Every call re-queries the provider; the palette never stores the theme.
pub struct Palette<P = ThemeState> {
    provider: P,
    tables: PaletteConfig,
}

impl<P: ThemeProvider> Palette<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, PaletteConfig::default())
    }

    pub fn with_config(provider: P, tables: PaletteConfig) -> Self {
        Self { provider, tables }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn theme(&self) -> Result<ThemeId, VisError> {
        self.provider.current()
    }

    /// The foreground/background pair of the current theme.
    pub fn colors(&self) -> Result<ThemeColors, VisError> {
        Ok(self.tables.for_theme(self.theme()?))
    }

    /// The named color, unblended.
    pub fn resolve(&self, name: ColorName) -> Result<Rgb, VisError> {
        self.resolve_blend(name, 1.0)
    }

    /// Blends the named color toward the background (`factor >= 0`) or the
    /// foreground (`factor < 0`).
    ///
    /// `1` gives the named color, `0` the background, `-1` the foreground.
    pub fn resolve_blend(&self, name: ColorName, factor: f64) -> Result<Rgb, VisError> {
        if !factor.is_finite() || !(-1.0..=1.0).contains(&factor) {
            return Err(VisError::InvalidFactor(factor));
        }
        let colors = self.colors()?;
        let named = match name {
            ColorName::Fg => colors.fg,
            ColorName::Bg => colors.bg,
            // Only Fg/Bg lack a base color.
            other => other
                .base_color()
                .ok_or_else(|| VisError::UnknownColor(other.to_string()))?,
        };
        let (other, amount) = if factor < 0.0 {
            (colors.fg, 1.0 + factor)
        } else {
            (colors.bg, factor)
        };
        let out = other.interpolate(named, amount);
        trace!("palette: {}({}) -> {}", name, factor, out);
        Ok(out)
    }

    /// Looks a color up by its string name.
    pub fn resolve_str(&self, name: &str, factor: f64) -> Result<Rgb, VisError> {
        self.resolve_blend(name.parse()?, factor)
    }

    pub fn fg(&self, factor: f64) -> Result<Rgb, VisError> {
        self.resolve_blend(ColorName::Fg, factor)
    }

    pub fn bg(&self, factor: f64) -> Result<Rgb, VisError> {
        self.resolve_blend(ColorName::Bg, factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, INDIGO};
    use crate::theme::FnTheme;
    use test_log::test;

    fn light() -> Palette {
        Palette::new(ThemeState::new(ThemeId::Light))
    }

    #[test]
    fn test_factor_one_is_raw_color() {
        let palette = light();
        assert_eq!(palette.resolve(ColorName::Primary).unwrap(), BLUE);
        assert_eq!(palette.resolve_blend(ColorName::C8, 1.0).unwrap(), INDIGO);
    }

    #[test]
    fn test_factor_zero_is_background_and_minus_one_is_foreground() {
        let palette = Palette::new(ThemeState::new(ThemeId::Dark));
        for name in [ColorName::Teal, ColorName::Fg, ColorName::C3] {
            assert_eq!(palette.resolve_blend(name, 0.0).unwrap(), ThemeColors::DARK.bg);
            assert_eq!(palette.resolve_blend(name, -1.0).unwrap(), ThemeColors::DARK.fg);
        }
    }

    #[test]
    fn test_half_blend_toward_background() {
        let palette = light();
        assert_eq!(
            palette.resolve_blend(ColorName::Primary, 0.5).unwrap().to_string(),
            "#86b7fe"
        );
    }

    #[test]
    fn test_negative_blend_moves_toward_foreground() {
        let palette = light();
        // -0.5 is halfway between foreground (black) and blue.
        let c = palette.resolve_blend(ColorName::Blue, -0.5).unwrap();
        assert_eq!(c, Rgb::new(7, 55, 127));
    }

    #[test]
    fn test_theme_switch_is_seen_without_rebuilding() {
        let state = ThemeState::new(ThemeId::Light);
        let palette = Palette::new(state.clone());
        assert_eq!(palette.bg(1.0).unwrap(), ThemeColors::LIGHT.bg);
        state.set(ThemeId::Dark);
        assert_eq!(palette.bg(1.0).unwrap(), ThemeColors::DARK.bg);
        assert_eq!(state.get(), ThemeId::Dark);
    }

    #[test]
    fn test_fg_blend_used_for_grid_lines() {
        let palette = light();
        // 0.15 of the way from white to black
        assert_eq!(palette.fg(0.15).unwrap(), Rgb::new(217, 217, 217));
    }

    #[test]
    fn test_unknown_name_and_bad_factor_fail_fast() {
        let palette = light();
        assert_eq!(
            palette.resolve_str("danger", 1.0),
            Err(VisError::UnknownColor("danger".to_string()))
        );
        assert_eq!(
            palette.resolve_blend(ColorName::Red, 1.5),
            Err(VisError::InvalidFactor(1.5))
        );
        assert!(palette.resolve_blend(ColorName::Red, f64::NAN).is_err());
    }

    #[test]
    fn test_unsupported_theme_from_getter() {
        let palette = Palette::new(FnTheme::new(|| "solarized"));
        assert!(matches!(
            palette.resolve(ColorName::Fg),
            Err(VisError::UnsupportedTheme(_))
        ));
    }
}
