// src/color.rs

//! Defines the RGB color type and the enumerated set of color names
//! (`ColorName`) the palette can resolve.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VisError;

/// An opaque sRGB color with 8-bit channels.
///
/// Serialized as a `#rrggbb` string so config files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#rrggbb` string (hex digits are case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self, VisError> {
        let invalid = || VisError::InvalidHex(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Linear per-channel interpolation from `self` (factor 0) to `other`
    /// (factor 1). Channels are rounded half up and clamped to `0..=255`.
    pub fn interpolate(self, other: Rgb, factor: f64) -> Rgb {
        let mix = |a: u8, b: u8| -> u8 {
            let a = f64::from(a);
            let v = (a + factor * (f64::from(b) - a)).round();
            v.clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = VisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = VisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

// Hues shared by both themes.
pub const BLUE: Rgb = Rgb::new(0x0d, 0x6e, 0xfd);
pub const INDIGO: Rgb = Rgb::new(0x66, 0x10, 0xf2);
pub const PURPLE: Rgb = Rgb::new(0x6f, 0x42, 0xc1);
pub const PINK: Rgb = Rgb::new(0xd6, 0x33, 0x84);
pub const RED: Rgb = Rgb::new(0xdc, 0x35, 0x45);
pub const ORANGE: Rgb = Rgb::new(0xfd, 0x7e, 0x14);
pub const YELLOW: Rgb = Rgb::new(0xff, 0xc1, 0x07);
pub const GREEN: Rgb = Rgb::new(0x19, 0x87, 0x54);
pub const TEAL: Rgb = Rgb::new(0x20, 0xc9, 0x97);
pub const CYAN: Rgb = Rgb::new(0x0d, 0xca, 0xf0);
pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

/// Every color the palette knows how to resolve.
///
/// `Fg` and `Bg` come from the active theme; all other names map to a fixed
/// base color shared by both themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorName {
    Fg,
    Bg,
    // General hues
    Blue,
    Indigo,
    Purple,
    Pink,
    Red,
    Orange,
    Yellow,
    Green,
    Teal,
    Cyan,
    White,
    Black,
    // Purpose colors
    Primary,
    Good,
    Bad,
    Caution,
    // Categorical sequence for distinguishing data series
    C0,
    C1,
    C2,
    C3,
    C4,
    C5,
    C6,
    C7,
    C8,
}

/// Number of entries in the categorical sequence (`C0..C8`).
pub const CATEGORICAL_COUNT: usize = 9;

const CATEGORICAL: [ColorName; CATEGORICAL_COUNT] = [
    ColorName::C0,
    ColorName::C1,
    ColorName::C2,
    ColorName::C3,
    ColorName::C4,
    ColorName::C5,
    ColorName::C6,
    ColorName::C7,
    ColorName::C8,
];

impl ColorName {
    pub const ALL: [ColorName; 27] = [
        ColorName::Fg,
        ColorName::Bg,
        ColorName::Blue,
        ColorName::Indigo,
        ColorName::Purple,
        ColorName::Pink,
        ColorName::Red,
        ColorName::Orange,
        ColorName::Yellow,
        ColorName::Green,
        ColorName::Teal,
        ColorName::Cyan,
        ColorName::White,
        ColorName::Black,
        ColorName::Primary,
        ColorName::Good,
        ColorName::Bad,
        ColorName::Caution,
        ColorName::C0,
        ColorName::C1,
        ColorName::C2,
        ColorName::C3,
        ColorName::C4,
        ColorName::C5,
        ColorName::C6,
        ColorName::C7,
        ColorName::C8,
    ];

    /// Returns the categorical color for series number `idx`, wrapping
    /// around after `C8`.
    pub fn categorical(idx: usize) -> Self {
        CATEGORICAL[idx % CATEGORICAL_COUNT]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorName::Fg => "fg",
            ColorName::Bg => "bg",
            ColorName::Blue => "blue",
            ColorName::Indigo => "indigo",
            ColorName::Purple => "purple",
            ColorName::Pink => "pink",
            ColorName::Red => "red",
            ColorName::Orange => "orange",
            ColorName::Yellow => "yellow",
            ColorName::Green => "green",
            ColorName::Teal => "teal",
            ColorName::Cyan => "cyan",
            ColorName::White => "white",
            ColorName::Black => "black",
            ColorName::Primary => "primary",
            ColorName::Good => "good",
            ColorName::Bad => "bad",
            ColorName::Caution => "caution",
            ColorName::C0 => "c0",
            ColorName::C1 => "c1",
            ColorName::C2 => "c2",
            ColorName::C3 => "c3",
            ColorName::C4 => "c4",
            ColorName::C5 => "c5",
            ColorName::C6 => "c6",
            ColorName::C7 => "c7",
            ColorName::C8 => "c8",
        }
    }

    /// The fixed base color for this name, or `None` for the theme-dependent
    /// `Fg`/`Bg` roles.
    pub fn base_color(&self) -> Option<Rgb> {
        let color = match self {
            ColorName::Fg | ColorName::Bg => return None,
            ColorName::Blue | ColorName::Primary | ColorName::C0 => BLUE,
            ColorName::Indigo | ColorName::C8 => INDIGO,
            ColorName::Purple | ColorName::C4 => PURPLE,
            ColorName::Pink | ColorName::C7 => PINK,
            ColorName::Red | ColorName::Bad | ColorName::C1 => RED,
            ColorName::Orange | ColorName::C5 => ORANGE,
            ColorName::Yellow | ColorName::Caution | ColorName::C3 => YELLOW,
            ColorName::Green | ColorName::Good | ColorName::C2 => GREEN,
            ColorName::Teal | ColorName::C6 => TEAL,
            ColorName::Cyan => CYAN,
            ColorName::White => WHITE,
            ColorName::Black => BLACK,
        };
        Some(color)
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorName {
    type Err = VisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| VisError::UnknownColor(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_hex_parse_and_format() {
        let c = Rgb::from_hex("#0D6EFD").unwrap();
        assert_eq!(c, BLUE);
        assert_eq!(c.to_string(), "#0d6efd");
    }

    #[test]
    fn test_hex_rejects_malformed_input() {
        for bad in ["0d6efd", "#0d6ef", "#0d6efdd", "#zz6efd", "#é6efd"] {
            assert!(
                matches!(Rgb::from_hex(bad), Err(VisError::InvalidHex(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_interpolate_endpoints_and_rounding() {
        assert_eq!(WHITE.interpolate(BLUE, 0.0), WHITE);
        assert_eq!(WHITE.interpolate(BLUE, 1.0), BLUE);
        // 255 + 0.5 * (110 - 255) = 182.5 rounds up to 183
        assert_eq!(WHITE.interpolate(BLUE, 0.5), Rgb::new(0x86, 0xb7, 0xfe));
    }

    #[test]
    fn test_color_name_parsing() {
        for name in ColorName::ALL {
            assert_eq!(name.as_str().parse::<ColorName>().unwrap(), name);
        }
        assert_eq!(
            "danger".parse::<ColorName>(),
            Err(VisError::UnknownColor("danger".to_string()))
        );
    }

    #[test]
    fn test_purpose_and_categorical_aliases() {
        assert_eq!(ColorName::Primary.base_color(), Some(BLUE));
        assert_eq!(ColorName::Bad.base_color(), Some(RED));
        assert_eq!(ColorName::C8.base_color(), Some(INDIGO));
        assert_eq!(ColorName::Fg.base_color(), None);
        assert_eq!(ColorName::categorical(10), ColorName::C1);
    }

    #[test]
    fn test_rgb_serde_as_hex_string() {
        let json = serde_json::to_string(&TEAL).unwrap();
        assert_eq!(json, "\"#20c997\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TEAL);
    }
}
