use palette::Srgba;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque color from a packed `0xRRGGBB` value.
pub fn rgb_hex(rgb: u32) -> Srgba<f64> {
    let [_, r, g, b] = rgb.to_be_bytes();
    channels(r, g, b, u8::MAX)
}

fn channels(r: u8, g: u8, b: u8, a: u8) -> Srgba<f64> {
    let unit = |c: u8| f64::from(c) / 255.0;
    Srgba::new(unit(r), unit(g), unit(b), unit(a))
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid color '{0}', expected #rrggbb or #rrggbbaa")]
pub struct ParseColorError(String);

/// `#rrggbb` / `#rrggbbaa` color as written in config files.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(pub Srgba<f64>);

impl From<HexColor> for Srgba<f64> {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl From<Srgba<f64>> for HexColor {
    fn from(color: Srgba<f64>) -> Self {
        Self(color)
    }
}

impl FromStr for HexColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let digits = s.trim().trim_start_matches('#');
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(err());
        }

        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err());
        let alpha = if digits.len() == 8 { byte(6)? } else { u8::MAX };
        Ok(Self(channels(byte(0)?, byte(2)?, byte(4)?, alpha)))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.0.into_components();
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(f, "#{:02x}{:02x}{:02x}", byte(r), byte(g), byte(b))?;
        if byte(a) != u8::MAX {
            write!(f, "{:02x}", byte(a))?;
        }
        Ok(())
    }
}
