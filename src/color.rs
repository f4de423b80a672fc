use serde::Deserialize;

use crate::error::{Error, Result};

/// An 8 bit per channel pixel color.
pub type Color = palette::Srgb<u8>;

pub const OFF: Color = Color::new(0, 0, 0);
#[cfg(test)]
pub const RED: Color = Color::new(255, 0, 0);
pub const AMBER: Color = Color::new(255, 100, 0);
pub const JADE: Color = Color::new(0, 255, 40);
pub const PURPLE: Color = Color::new(180, 0, 255);

/// Splits a packed `0xRRGGBB` value into its channels. Bits above 24 are ignored.
pub fn unpack(packed: u32) -> Color {
    Color::new(
        ((packed >> 16) & 0xFF) as u8,
        ((packed >> 8) & 0xFF) as u8,
        (packed & 0xFF) as u8,
    )
}

pub fn pack(color: Color) -> u32 {
    (color.red as u32) << 16 | (color.green as u32) << 8 | color.blue as u32
}

/// Scales every channel by `brightness`, truncating toward zero.
pub fn scale(color: Color, brightness: f64) -> Color {
    let channel = |c: u8| (c as f64 * brightness) as u8;
    Color::new(
        channel(color.red),
        channel(color.green),
        channel(color.blue),
    )
}

/// A color as written in a config file: `0xff8800`, `[255, 136, 0]` or `"#ff8800"`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ColorSpec {
    Packed(u32),
    Tuple(u8, u8, u8),
    Hex(String),
}

impl ColorSpec {
    pub fn to_color(&self) -> Result<Color> {
        match self {
            ColorSpec::Packed(packed) => Ok(unpack(*packed)),
            ColorSpec::Tuple(r, g, b) => Ok(Color::new(*r, *g, *b)),
            ColorSpec::Hex(hex) => {
                let digits = hex.strip_prefix('#').unwrap_or(hex);
                if digits.len() != 6 {
                    return Err(Error::configuration(format!(
                        "color {hex:?} is not of the form #rrggbb"
                    )));
                }

                match u32::from_str_radix(digits, 16) {
                    Ok(packed) => Ok(unpack(packed)),
                    Err(err) => Err(Error::configuration(format!(
                        "color {hex:?} is not valid hex: {err}"
                    ))),
                }
            }
        }
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        ColorSpec::Tuple(color.red, color.green, color.blue)
    }
}
