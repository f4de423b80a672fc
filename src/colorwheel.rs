use palette::{FromColor, Hsv, Srgb};
use serde::Deserialize;

use crate::color::{self, Color};

/// What a color wheel hands back for a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelColor {
    Tuple(u8, u8, u8),
    Packed(u32),
}

impl WheelColor {
    pub fn to_color(self) -> Color {
        match self {
            WheelColor::Tuple(r, g, b) => Color::new(r, g, b),
            WheelColor::Packed(packed) => color::unpack(packed),
        }
    }
}

/// A full saturation hue cycle with a period of 256 positions.
///
/// Implementations must accept any position and wrap it modulo 256.
pub trait ColorWheel {
    fn wheel(&self, pos: i32) -> WheelColor;
}

fn wheel_channels(pos: i32) -> (u8, u8, u8) {
    let pos = pos.rem_euclid(256);
    if pos < 85 {
        return ((255 - pos * 3) as u8, (pos * 3) as u8, 0);
    }
    if pos < 170 {
        let pos = pos - 85;
        return (0, (255 - pos * 3) as u8, (pos * 3) as u8);
    }
    let pos = pos - 170;
    ((pos * 3) as u8, 0, (255 - pos * 3) as u8)
}

/// Red to green to blue and back, handed out as channel tuples.
pub struct ClassicWheel;

impl ColorWheel for ClassicWheel {
    fn wheel(&self, pos: i32) -> WheelColor {
        let (r, g, b) = wheel_channels(pos);
        WheelColor::Tuple(r, g, b)
    }
}

/// The classic wheel, handed out as packed `0xRRGGBB` values.
pub struct PackedWheel;

impl ColorWheel for PackedWheel {
    fn wheel(&self, pos: i32) -> WheelColor {
        let (r, g, b) = wheel_channels(pos);
        WheelColor::Packed(color::pack(Color::new(r, g, b)))
    }
}

/// Samples the HSV hue circle instead of the three linear segments.
pub struct HsvWheel;

impl ColorWheel for HsvWheel {
    fn wheel(&self, pos: i32) -> WheelColor {
        let hue = pos.rem_euclid(256) as f32 * 360.0 / 256.0;
        let hsv: Hsv = Hsv::new(hue, 1.0, 1.0);
        let rgb: Srgb = Srgb::from_color(hsv);
        let rgb: Color = rgb.into_format();
        WheelColor::Tuple(rgb.red, rgb.green, rgb.blue)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WheelKind {
    #[default]
    Classic,
    Packed,
    Hsv,
}

impl WheelKind {
    pub fn build(self) -> Box<dyn ColorWheel + Send> {
        match self {
            WheelKind::Classic => Box::new(ClassicWheel),
            WheelKind::Packed => Box::new(PackedWheel),
            WheelKind::Hsv => Box::new(HsvWheel),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelMode {
    Tuple,
    Packed,
}

impl WheelMode {
    pub fn detect(wheel: &dyn ColorWheel) -> WheelMode {
        match wheel.wheel(0) {
            WheelColor::Tuple(..) => WheelMode::Tuple,
            WheelColor::Packed(_) => WheelMode::Packed,
        }
    }
}

/// Owns a wheel together with the representation it was found to produce.
pub struct WheelSampler {
    wheel: Box<dyn ColorWheel + Send>,
    mode: WheelMode,
}

impl WheelSampler {
    pub fn new(wheel: Box<dyn ColorWheel + Send>) -> WheelSampler {
        let mode = WheelMode::detect(wheel.as_ref());
        log::debug!("Color wheel produces {:?} colors", mode);
        WheelSampler { wheel, mode }
    }

    #[cfg(test)]
    pub fn mode(&self) -> WheelMode {
        self.mode
    }

    pub fn sample(&self, pos: i32) -> Color {
        match (self.mode, self.wheel.wheel(pos)) {
            (WheelMode::Tuple, WheelColor::Tuple(r, g, b)) => Color::new(r, g, b),
            (WheelMode::Packed, WheelColor::Packed(packed)) => color::unpack(packed),
            // The wheel switched representation after detection.
            (_, other) => other.to_color(),
        }
    }
}
