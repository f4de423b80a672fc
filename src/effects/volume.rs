use std::sync::Arc;

use crate::animation::Animation;
use crate::color::{Color, OFF};
use crate::error::{Error, Result};
use crate::intervaltimer::IntervalTimer;
use crate::mapping::map_range;
use crate::pixelbuffer::PixelBuffer;

/// Something that knows how loud things currently are.
pub trait LevelSource {
    fn rms_level(&self) -> f32;
}

/// Lights a run of pixels from the start of the strip, longer and brighter the louder the level.
pub struct Volume {
    name: String,
    timer: IntervalTimer,
    source: Arc<dyn LevelSource + Send + Sync>,
    max_volume: f32,
    brightest_color: Color,
    pixel_count: usize,
}

impl Volume {
    pub fn new(
        pixel_count: usize,
        speed: f32,
        brightest_color: Color,
        source: Arc<dyn LevelSource + Send + Sync>,
        max_volume: f32,
        name: &str,
    ) -> Result<Volume> {
        if !max_volume.is_finite() || max_volume <= 0.0 {
            return Err(Error::configuration(format!(
                "{name}: max volume must be a positive number, got {max_volume}"
            )));
        }

        Ok(Volume {
            name: name.to_string(),
            timer: IntervalTimer::from_speed(speed, name)?,
            source,
            max_volume,
            brightest_color,
            pixel_count,
        })
    }

    fn scale(&self, level: f64, out_max: f64) -> Result<f64> {
        map_range(level, 0.0, self.max_volume as f64, 0.0, out_max)
    }

    /// The color and number of lit pixels for `level`.
    pub fn frame_for(&self, level: f32) -> Result<(Color, usize)> {
        let level = level as f64;
        let color = Color::new(
            self.scale(level, self.brightest_color.red as f64)? as u8,
            self.scale(level, self.brightest_color.green as f64)? as u8,
            self.scale(level, self.brightest_color.blue as f64)? as u8,
        );
        let lit_pixels = self.scale(level, self.pixel_count as f64)? as usize;
        let lit_pixels = lit_pixels.min(self.pixel_count);
        Ok((color, lit_pixels))
    }
}

impl Animation for Volume {
    fn name(&self) -> &str {
        &self.name
    }

    fn timer(&self) -> &IntervalTimer {
        &self.timer
    }

    fn timer_mut(&mut self) -> &mut IntervalTimer {
        &mut self.timer
    }

    fn draw(&mut self, pixels: &mut dyn PixelBuffer) -> Result<()> {
        if pixels.len() < self.pixel_count {
            return Err(Error::configuration(format!(
                "{}: needs {} pixels but the buffer only has {}",
                self.name,
                self.pixel_count,
                pixels.len()
            )));
        }

        let (color, lit_pixels) = self.frame_for(self.source.rms_level())?;
        pixels.fill_range(0..lit_pixels, color);
        pixels.fill_range(lit_pixels..self.pixel_count, OFF);
        Ok(())
    }
}
