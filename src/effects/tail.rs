use crate::color::{self, Color, OFF};
use crate::colorwheel::WheelSampler;
use crate::error::{Error, Result};
use crate::pixelbuffer::PixelBuffer;

/// Brightness of the dimmest lit tail step.
pub const COLOR_OFFSET: f64 = 0.1;

/// Spread of brightness across the lit tail steps.
const BRIGHTNESS_SPAN: f64 = 0.9;

/// Checks a configured tail length against the strip, defaulting to a quarter of it.
pub fn resolve_tail_length(
    num_pixels: usize,
    tail_length: Option<usize>,
    name: &str,
) -> Result<usize> {
    let tail_length = tail_length.unwrap_or((num_pixels / 4).max(1));
    if tail_length == 0 {
        return Err(Error::configuration(format!(
            "{name}: tail length must be at least 1"
        )));
    }
    if tail_length > num_pixels {
        return Err(Error::configuration(format!(
            "{name}: tail length {tail_length} exceeds the {num_pixels} available pixels"
        )));
    }
    Ok(tail_length)
}

pub enum TailHue<'a> {
    /// Every step is a dimmed copy of one color.
    Solid(Color),
    /// Every step samples the wheel, `offset` positions further along.
    Wheel {
        sampler: &'a WheelSampler,
        offset: i32,
    },
}

/// The cached colors of a fading tail. Entry 0 is the pixel just behind the tail and always off.
pub struct TailProfile {
    tail_length: usize,
    color_step: f64,
    comet_colors: Vec<Color>,
    reversed_comet_colors: Vec<Color>,
}

impl TailProfile {
    pub fn new(tail_length: usize, hue: TailHue) -> TailProfile {
        let mut profile = TailProfile {
            tail_length,
            color_step: BRIGHTNESS_SPAN / tail_length as f64,
            comet_colors: Vec::with_capacity(tail_length),
            reversed_comet_colors: Vec::with_capacity(tail_length),
        };
        profile.recompute(hue);
        profile
    }

    pub fn brightness(&self, step: usize) -> f64 {
        step as f64 * self.color_step + COLOR_OFFSET
    }

    /// Wheel position of tail step `step`. Any `offset` works, only its value modulo 256 matters.
    pub fn hue_position(&self, step: usize, offset: i32) -> i32 {
        let factor = (256 / self.tail_length) as i32;
        (step as i32 * factor + offset.rem_euclid(256)).rem_euclid(256)
    }

    pub fn recompute(&mut self, hue: TailHue) {
        self.comet_colors.clear();
        self.comet_colors.push(OFF);
        for step in 0..self.tail_length - 1 {
            let full = match &hue {
                TailHue::Solid(color) => *color,
                TailHue::Wheel { sampler, offset } => {
                    sampler.sample(self.hue_position(step, *offset))
                }
            };
            let brightness = self.brightness(step);
            self.comet_colors.push(color::scale(full, brightness));
        }

        self.reversed_comet_colors.clear();
        self.reversed_comet_colors.extend(self.comet_colors.iter().rev());
    }

    pub fn comet_colors(&self) -> &[Color] {
        &self.comet_colors
    }

    pub fn reversed_comet_colors(&self) -> &[Color] {
        &self.reversed_comet_colors
    }
}

/// Where a tail currently sits on the strip and which way it travels.
///
/// The head position walks over `-tail_length..=num_pixels`, so the tail enters and
/// leaves the strip one pixel at a time.
pub struct TailGeometry {
    num_pixels: i64,
    tail_length: i64,
    start: i64,
    reverse: bool,
    initial_reverse: bool,
    bounce: bool,
    passes: u32,
    cycle_complete: bool,
}

/// A run of tail colors that lands on the strip.
#[derive(Debug, PartialEq, Eq)]
pub struct Span {
    pub pixel: usize,
    pub color: usize,
    pub len: usize,
}

impl TailGeometry {
    pub fn new(
        num_pixels: usize,
        tail_length: usize,
        reverse: bool,
        bounce: bool,
    ) -> TailGeometry {
        let mut geometry = TailGeometry {
            num_pixels: num_pixels as i64,
            tail_length: tail_length as i64,
            start: 0,
            reverse,
            initial_reverse: reverse,
            bounce,
            passes: 0,
            cycle_complete: false,
        };
        geometry.start = geometry.entry_position();
        geometry
    }

    #[cfg(test)]
    pub fn head(&self) -> i64 {
        self.start
    }

    #[cfg(test)]
    pub fn reverse(&self) -> bool {
        self.reverse
    }

    pub fn cycle_complete(&self) -> bool {
        self.cycle_complete
    }

    fn entry_position(&self) -> i64 {
        if self.reverse {
            self.num_pixels
        } else {
            -self.tail_length
        }
    }

    pub fn visible_span(&self) -> Option<Span> {
        let span = if self.start <= 0 {
            let visible = self.tail_length + self.start;
            Span {
                pixel: 0,
                color: (self.tail_length - visible) as usize,
                len: visible as usize,
            }
        } else {
            let end = self.tail_length.min(self.num_pixels - self.start);
            Span {
                pixel: self.start as usize,
                color: 0,
                len: end as usize,
            }
        };

        if span.len == 0 {
            None
        } else {
            Some(span)
        }
    }

    /// Moves the head one pixel on, turning around or wrapping once it leaves the strip.
    /// Returns whether that completed a pass.
    pub fn advance(&mut self) -> bool {
        self.start += if self.reverse { -1 } else { 1 };
        if self.start >= -self.tail_length && self.start <= self.num_pixels {
            return false;
        }

        self.passes += 1;
        if self.bounce {
            self.reverse = !self.reverse;
        }
        if !self.bounce || self.passes == 2 {
            self.cycle_complete = true;
            self.passes = 0;
        }
        self.start = self.entry_position();
        true
    }

    pub fn reset(&mut self) {
        self.reverse = self.initial_reverse;
        self.passes = 0;
        self.cycle_complete = false;
        self.start = self.entry_position();
    }

    /// Copies the visible part of the tail into `pixels`.
    pub fn paint(&self, profile: &TailProfile, pixels: &mut dyn PixelBuffer) -> Result<()> {
        if pixels.len() < self.num_pixels as usize {
            return Err(Error::configuration(format!(
                "comet needs {} pixels but the buffer only has {}",
                self.num_pixels,
                pixels.len()
            )));
        }

        let colors = if self.reverse {
            profile.reversed_comet_colors()
        } else {
            profile.comet_colors()
        };

        if let Some(span) = self.visible_span() {
            pixels.write_range(span.pixel, &colors[span.color..span.color + span.len]);
        }
        Ok(())
    }
}
