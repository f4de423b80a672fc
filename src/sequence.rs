use std::time::{Duration, Instant};

use crate::animation::Animation;
use crate::color::OFF;
use crate::error::{Error, Result};
use crate::pixelbuffer::PixelBuffer;

#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceOptions {
    /// Time spent on each animation, `None` to stay put.
    pub advance_interval: Option<Duration>,
    /// Blank the strip whenever another animation takes over.
    pub auto_clear: bool,
    /// Wheel positions added to the active animation's hue after each frame.
    pub hue_step: i32,
    /// Move on as soon as the active animation finishes a cycle.
    pub advance_on_cycle_complete: bool,
}

/// Plays a list of animations one after the other.
pub struct Sequence {
    animations: Vec<Box<dyn Animation>>,
    current: usize,
    options: SequenceOptions,
    next_advance: Option<Instant>,
}

impl Sequence {
    pub fn new(animations: Vec<Box<dyn Animation>>, options: SequenceOptions) -> Result<Sequence> {
        if animations.is_empty() {
            return Err(Error::configuration(
                "a sequence needs at least one animation",
            ));
        }

        Ok(Sequence {
            animations,
            current: 0,
            options,
            next_advance: None,
        })
    }

    pub fn current(&self) -> &dyn Animation {
        self.animations[self.current].as_ref()
    }

    #[cfg(test)]
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn activate(&mut self, index: usize, pixels: &mut dyn PixelBuffer) -> Result<()> {
        if index >= self.animations.len() {
            return Err(Error::configuration(format!(
                "no animation at index {index}, the sequence has {}",
                self.animations.len()
            )));
        }

        self.current = index;
        self.animations[index].reset();
        self.next_advance = None;
        log::info!("Now playing {}", self.animations[index].name());

        if self.options.auto_clear {
            pixels.fill(OFF);
            pixels.show()?;
        }
        Ok(())
    }

    pub fn next(&mut self, pixels: &mut dyn PixelBuffer) -> Result<()> {
        let index = (self.current + 1) % self.animations.len();
        self.activate(index, pixels)
    }

    /// Advances when the interval is up, then gives the current animation a chance to draw.
    /// A frame that completes the animation's cycle hands over to the next one if configured.
    pub fn animate(&mut self, pixels: &mut dyn PixelBuffer, now: Instant) -> Result<bool> {
        if let Some(interval) = self.options.advance_interval {
            if self.next_advance.is_some_and(|next_advance| now >= next_advance) {
                self.next(pixels)?;
            }
            if self.next_advance.is_none() {
                self.next_advance = Some(now + interval);
            }
        }

        let animation = &mut self.animations[self.current];
        let drew = animation.animate(pixels, now)?;
        if drew && self.options.hue_step != 0 {
            animation.advance_hue(self.options.hue_step);
        }

        if drew && self.options.advance_on_cycle_complete && animation.cycle_complete() {
            log::debug!("{} finished its cycle", animation.name());
            self.next(pixels)?;
        }
        Ok(drew)
    }
}
