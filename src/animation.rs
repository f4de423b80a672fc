use std::time::Instant;

use crate::error::Result;
use crate::intervaltimer::IntervalTimer;
use crate::pixelbuffer::PixelBuffer;

/// The contract between an effect and whatever drives it.
///
/// Implementors only write pixels from `draw`. Everything else is bookkeeping.
pub trait Animation {
    fn name(&self) -> &str;

    fn timer(&self) -> &IntervalTimer;

    fn timer_mut(&mut self) -> &mut IntervalTimer;

    /// Writes the next frame into `pixels`. Must not leave a half written frame behind on error.
    fn draw(&mut self, pixels: &mut dyn PixelBuffer) -> Result<()>;

    /// Returns the effect to its initial frame.
    fn reset(&mut self) {
        self.timer_mut().reset();
    }

    /// Shifts the hue of effects that have one.
    fn advance_hue(&mut self, _step: i32) {}

    /// Whether a full cycle has finished since the last reset.
    fn cycle_complete(&self) -> bool {
        false
    }

    fn is_due(&self, now: Instant) -> bool {
        self.timer().is_due(now)
    }

    fn draw_count(&self) -> u64 {
        self.timer().ticks()
    }

    /// Draws and shows a frame if one is due. Returns whether it did.
    fn animate(&mut self, pixels: &mut dyn PixelBuffer, now: Instant) -> Result<bool> {
        if !self.is_due(now) {
            return Ok(false);
        }

        self.draw(pixels)?;
        pixels.show()?;
        self.timer_mut().mark(now);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::color::{Color, OFF};
    use crate::pixelbuffer::PixelStrip;

    struct Blink {
        timer: IntervalTimer,
        on: bool,
    }

    impl Animation for Blink {
        fn name(&self) -> &str {
            "blink"
        }

        fn timer(&self) -> &IntervalTimer {
            &self.timer
        }

        fn timer_mut(&mut self) -> &mut IntervalTimer {
            &mut self.timer
        }

        fn draw(&mut self, pixels: &mut dyn PixelBuffer) -> Result<()> {
            self.on = !self.on;
            let color = if self.on { Color::new(9, 9, 9) } else { OFF };
            pixels.fill(color);
            Ok(())
        }
    }

    fn blink() -> Blink {
        Blink {
            timer: IntervalTimer::new(Duration::from_millis(100), "blink", false),
            on: false,
        }
    }

    #[test]
    fn draws_only_when_due() {
        let mut animation = blink();
        let mut strip = PixelStrip::new(2);
        let start = Instant::now();

        assert!(animation.animate(&mut strip, start).unwrap());
        assert_eq!(strip.pixels(), &[Color::new(9, 9, 9); 2]);

        assert!(!animation
            .animate(&mut strip, start + Duration::from_millis(50))
            .unwrap());
        assert_eq!(strip.pixels(), &[Color::new(9, 9, 9); 2]);

        assert!(animation
            .animate(&mut strip, start + Duration::from_millis(100))
            .unwrap());
        assert_eq!(strip.pixels(), &[OFF; 2]);
        assert_eq!(animation.draw_count(), 2);
        assert_eq!(strip.frames_shown(), 2);
    }

    #[test]
    fn reset_makes_the_next_frame_due() {
        let mut animation = blink();
        let mut strip = PixelStrip::new(1);
        let start = Instant::now();

        assert!(animation.animate(&mut strip, start).unwrap());
        assert!(!animation.is_due(start));
        animation.reset();
        assert!(animation.animate(&mut strip, start).unwrap());
        assert_eq!(animation.draw_count(), 2);
    }
}
