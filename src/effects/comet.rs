use crate::animation::Animation;
use crate::color::Color;
use crate::colorwheel::{ColorWheel, WheelSampler};
use crate::effects::tail::{resolve_tail_length, TailGeometry, TailHue, TailProfile};
use crate::error::Result;
use crate::intervaltimer::IntervalTimer;
use crate::pixelbuffer::PixelBuffer;

enum CometStyle {
    Solid(Color),
    Rainbow {
        sampler: WheelSampler,
        colorwheel_offset: i32,
        hue_offset: i32,
    },
}

impl CometStyle {
    fn hue(&self) -> TailHue<'_> {
        match self {
            CometStyle::Solid(color) => TailHue::Solid(*color),
            CometStyle::Rainbow {
                sampler,
                colorwheel_offset,
                hue_offset,
            } => TailHue::Wheel {
                sampler,
                offset: hue_offset + colorwheel_offset,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CometOptions {
    /// Seconds between frames.
    pub speed: f32,
    /// Defaults to a quarter of the strip.
    pub tail_length: Option<usize>,
    pub reverse: bool,
    pub bounce: bool,
}

/// A lit pixel running along the strip with a fading tail behind it.
pub struct Comet {
    name: String,
    timer: IntervalTimer,
    style: CometStyle,
    profile: TailProfile,
    geometry: TailGeometry,
}

impl Comet {
    pub fn new(
        num_pixels: usize,
        color: Color,
        options: CometOptions,
        name: &str,
    ) -> Result<Comet> {
        Comet::build(num_pixels, CometStyle::Solid(color), options, name)
    }

    /// A comet whose tail runs through the color wheel, starting `colorwheel_offset` positions in.
    pub fn rainbow(
        num_pixels: usize,
        wheel: Box<dyn ColorWheel + Send>,
        colorwheel_offset: i32,
        options: CometOptions,
        name: &str,
    ) -> Result<Comet> {
        let style = CometStyle::Rainbow {
            sampler: WheelSampler::new(wheel),
            colorwheel_offset: colorwheel_offset.rem_euclid(256),
            hue_offset: 0,
        };
        Comet::build(num_pixels, style, options, name)
    }

    fn build(
        num_pixels: usize,
        style: CometStyle,
        options: CometOptions,
        name: &str,
    ) -> Result<Comet> {
        let tail_length = resolve_tail_length(num_pixels, options.tail_length, name)?;
        let timer = IntervalTimer::from_speed(options.speed, name)?;
        let profile = TailProfile::new(tail_length, style.hue());
        log::debug!(
            "{name}: comet over {num_pixels} pixels with a tail of {tail_length}, every {:?}",
            timer.interval()
        );

        Ok(Comet {
            name: name.to_string(),
            timer,
            style,
            profile,
            geometry: TailGeometry::new(num_pixels, tail_length, options.reverse, options.bounce),
        })
    }

    #[cfg(test)]
    pub fn tail(&self) -> &TailProfile {
        &self.profile
    }

    #[cfg(test)]
    pub fn geometry(&self) -> &TailGeometry {
        &self.geometry
    }

    /// Moves a rainbow comet's hues to start `hue_offset` positions further along the wheel.
    pub fn set_hue_offset(&mut self, offset: i32) {
        if let CometStyle::Rainbow { hue_offset, .. } = &mut self.style {
            let offset = offset.rem_euclid(256);
            if *hue_offset != offset {
                *hue_offset = offset;
                self.profile.recompute(self.style.hue());
            }
        }
    }

    pub fn hue_offset(&self) -> Option<i32> {
        match self.style {
            CometStyle::Solid(_) => None,
            CometStyle::Rainbow { hue_offset, .. } => Some(hue_offset),
        }
    }
}

impl Animation for Comet {
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
        self.geometry.paint(&self.profile, pixels)?;
        if self.geometry.advance() && self.geometry.cycle_complete() {
            log::trace!("{}: cycle complete", self.name);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.geometry.reset();
        self.timer.reset();
    }

    fn advance_hue(&mut self, step: i32) {
        if let Some(offset) = self.hue_offset() {
            self.set_hue_offset(offset + step.rem_euclid(256));
        }
    }

    fn cycle_complete(&self) -> bool {
        self.geometry.cycle_complete()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::color::{OFF, PURPLE};
    use crate::colorwheel::{ClassicWheel, PackedWheel};
    use crate::error::Error;
    use crate::pixelbuffer::PixelStrip;

    fn options(tail_length: usize, bounce: bool) -> CometOptions {
        CometOptions {
            speed: 0.1,
            tail_length: Some(tail_length),
            reverse: false,
            bounce,
        }
    }

    #[test]
    fn oversized_tails_are_rejected_up_front() {
        let result = Comet::new(8, PURPLE, options(9, false), "comet");
        assert!(matches!(result, Err(Error::Configuration(_))));

        let result = Comet::rainbow(8, Box::new(ClassicWheel), 0, options(9, false), "rainbow");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn default_tail_is_a_quarter_of_the_strip() {
        let comet = Comet::new(32, PURPLE, CometOptions::default(), "comet").unwrap();
        assert_eq!(comet.tail().comet_colors().len(), 8);
    }

    #[test]
    fn empty_strips_are_rejected_up_front() {
        let defaults = CometOptions {
            speed: 0.1,
            ..Default::default()
        };
        let result = Comet::new(0, PURPLE, defaults, "comet");
        assert!(matches!(result, Err(Error::Configuration(_))));

        let result = Comet::rainbow(0, Box::new(ClassicWheel), 0, defaults, "rainbow");
        assert!(matches!(result, Err(Error::Configuration(_))));

        let result = Comet::new(0, PURPLE, options(1, false), "comet");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn comet_walks_across_the_strip() {
        let white = Color::new(255, 255, 255);
        let mut comet = Comet::new(6, white, options(3, false), "comet").unwrap();
        let mut strip = PixelStrip::new(6);

        // Enters at -3, so the fourth frame puts the whole tail on pixels 0..3.
        for _ in 0..4 {
            comet.draw(&mut strip).unwrap();
        }
        let colors = comet.tail().comet_colors().to_vec();
        assert_eq!(
            strip.pixels(),
            &[colors[0], colors[1], colors[2], OFF, OFF, OFF]
        );
    }

    fn rainbow(colorwheel_offset: i32, options: CometOptions) -> Comet {
        Comet::rainbow(10, Box::new(ClassicWheel), colorwheel_offset, options, "r").unwrap()
    }

    #[test]
    fn solid_tails_dim_the_comet_color() {
        let red = Color::new(255, 0, 0);
        let comet = Comet::new(10, red, options(4, false), "comet").unwrap();
        assert_eq!(comet.tail().comet_colors()[3], Color::new(140, 0, 0));

        let mut expected = comet.tail().comet_colors().to_vec();
        expected.reverse();
        assert_eq!(comet.tail().reversed_comet_colors(), expected.as_slice());
    }

    #[test]
    fn colorwheel_offset_adds_to_the_hue_offset() {
        let shifted = rainbow(200, options(5, false));
        let mut stepped =
            Comet::rainbow(10, Box::new(PackedWheel), 100, options(5, false), "b").unwrap();
        stepped.set_hue_offset(100);

        assert_eq!(stepped.hue_offset(), Some(100));
        assert_eq!(shifted.tail().comet_colors(), stepped.tail().comet_colors());
    }

    #[test]
    fn huge_colorwheel_offsets_wrap_instead_of_overflowing() {
        let near_max = rainbow(i32::MAX - 10, options(4, false));
        let reduced = rainbow((i32::MAX - 10).rem_euclid(256), options(4, false));
        assert_eq!(
            near_max.tail().comet_colors(),
            reduced.tail().comet_colors()
        );

        let near_min = rainbow(i32::MIN + 10, options(4, false));
        let reduced = rainbow((i32::MIN + 10).rem_euclid(256), options(4, false));
        assert_eq!(
            near_min.tail().comet_colors(),
            reduced.tail().comet_colors()
        );
    }

    #[test]
    fn huge_hue_steps_wrap_instead_of_overflowing() {
        let mut comet = rainbow(i32::MAX, options(4, false));
        comet.advance_hue(i32::MAX);
        assert_eq!(comet.hue_offset(), Some(i32::MAX.rem_euclid(256)));

        comet.advance_hue(i32::MIN);
        assert_eq!(
            comet.hue_offset(),
            Some((i32::MAX.rem_euclid(256) + i32::MIN.rem_euclid(256)) % 256)
        );
    }

    #[test]
    fn hue_advances_wrap() {
        let mut comet = rainbow(0, options(5, false));
        let start = comet.tail().comet_colors().to_vec();

        comet.advance_hue(200);
        assert_eq!(comet.hue_offset(), Some(200));
        assert_ne!(comet.tail().comet_colors(), start.as_slice());

        comet.advance_hue(56);
        assert_eq!(comet.hue_offset(), Some(0));
        assert_eq!(comet.tail().comet_colors(), start.as_slice());
    }

    #[test]
    fn solid_comets_have_no_hue() {
        let mut comet = Comet::new(10, PURPLE, options(4, false), "comet").unwrap();
        comet.advance_hue(10);
        assert_eq!(comet.hue_offset(), None);
    }

    #[test]
    fn bounce_cycle_completes_after_two_passes() {
        let mut comet = Comet::new(4, PURPLE, options(2, true), "comet").unwrap();
        let mut strip = PixelStrip::new(4);

        for _ in 0..7 {
            comet.draw(&mut strip).unwrap();
        }
        assert!(comet.geometry().reverse());
        assert!(!comet.cycle_complete());

        for _ in 0..7 {
            comet.draw(&mut strip).unwrap();
        }
        assert!(comet.cycle_complete());

        comet.reset();
        assert!(!comet.cycle_complete());
        assert!(!comet.geometry().reverse());
    }

    #[test]
    fn animate_respects_the_speed() {
        let mut comet = Comet::new(4, PURPLE, options(2, false), "comet").unwrap();
        let mut strip = PixelStrip::new(4);
        let start = Instant::now();

        assert!(comet.animate(&mut strip, start).unwrap());
        assert!(!comet
            .animate(&mut strip, start + Duration::from_millis(10))
            .unwrap());
        assert!(comet
            .animate(&mut strip, start + Duration::from_millis(150))
            .unwrap());
        assert_eq!(comet.draw_count(), 2);
    }
}
