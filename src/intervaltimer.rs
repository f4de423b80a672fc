use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Gates work to a fixed interval, either by polling `is_due` or by sleeping.
pub struct IntervalTimer {
    interval: Duration,
    next_tick: Option<Instant>,
    ticks: u64,
    name: String,
    measure_fps: bool,
    last_fps_print: Instant,
    frames: u32,
}

impl IntervalTimer {
    pub fn new(interval: Duration, name: &str, measure_fps: bool) -> IntervalTimer {
        IntervalTimer {
            interval,
            next_tick: None,
            ticks: 0,
            name: name.to_string(),
            measure_fps,
            last_fps_print: Instant::now(),
            frames: 0,
        }
    }

    /// Timer for an animation updating every `seconds`.
    pub fn from_speed(seconds: f32, name: &str) -> Result<IntervalTimer> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(Error::configuration(format!(
                "{name}: speed must be a non-negative number of seconds, got {seconds}"
            )));
        }

        Ok(IntervalTimer::new(
            Duration::from_secs_f32(seconds),
            name,
            log::log_enabled!(log::Level::Debug),
        ))
    }

    pub fn from_freq(freq_hz: f32, name: &str, measure_fps: bool) -> IntervalTimer {
        let frame_duration_microsec = 1000.0 / freq_hz * 1000.0;
        IntervalTimer::new(
            Duration::from_micros(frame_duration_microsec as u64),
            name,
            measure_fps,
        )
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.next_tick {
            Some(next_tick) => now >= next_tick,
            None => true,
        }
    }

    /// Records a tick at `now` and schedules the next one an interval later.
    pub fn mark(&mut self, now: Instant) {
        self.ticks += 1;
        self.next_tick = Some(now + self.interval);

        if self.measure_fps {
            self.update_fps(now);
        }
    }

    /// Makes the next poll due right away.
    pub fn reset(&mut self) {
        self.next_tick = None;
    }

    pub fn sleep_until_next_tick(&mut self) {
        let now = Instant::now();
        let next_tick = match self.next_tick {
            Some(next_tick) if next_tick > now => next_tick,
            Some(_) => {
                log::debug!("{} skipped a frame", self.name);
                now + self.interval
            }
            None => now + self.interval,
        };

        thread::sleep(next_tick - now);
        self.mark(next_tick);
    }

    fn update_fps(&mut self, now: Instant) {
        self.frames += 1;

        if now.saturating_duration_since(self.last_fps_print) > Duration::from_secs(1) {
            log::debug!("{} FPS: {}", self.name, self.frames);
            self.frames = 0;
            self.last_fps_print = now;
        }
    }
}
