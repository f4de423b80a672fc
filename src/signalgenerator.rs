use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::intervaltimer::IntervalTimer;
use crate::playbackstate::{rms, PlaybackState};

/// Stands in for an audio decoder: publishes the RMS level of a noisy, beating test signal.
pub struct SignalGenerator {
    playback_state: Arc<Mutex<PlaybackState>>,
    timer: IntervalTimer,
    rng: StdRng,
    amplitude: f32,
    bpm: f32,
    started: Instant,
}

impl SignalGenerator {
    pub fn new(
        playback_state: Arc<Mutex<PlaybackState>>,
        amplitude: f32,
        bpm: f32,
    ) -> SignalGenerator {
        let update_freq_hz = 60.0;

        SignalGenerator {
            playback_state,
            timer: IntervalTimer::from_freq(update_freq_hz, "SignalGenerator", true),
            rng: StdRng::from_entropy(),
            amplitude,
            bpm,
            started: Instant::now(),
        }
    }

    pub fn run(&mut self) {
        loop {
            if self.playback_state.lock().unwrap().shutdown {
                log::info!("Signal generator stopping");
                break;
            }

            self.update(self.started.elapsed());
            self.timer.sleep_until_next_tick();
        }
    }

    /// Loudness between 0.15 and 1, peaking on every beat and decaying until the next.
    fn envelope(&self, elapsed: Duration) -> f32 {
        let beats = elapsed.as_secs_f32() * self.bpm / 60.0;
        let decay = 1.0 - beats.fract();
        0.15 + 0.85 * decay * decay
    }

    fn update(&mut self, elapsed: Duration) {
        let gain = self.envelope(elapsed) * self.amplitude;

        let mut playback_state = self.playback_state.lock().unwrap();
        for sample in playback_state.buffer.iter_mut() {
            *sample = self.rng.gen_range(-1.0..=1.0) * gain;
        }
        let level = rms(&playback_state.buffer);
        playback_state.rms_level = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(amplitude: f32) -> (SignalGenerator, Arc<Mutex<PlaybackState>>) {
        let state = Arc::new(Mutex::new(PlaybackState::new(512)));
        let mut generator = SignalGenerator::new(Arc::clone(&state), amplitude, 120.0);
        generator.rng = StdRng::seed_from_u64(7);
        (generator, state)
    }

    #[test]
    fn envelope_peaks_on_the_beat() {
        let (generator, _) = generator(1000.0);
        assert_eq!(generator.envelope(Duration::ZERO), 1.0);
        assert_eq!(generator.envelope(Duration::from_millis(500)), 1.0);
        let between = generator.envelope(Duration::from_millis(250));
        assert!(between > 0.15 && between < 1.0);
    }

    #[test]
    fn updates_publish_a_bounded_level() {
        let (mut generator, state) = generator(1000.0);
        generator.update(Duration::ZERO);

        let state = state.lock().unwrap();
        assert!(state.buffer.iter().all(|s| s.abs() <= 1000.0));
        // Uniform noise has an RMS of amplitude / sqrt(3).
        assert!(state.rms_level > 450.0 && state.rms_level < 700.0);
    }

    #[test]
    fn silence_stays_silent() {
        let (mut generator, state) = generator(0.0);
        generator.update(Duration::from_millis(100));
        assert_eq!(state.lock().unwrap().rms_level, 0.0);
    }

    #[test]
    fn run_stops_on_shutdown() {
        let (mut generator, state) = generator(1.0);
        state.lock().unwrap().shutdown = true;
        generator.run();
    }
}
