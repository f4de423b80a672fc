use std::sync::Mutex;

use crate::effects::volume::LevelSource;

pub struct PlaybackState {
    pub buffer: Vec<f32>,
    pub rms_level: f32,
    pub shutdown: bool,
}

impl PlaybackState {
    pub fn new(window_size: usize) -> PlaybackState {
        PlaybackState {
            buffer: vec![0.0; window_size],
            rms_level: 0.0,
            shutdown: false,
        }
    }
}

/// Root mean square of a sample window, zero when the window is empty.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_of_squares: f64 = samples.iter().map(|&s| s as f64 * s as f64).sum();
    (sum_of_squares / samples.len() as f64).sqrt() as f32
}

impl LevelSource for Mutex<PlaybackState> {
    fn rms_level(&self) -> f32 {
        match self.lock() {
            Ok(state) => state.rms_level,
            Err(_) => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn rms_of_a_constant_window_is_its_magnitude() {
        assert_eq!(rms(&[3.0; 16]), 3.0);
        assert_eq!(rms(&[-3.0, 3.0, -3.0, 3.0]), 3.0);
    }

    #[test]
    fn rms_of_nothing_is_silence() {
        assert_eq!(rms(&[]), 0.0);
    }

    #[test]
    fn rms_mixes_samples() {
        assert_eq!(rms(&[3.0, 4.0, 0.0, 0.0]), 2.5);
    }

    #[test]
    fn shared_state_is_a_level_source() {
        let state = Arc::new(Mutex::new(PlaybackState::new(8)));
        let source: Arc<dyn LevelSource + Send + Sync> = state.clone();
        assert_eq!(source.rms_level(), 0.0);

        state.lock().unwrap().rms_level = 123.0;
        assert_eq!(source.rms_level(), 123.0);
    }
}
