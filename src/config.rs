use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use config_file::FromConfigFile;
use serde::Deserialize;

use crate::animation::Animation;
use crate::color::{self, ColorSpec};
use crate::colorwheel::WheelKind;
use crate::effects::comet::{Comet, CometOptions};
use crate::effects::volume::{LevelSource, Volume};
use crate::error::{Error, Result};
use crate::sequence::SequenceOptions;

/// Settings read from the config file. CLI flags override these, these override the defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pixel_count: usize,
    /// Seconds before the sequence moves on, 0 to stay on the first animation.
    pub advance_interval: f32,
    pub auto_clear: bool,
    /// Move on once the current animation completes a cycle, regardless of the interval.
    pub advance_on_cycle_complete: bool,
    /// Wheel positions added to rainbow effects after each of their frames.
    pub hue_step: i32,
    pub colorwheel: WheelKind,
    pub signal_amplitude: f32,
    pub signal_bpm: f32,
    pub animations: Vec<AnimationConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AnimationConfig {
    Comet {
        name: Option<String>,
        #[serde(default = "default_speed")]
        speed: f32,
        color: ColorSpec,
        tail_length: Option<usize>,
        #[serde(default)]
        reverse: bool,
        #[serde(default)]
        bounce: bool,
    },
    RainbowComet {
        name: Option<String>,
        #[serde(default = "default_speed")]
        speed: f32,
        tail_length: Option<usize>,
        #[serde(default)]
        reverse: bool,
        #[serde(default)]
        bounce: bool,
        #[serde(default)]
        colorwheel_offset: i32,
    },
    Volume {
        name: Option<String>,
        #[serde(default = "default_speed")]
        speed: f32,
        brightest_color: ColorSpec,
        #[serde(default = "default_max_volume")]
        max_volume: f32,
    },
}

fn default_speed() -> f32 {
    0.1
}

fn default_max_volume() -> f32 {
    500.0
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pixel_count: 32,
            advance_interval: 5.0,
            auto_clear: true,
            advance_on_cycle_complete: false,
            hue_step: 0,
            colorwheel: WheelKind::Classic,
            signal_amplitude: 800.0,
            signal_bpm: 120.0,
            animations: vec![
                AnimationConfig::Comet {
                    name: Some("purple comet".to_string()),
                    speed: 0.1,
                    color: color::PURPLE.into(),
                    tail_length: Some(3),
                    reverse: false,
                    bounce: true,
                },
                AnimationConfig::RainbowComet {
                    name: Some("rainbow comet".to_string()),
                    speed: 0.1,
                    tail_length: Some(7),
                    reverse: false,
                    bounce: true,
                    colorwheel_offset: 0,
                },
                AnimationConfig::Comet {
                    name: Some("amber comet".to_string()),
                    speed: 0.1,
                    color: color::AMBER.into(),
                    tail_length: Some(6),
                    reverse: true,
                    bounce: true,
                },
                AnimationConfig::Volume {
                    name: Some("volume".to_string()),
                    speed: 0.05,
                    brightest_color: color::JADE.into(),
                    max_volume: 500.0,
                },
            ],
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let Some(path) = path else {
            return Ok(Config::default());
        };

        match Config::from_config_file(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                Ok(config)
            }
            Err(err) => Err(Error::config_file(format!("{}: {}", path.display(), err))),
        }
    }

    pub fn sequence_options(&self) -> Result<SequenceOptions> {
        if !self.advance_interval.is_finite() || self.advance_interval < 0.0 {
            return Err(Error::configuration(format!(
                "advance interval must be a non-negative number of seconds, got {}",
                self.advance_interval
            )));
        }

        let advance_interval = if self.advance_interval > 0.0 {
            Some(Duration::from_secs_f32(self.advance_interval))
        } else {
            None
        };
        Ok(SequenceOptions {
            advance_interval,
            auto_clear: self.auto_clear,
            hue_step: self.hue_step,
            advance_on_cycle_complete: self.advance_on_cycle_complete,
        })
    }

    pub fn build_animations(
        &self,
        source: Arc<dyn LevelSource + Send + Sync>,
    ) -> Result<Vec<Box<dyn Animation>>> {
        self.animations
            .iter()
            .enumerate()
            .map(|(index, animation)| animation.build(index, self, Arc::clone(&source)))
            .collect()
    }
}

impl AnimationConfig {
    fn kind(&self) -> &'static str {
        match self {
            AnimationConfig::Comet { .. } => "comet",
            AnimationConfig::RainbowComet { .. } => "rainbow-comet",
            AnimationConfig::Volume { .. } => "volume",
        }
    }

    pub fn build(
        &self,
        index: usize,
        config: &Config,
        source: Arc<dyn LevelSource + Send + Sync>,
    ) -> Result<Box<dyn Animation>> {
        let fallback_name = format!("{} #{}", self.kind(), index);
        let animation: Box<dyn Animation> = match self {
            AnimationConfig::Comet {
                name,
                speed,
                color,
                tail_length,
                reverse,
                bounce,
            } => Box::new(Comet::new(
                config.pixel_count,
                color.to_color()?,
                CometOptions {
                    speed: *speed,
                    tail_length: *tail_length,
                    reverse: *reverse,
                    bounce: *bounce,
                },
                name.as_deref().unwrap_or(&fallback_name),
            )?),
            AnimationConfig::RainbowComet {
                name,
                speed,
                tail_length,
                reverse,
                bounce,
                colorwheel_offset,
            } => Box::new(Comet::rainbow(
                config.pixel_count,
                config.colorwheel.build(),
                *colorwheel_offset,
                CometOptions {
                    speed: *speed,
                    tail_length: *tail_length,
                    reverse: *reverse,
                    bounce: *bounce,
                },
                name.as_deref().unwrap_or(&fallback_name),
            )?),
            AnimationConfig::Volume {
                name,
                speed,
                brightest_color,
                max_volume,
            } => Box::new(Volume::new(
                config.pixel_count,
                *speed,
                brightest_color.to_color()?,
                source,
                *max_volume,
                name.as_deref().unwrap_or(&fallback_name),
            )?),
        };
        Ok(animation)
    }
}
