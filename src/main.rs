pub(crate) mod animation;
pub(crate) mod color;
pub(crate) mod colorwheel;
pub(crate) mod config;
pub(crate) mod effects;
pub(crate) mod error;
pub(crate) mod intervaltimer;
pub(crate) mod mapping;
pub(crate) mod pixelbuffer;
pub(crate) mod playbackstate;
pub(crate) mod sequence;
pub(crate) mod signalgenerator;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use config::Config;
use pixelbuffer::PixelStrip;
use playbackstate::PlaybackState;
use sequence::Sequence;
use signalgenerator::SignalGenerator;

use crate::error::{Error, Result};
use crate::pixelbuffer::PixelBuffer;

#[derive(Parser)]
struct Cli {
    /// Config file describing the strip and the animations to play
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of pixels on the strip
    #[arg(short, long, value_name = "COUNT")]
    pixels: Option<usize>,

    /// Seconds before moving on to the next animation, 0 to stay put
    #[arg(short, long, value_name = "SECONDS")]
    advance_interval: Option<f32>,

    /// Move on as soon as an animation completes a cycle
    #[arg(long)]
    advance_on_cycle_complete: bool,

    /// Wheel positions rainbow effects shift by after each frame
    #[arg(long, value_name = "STEP")]
    hue_step: Option<i32>,

    /// Stop after this many frames
    #[arg(short, long, value_name = "COUNT")]
    frames: Option<u64>,

    /// Do not paint the strip into the terminal
    #[arg(long)]
    no_preview: bool,
}

fn load_config(args: &Cli) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(pixels) = args.pixels {
        config.pixel_count = pixels;
    }
    if let Some(advance_interval) = args.advance_interval {
        config.advance_interval = advance_interval;
    }
    if args.advance_on_cycle_complete {
        config.advance_on_cycle_complete = true;
    }
    if let Some(hue_step) = args.hue_step {
        config.hue_step = hue_step;
    }
    Ok(config)
}

fn run(args: Cli) -> Result<()> {
    let config = load_config(&args)?;

    let window_size = 1024;
    let playback_state = Arc::new(Mutex::new(PlaybackState::new(window_size)));

    let mut strip = if args.no_preview {
        PixelStrip::new(config.pixel_count)
    } else {
        PixelStrip::with_preview(config.pixel_count)
    };
    if strip.is_empty() {
        return Err(Error::configuration("the strip needs at least one pixel"));
    }

    let animations = config.build_animations(playback_state.clone())?;
    let mut sequence = Sequence::new(animations, config.sequence_options()?)?;

    let shutdown_state = Arc::clone(&playback_state);
    if let Err(err) = ctrlc::set_handler(move || {
        shutdown_state.lock().unwrap().shutdown = true;
    }) {
        log::warn!("Cannot install Ctrl-C handler: {err}");
    }

    let mut generator = SignalGenerator::new(
        Arc::clone(&playback_state),
        config.signal_amplitude,
        config.signal_bpm,
    );
    let generator_thread = thread::Builder::new()
        .name("SignalGenerator".to_string())
        .spawn(move || {
            generator.run();
        })?;

    log::info!(
        "Playing {} animations on {} pixels",
        sequence.len(),
        config.pixel_count
    );

    let mut frames = 0;
    let result = loop {
        if playback_state.lock().unwrap().shutdown {
            break Ok(());
        }

        match sequence.animate(&mut strip, Instant::now()) {
            Ok(true) => frames += 1,
            Ok(false) => {}
            Err(err) => break Err(err),
        }

        if args.frames.is_some_and(|max_frames| frames >= max_frames) {
            break Ok(());
        }
        thread::sleep(Duration::from_millis(1));
    };

    playback_state.lock().unwrap().shutdown = true;
    if generator_thread.join().is_err() {
        log::warn!("Signal generator thread panicked");
    }
    if !args.no_preview {
        println!();
    }
    log::info!(
        "Stopped after {} frames ({} shown), {} of them from {}",
        frames,
        strip.frames_shown(),
        sequence.current().draw_count(),
        sequence.current().name()
    );
    result
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
