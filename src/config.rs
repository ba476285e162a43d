// Command-line flags and the fixed constants of the animation.

use std::path::PathBuf;

use clap::Parser;

use crate::locator::LocatorStrategy;

/// Height (px) the silhouette and particle sizes were authored at.
pub const REFERENCE_HEIGHT: f32 = 812.0;
/// How far a particle may drift past the canvas edge before it is recycled.
pub const EDGE_BUFFER: f32 = 16.0;
/// Target colour is re-read from the painting every this many frames.
pub const RESAMPLE_INTERVAL: u64 = 5;
/// Fraction of the remaining colour distance covered per frame.
pub const COLOUR_EASE: f32 = 0.1;
/// Opacity gained per active frame while fading in.
pub const FADE_IN_STEP: f32 = 12.5;
pub const MAX_OPACITY: f32 = 255.0;
/// Activation delay, in frames, drawn uniformly from this range.
pub const DELAY_FRAMES: std::ops::Range<u64> = 30..300;
/// Per-particle fade-out speed range (opacity per frame).
pub const DECAY_RATE: std::ops::Range<f32> = 0.5..1.5;
/// Random extra added to each field's base size.
pub const SIZE_JITTER: std::ops::Range<f32> = 0.0..5.0;
/// Region locator gives up after this many random draws.
pub const LOCATOR_MAX_ATTEMPTS: u32 = 1000;
/// Upper bound for `--density`; 10x is already ~160k particles.
pub const MAX_DENSITY: f32 = 10.0;

pub const WINDOW_TITLE: &str = "The Scream — particles";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Reveal The Scream through drifting particles")]
pub struct Args {
    /// Folder holding scream.jpg and the four *ColourMap.png region maps
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Initial viewport height in pixels; width follows the painting's aspect ratio
    #[arg(long, default_value_t = 812)]
    pub height: u32,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    pub fps: usize,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// How spawn positions are found inside each region
    #[arg(long, value_enum, default_value_t = LocatorStrategy::Precomputed)]
    pub locator: LocatorStrategy,

    /// Multiplier on every field's particle count (lower it on slow machines)
    #[arg(long, default_value_t = 1.0, value_parser = parse_density)]
    pub density: f32,
}

fn parse_density(s: &str) -> Result<f32, String> {
    let density: f32 = s.parse().map_err(|e| format!("{s:?} is not a number: {e}"))?;
    if !density.is_finite() || !(0.0..=MAX_DENSITY).contains(&density) {
        return Err(format!("density must be between 0 and {MAX_DENSITY}"));
    }
    Ok(density)
}
