// One drifting, fading dot that borrows its colour from the painting underneath.

use crate::config::{FADE_IN_STEP, MAX_OPACITY};
use crate::types::Colour;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    FadingIn,
    FadingOut,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32, pub y: f32,    // canvas position in pixels
    pub size: f32,             // unscaled diameter (base + jitter)
    pub opacity: f32,          // 0..=255
    pub phase: Phase,
    pub delay: u64,            // inert until the frame counter reaches this
    pub decay_rate: f32,       // opacity lost per frame while fading out
    pub current: Colour,       // what gets drawn
    pub target: Colour,        // what `current` eases toward
}

impl Particle {
    pub fn new(x: f32, y: f32, size: f32, delay: u64, decay_rate: f32, colour: Colour) -> Self {
        Self {
            x, y, size,
            opacity: 0.0,
            phase: Phase::FadingIn,
            delay,
            decay_rate,
            current: colour,
            target: colour,
        }
    }

    #[inline]
    pub fn is_active(&self, frame: u64) -> bool {
        frame >= self.delay
    }

    /// One step of the fade cycle. Returns true once a fade-out has
    /// exhausted the opacity, i.e. the particle should respawn.
    pub fn advance_fade(&mut self) -> bool {
        match self.phase {
            Phase::FadingIn => {
                self.opacity += FADE_IN_STEP;
                if self.opacity >= MAX_OPACITY {
                    self.opacity = MAX_OPACITY;
                    self.phase = Phase::FadingOut;
                }
                false
            }
            Phase::FadingOut => {
                self.opacity -= self.decay_rate;
                if self.opacity <= 0.0 {
                    self.opacity = 0.0;
                    return true;
                }
                false
            }
        }
    }

    /// Move to a fresh spot and start a new fade-in after `delay`.
    /// Colour is left alone; callers that want it reset use `recolour`.
    pub fn relocate(&mut self, x: f32, y: f32, delay: u64) {
        self.x = x;
        self.y = y;
        self.opacity = 0.0;
        self.phase = Phase::FadingIn;
        self.delay = delay;
    }

    pub fn recolour(&mut self, colour: Colour) {
        self.current = colour;
        self.target = colour;
    }
}
