// Core value types shared by the simulation and the renderer.

use crate::config::REFERENCE_HEIGHT;

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// Black frame of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// Exact 8-bit pixel colour, as stored in the decoded images.
/// Region membership is decided by equality on all three channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as 0x00RRGGBB (minifb layout).
    #[inline]
    pub fn pack(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub fn unpack(px: u32) -> Self {
        Self::new(((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8)
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(p: image::Rgb<u8>) -> Self {
        Rgb::new(p[0], p[1], p[2])
    }
}

/// Continuous colour a particle eases through.
/// Kept as floats so the 10% easing never stalls on integer rounding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Colour {
    /// Linear interpolation per channel; `t = 0` keeps `self`, `t = 1` lands on `to`.
    #[inline]
    pub fn lerp(self, to: Colour, t: f32) -> Colour {
        Colour {
            r: self.r + (to.r - self.r) * t,
            g: self.g + (to.g - self.g) * t,
            b: self.b + (to.b - self.b) * t,
        }
    }

    /// Nearest 8-bit colour, clamped.
    pub fn to_rgb(self) -> Rgb {
        let q = |c: f32| c.round().clamp(0.0, 255.0) as u8;
        Rgb::new(q(self.r), q(self.g), q(self.b))
    }
}

impl From<Rgb> for Colour {
    fn from(c: Rgb) -> Self {
        Colour { r: c.r as f32, g: c.g as f32, b: c.b as f32 }
    }
}

/// Current drawing surface size. Everything that depends on window size
/// (locator bounds, edge checks, draw scale) reads it from here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Current height relative to the height the artwork was authored at.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.height as f32 / REFERENCE_HEIGHT
    }

    /// True if (x, y) lies inside the canvas grown by `margin` on every side.
    #[inline]
    pub fn contains_with_margin(&self, x: f32, y: f32, margin: f32) -> bool {
        x >= -margin
            && x <= self.width as f32 + margin
            && y >= -margin
            && y <= self.height as f32 + margin
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
