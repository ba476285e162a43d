// Drawing capability used by the simulation, and its software implementation.
// Visual effects provided here:
// 1) Clearing the frame to a solid colour.
// 2) Borderless, semi-transparent filled circles (the particles).
// 3) Solid filled outlines (the silhouette).

use crate::types::{Colour, FrameBuffer, Rgb};

/// What the simulation needs from a drawing surface. Nothing else.
pub trait Renderer {
    fn clear(&mut self, colour: Rgb);

    /// Borderless disc centred at (cx, cy); `alpha` in 0..=255.
    fn fill_circle(&mut self, cx: f32, cy: f32, diameter: f32, colour: Colour, alpha: f32);

    /// Opaque polygon through `points`, implicitly closed, even-odd fill.
    fn fill_path(&mut self, points: &[(f32, f32)], colour: Rgb);
}

/* ---------- Software rasteriser on the minifb framebuffer ---------- */

/// Alpha blend a single channel.
/// Uses the (x + 1 + (x >> 8)) >> 8 approximation instead of x / 255.
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let v = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((v + 1 + (v >> 8)) >> 8) as u8
}

/// Source-over blend onto the pixel at (x, y); silently clipped.
/// Visual: the pixel takes on `alpha/255` of the new colour.
#[inline]
fn blend_pixel(fb: &mut FrameBuffer, x: i32, y: i32, colour: Rgb, alpha: u16) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    if alpha >= 255 {
        fb.pixels[idx] = colour.pack();
        return;
    }
    let old = Rgb::unpack(fb.pixels[idx]);
    fb.pixels[idx] = Rgb::new(
        blend_channel(colour.r, old.r, alpha),
        blend_channel(colour.g, old.g, alpha),
        blend_channel(colour.b, old.b, alpha),
    )
    .pack();
}

impl Renderer for FrameBuffer {
    fn clear(&mut self, colour: Rgb) {
        self.pixels.fill(colour.pack());
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, diameter: f32, colour: Colour, alpha: f32) {
        let alpha = alpha.round().clamp(0.0, 255.0) as u16;
        if alpha == 0 || diameter <= 0.0 {
            return;
        }
        let r = diameter * 0.5;
        let r2 = r * r;
        let rgb = colour.to_rgb();

        // Scan the bounding box; a pixel is covered when its centre is inside.
        let x0 = (cx - r).floor() as i32;
        let x1 = (cx + r).ceil() as i32;
        let y0 = (cy - r).floor() as i32;
        let y1 = (cy + r).ceil() as i32;
        for y in y0..=y1 {
            let dy = y as f32 + 0.5 - cy;
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    blend_pixel(self, x, y, rgb, alpha);
                }
            }
        }
    }

    fn fill_path(&mut self, points: &[(f32, f32)], colour: Rgb) {
        if points.len() < 3 || self.height == 0 {
            return;
        }
        let (min_y, max_y) = points
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
        let y_start = (min_y.floor() as i32).max(0);
        let y_end = (max_y.ceil() as i32).min(self.height as i32 - 1);

        // Even-odd scanline fill sampled at pixel centres.
        let mut crossings: Vec<f32> = Vec::with_capacity(16);
        for y in y_start..=y_end {
            let sy = y as f32 + 0.5;
            crossings.clear();
            for i in 0..points.len() {
                let (ax, ay) = points[i];
                let (bx, by) = points[(i + 1) % points.len()];
                // Half-open rule so shared vertices are counted once.
                if (ay <= sy) != (by <= sy) {
                    crossings.push(ax + (sy - ay) / (by - ay) * (bx - ax));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                let xa = (pair[0] - 0.5).ceil() as i32;
                let xb = (pair[1] - 0.5).floor() as i32;
                for x in xa..=xb {
                    blend_pixel(self, x, y, colour, 255);
                }
            }
        }
    }
}

/* ---------- Test double ---------- */

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Op {
        Clear(Rgb),
        Circle { cx: f32, cy: f32, diameter: f32, colour: Colour, alpha: f32 },
        Path { points: usize, colour: Rgb },
    }

    /// Remembers every call instead of drawing.
    #[derive(Default)]
    pub struct Recorder {
        pub ops: Vec<Op>,
    }

    impl Renderer for Recorder {
        fn clear(&mut self, colour: Rgb) {
            self.ops.push(Op::Clear(colour));
        }

        fn fill_circle(&mut self, cx: f32, cy: f32, diameter: f32, colour: Colour, alpha: f32) {
            self.ops.push(Op::Circle { cx, cy, diameter, colour, alpha });
        }

        fn fill_path(&mut self, points: &[(f32, f32)], colour: Rgb) {
            self.ops.push(Op::Path { points: points.len(), colour });
        }
    }
}
