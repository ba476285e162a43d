// A field is every particle living in one region of the painting.
// Visual expectation: each frame its dots drift a little, ease toward the colour
// underneath them, fade in, fade out and reappear somewhere else in the region.

use rand::Rng;

use crate::assets::{Assets, Raster};
use crate::config::{COLOUR_EASE, DECAY_RATE, DELAY_FRAMES, EDGE_BUFFER, RESAMPLE_INTERVAL, SIZE_JITTER};
use crate::locator::Located;
use crate::particle::Particle;
use crate::region::{FieldParams, Region, RegionMap};
use crate::render::Renderer;
use crate::scene::SimContext;
use crate::types::{Colour, Rgb};

pub struct ParticleField {
    region: Region,
    velocity: (f32, f32),
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Spawn `params.count` particles at random spots of `region`.
    pub fn new(region: Region, params: FieldParams, assets: &Assets, ctx: &mut SimContext) -> Self {
        let map = assets.region_map(region);
        let mut particles = Vec::with_capacity(params.count);
        for _ in 0..params.count {
            let spot = spawn_spot(map, ctx);
            let colour = colour_at(assets.reference(), spot);
            let size = params.base_size + ctx.rng.gen_range(SIZE_JITTER);
            let decay = ctx.rng.gen_range(DECAY_RATE);
            let delay = next_delay(ctx);
            particles.push(Particle::new(spot.x as f32, spot.y as f32, size, delay, decay, colour));
        }
        Self { region, velocity: params.velocity, particles }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance every particle by one frame and draw the active ones.
    pub fn update_and_draw<R: Renderer + ?Sized>(
        &mut self,
        ctx: &mut SimContext,
        assets: &Assets,
        out: &mut R,
    ) {
        let map = assets.region_map(self.region);
        let reference = assets.reference();
        let scale = ctx.canvas.scale();
        let resample = ctx.frame % RESAMPLE_INTERVAL == 0;

        for p in &mut self.particles {
            if p.is_active(ctx.frame) {
                p.x += self.velocity.0;
                p.y += self.velocity.1;

                // Off-canvas samples keep the previous target.
                if resample {
                    if let Some(c) = reference.sample(p.x as i64, p.y as i64) {
                        p.target = c.into();
                    }
                }
                p.current = p.current.lerp(p.target, COLOUR_EASE);

                if p.advance_fade() {
                    // Faded out: new spot, new delay, colour taken from the new spot.
                    let spot = spawn_spot(map, ctx);
                    let delay = next_delay(ctx);
                    p.relocate(spot.x as f32, spot.y as f32, delay);
                    p.recolour(colour_at(reference, spot));
                }

                out.fill_circle(p.x, p.y, p.size * scale, p.current, p.opacity);
            }

            // Runs for inactive particles too. Colour is not reset on this path.
            if !ctx.canvas.contains_with_margin(p.x, p.y, EDGE_BUFFER) {
                let spot = spawn_spot(map, ctx);
                let delay = next_delay(ctx);
                p.relocate(spot.x as f32, spot.y as f32, delay);
            }
        }
    }
}

fn spawn_spot(map: &RegionMap, ctx: &mut SimContext) -> Located {
    let spot = map.locate(ctx.canvas, &mut ctx.rng);
    if !spot.matched {
        ctx.locator_misses += 1;
    }
    spot
}

fn next_delay(ctx: &mut SimContext) -> u64 {
    ctx.frame + ctx.rng.gen_range(DELAY_FRAMES)
}

fn colour_at(reference: &Raster, spot: Located) -> Colour {
    reference.sample(spot.x as i64, spot.y as i64).unwrap_or(Rgb::BLACK).into()
}
