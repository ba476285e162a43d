// Frame driver: owns the clock, the assets and the four particle fields.
// Visual expectation: one `tick` = one finished frame (black, particles, screamer on top).

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::assets::Assets;
use crate::field::ParticleField;
use crate::region::{Region, Tuning};
use crate::render::Renderer;
use crate::silhouette;
use crate::types::{Canvas, Rgb};

/// Everything a tick may mutate besides the particles themselves.
/// Passed explicitly so tests can drive time and randomness.
pub struct SimContext {
    pub frame: u64,          // incremented once per tick, never reset
    pub rng: StdRng,
    pub canvas: Canvas,
    pub locator_misses: u64, // spawns that fell back to a non-matching pixel
}

impl SimContext {
    pub fn new(canvas: Canvas, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { frame: 0, rng, canvas, locator_misses: 0 }
    }
}

pub struct Scene {
    ctx: SimContext,
    assets: Assets,
    fields: Vec<ParticleField>, // Region::ALL order = draw order
}

impl Scene {
    /// Fit the assets to `viewport_height` and spawn every field.
    pub fn new(mut assets: Assets, viewport_height: u32, seed: Option<u64>, tuning: &Tuning) -> Self {
        let canvas = assets.fit(viewport_height);
        let mut ctx = SimContext::new(canvas, seed);
        let fields: Vec<ParticleField> = Region::ALL
            .iter()
            .map(|&region| ParticleField::new(region, tuning[region.index()], &assets, &mut ctx))
            .collect();
        let total: usize = fields.iter().map(|f| f.particles().len()).sum();
        info!("scene ready: {}x{} canvas, {} particles", canvas.width, canvas.height, total);
        Self { ctx, assets, fields }
    }

    /// Render one frame into `out`.
    pub fn tick<R: Renderer + ?Sized>(&mut self, out: &mut R) {
        out.clear(Rgb::BLACK);
        self.ctx.frame += 1;
        for field in &mut self.fields {
            field.update_and_draw(&mut self.ctx, &self.assets, out);
        }
        silhouette::draw(out, self.ctx.canvas);
    }

    /// Refit to a new viewport height. Must run between ticks; every buffer
    /// (and every locator index) is rebuilt before this returns.
    pub fn resize(&mut self, viewport_height: u32) -> Canvas {
        let canvas = self.assets.fit(viewport_height);
        self.ctx.canvas = canvas;
        canvas
    }

    pub fn canvas(&self) -> Canvas {
        self.ctx.canvas
    }

    pub fn frame(&self) -> u64 {
        self.ctx.frame
    }

    pub fn locator_misses(&self) -> u64 {
        self.ctx.locator_misses
    }

    pub fn fields(&self) -> &[ParticleField] {
        &self.fields
    }
}
