// The four painted regions: their map colours, per-field tuning and spawn lookup.

use rand::Rng;

use crate::assets::Raster;
use crate::config::MAX_DENSITY;
use crate::locator::{Located, LocatorStrategy, RegionLocator};
use crate::types::{Canvas, Rgb};

/// Drawing order is the order of `ALL`: sky first, boardwalk on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Sky,
    Water,
    Foliage,
    Boardwalk,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Sky, Region::Water, Region::Foliage, Region::Boardwalk];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Solid colour marking this region in its map (matched exactly).
    pub fn colour(self) -> Rgb {
        match self {
            Region::Sky => Rgb::new(255, 116, 2),
            Region::Water => Rgb::new(2, 2, 255),
            Region::Foliage => Rgb::new(30, 255, 0),
            Region::Boardwalk => Rgb::new(153, 43, 0),
        }
    }

    pub fn map_file(self) -> &'static str {
        match self {
            Region::Sky => "skyColourMap.png",
            Region::Water => "waterColourMap.png",
            Region::Foliage => "greenColourMap.png",
            Region::Boardwalk => "boardwalkColourMap.png",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Region::Sky => "sky",
            Region::Water => "water",
            Region::Foliage => "foliage",
            Region::Boardwalk => "boardwalk",
        }
    }
}

/// How one field looks and moves. Velocity is shared by all its particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    pub count: usize,
    pub velocity: (f32, f32),
    pub base_size: f32,
}

impl FieldParams {
    pub fn for_region(region: Region) -> Self {
        let (count, vx, vy, base_size) = match region {
            Region::Sky => (4000, 0.3, 0.0, 16.0),
            Region::Water => (3000, 0.3, -0.15, 14.0),
            Region::Foliage => (2000, 0.15, -0.25, 12.0),
            Region::Boardwalk => (7000, -0.3, -0.3, 10.0),
        };
        Self { count, velocity: (vx, vy), base_size }
    }

    /// Same field with `density` times the particles (at least one).
    /// Density is clamped to `0..=MAX_DENSITY`; NaN counts as zero.
    pub fn with_density(self, density: f32) -> Self {
        let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, MAX_DENSITY) };
        let count = (self.count as f32 * density).round() as usize;
        Self { count: count.max(1), ..self }
    }
}

/// Per-field tuning in `Region::ALL` order.
pub type Tuning = [FieldParams; 4];

pub fn default_tuning(density: f32) -> Tuning {
    Region::ALL.map(|r| FieldParams::for_region(r).with_density(density))
}

/// A canvas-sized region map plus its spawn-point locator.
pub struct RegionMap {
    region: Region,
    raster: Raster,
    locator: RegionLocator,
}

impl RegionMap {
    pub fn new(region: Region, raster: Raster, strategy: LocatorStrategy) -> Self {
        let locator = RegionLocator::new(region.colour(), strategy, &raster);
        let map = Self { region, raster, locator };
        map.warn_if_empty();
        map
    }

    /// Swap in a rescaled raster; the locator index follows it.
    pub fn rescale(&mut self, raster: Raster) {
        self.raster = raster;
        self.locator.rebuild(&self.raster);
        self.warn_if_empty();
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn locate<R: Rng + ?Sized>(&self, canvas: Canvas, rng: &mut R) -> Located {
        self.locator.locate(self.raster(), canvas, rng)
    }

    fn warn_if_empty(&self) {
        if self.locator.strategy() == LocatorStrategy::Precomputed && self.locator.indexed() == 0 {
            log::warn!(
                "{} map has no pixels of its region colour; spawns will fall back to random misses",
                self.region.name()
            );
        }
    }
}
