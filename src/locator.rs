// Finds spawn points: random pixels whose region-map colour equals the region's colour.

use clap::ValueEnum;
use log::warn;
use rand::Rng;

use crate::assets::Raster;
use crate::config::LOCATOR_MAX_ATTEMPTS;
use crate::types::{Canvas, Rgb};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LocatorStrategy {
    /// Draw random canvas pixels until one matches (bounded retries).
    Rejection,
    /// Index every matching pixel once per resize, then pick from the list.
    Precomputed,
}

/// Where a search ended up. `matched == false` means the budget ran out and
/// (x, y) is just the last coordinate tried. `attempts` counts the draws
/// used, so callers (and tests) can see the search stop at the cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Located {
    pub x: u32,
    pub y: u32,
    pub matched: bool,
    pub attempts: u32,
}

pub struct RegionLocator {
    target: Rgb,
    strategy: LocatorStrategy,
    matches: Vec<(u32, u32)>, // only filled for Precomputed
}

impl RegionLocator {
    pub fn new(target: Rgb, strategy: LocatorStrategy, map: &Raster) -> Self {
        let mut locator = Self { target, strategy, matches: Vec::new() };
        locator.rebuild(map);
        locator
    }

    /// Re-index after the map was rescaled.
    pub fn rebuild(&mut self, map: &Raster) {
        self.matches.clear();
        if self.strategy == LocatorStrategy::Precomputed {
            self.matches
                .extend(map.pixels().filter(|&(_, _, c)| c == self.target).map(|(x, y, _)| (x, y)));
        }
    }

    pub fn strategy(&self) -> LocatorStrategy {
        self.strategy
    }

    /// Number of indexed matching pixels (0 for Rejection).
    pub fn indexed(&self) -> usize {
        self.matches.len()
    }

    /// Uniformly random matching coordinate within `canvas`.
    /// Never loops forever: an impossible search degrades to a logged miss.
    pub fn locate<R: Rng + ?Sized>(&self, map: &Raster, canvas: Canvas, rng: &mut R) -> Located {
        if !self.matches.is_empty() {
            let (x, y) = self.matches[rng.gen_range(0..self.matches.len())];
            return Located { x, y, matched: true, attempts: 1 };
        }
        self.reject_sample(map, canvas, rng)
    }

    fn reject_sample<R: Rng + ?Sized>(&self, map: &Raster, canvas: Canvas, rng: &mut R) -> Located {
        if canvas.is_degenerate() {
            warn!("region locator: canvas is {}x{}, nothing to sample", canvas.width, canvas.height);
            return Located { x: 0, y: 0, matched: false, attempts: 0 };
        }

        let mut last = (0, 0);
        for attempt in 1..=LOCATOR_MAX_ATTEMPTS {
            let x = rng.gen_range(0..canvas.width);
            let y = rng.gen_range(0..canvas.height);
            if map.sample(x as i64, y as i64) == Some(self.target) {
                return Located { x, y, matched: true, attempts: attempt };
            }
            last = (x, y);
        }

        warn!(
            "region locator: no pixel of colour ({}, {}, {}) after {} attempts",
            self.target.r, self.target.g, self.target.b, LOCATOR_MAX_ATTEMPTS
        );
        Located { x: last.0, y: last.1, matched: false, attempts: LOCATOR_MAX_ATTEMPTS }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use rand::{SeedableRng, rngs::StdRng};

    const TARGET: Rgb = Rgb::new(2, 2, 255);

    /// 40x30 map, mostly black, with a 3x2 patch of TARGET at (30..33, 5..7).
    fn patchy_map() -> Raster {
        let mut img = RgbImage::new(40, 30);
        for y in 5..7 {
            for x in 30..33 {
                img.put_pixel(x, y, image::Rgb([TARGET.r, TARGET.g, TARGET.b]));
            }
        }
        Raster::new(img)
    }

    #[test]
    fn rejection_finds_the_only_patch() {
        let map = patchy_map();
        let locator = RegionLocator::new(TARGET, LocatorStrategy::Rejection, &map);
        let mut rng = StdRng::seed_from_u64(11);
        let mut hits = 0;
        for _ in 0..200 {
            let found = locator.locate(&map, Canvas::new(40, 30), &mut rng);
            if found.matched {
                hits += 1;
                assert!((30..33).contains(&found.x) && (5..7).contains(&found.y));
            }
        }
        // 6 of 1200 pixels match; 1000 draws miss with probability ~0.7%.
        assert!(hits >= 190, "only {hits} of 200 searches matched");
    }

    #[test]
    fn precomputed_always_matches_and_is_in_region() {
        let map = patchy_map();
        let locator = RegionLocator::new(TARGET, LocatorStrategy::Precomputed, &map);
        assert_eq!(locator.indexed(), 6);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let found = locator.locate(&map, Canvas::new(40, 30), &mut rng);
            assert!(found.matched);
            assert_eq!(map.sample(found.x as i64, found.y as i64), Some(TARGET));
        }
    }

    #[test]
    fn impossible_search_stops_at_the_attempt_cap() {
        let map = Raster::new(RgbImage::new(20, 20));
        let mut rng = StdRng::seed_from_u64(5);
        for strategy in [LocatorStrategy::Rejection, LocatorStrategy::Precomputed] {
            let locator = RegionLocator::new(TARGET, strategy, &map);
            let found = locator.locate(&map, Canvas::new(20, 20), &mut rng);
            assert!(!found.matched);
            assert_eq!(found.attempts, LOCATOR_MAX_ATTEMPTS);
            assert!(found.x < 20 && found.y < 20);
        }
    }

    #[test]
    fn degenerate_canvas_does_not_panic() {
        let map = patchy_map();
        let locator = RegionLocator::new(TARGET, LocatorStrategy::Rejection, &map);
        let mut rng = StdRng::seed_from_u64(0);
        let found = locator.locate(&map, Canvas::new(0, 30), &mut rng);
        assert_eq!(found, Located { x: 0, y: 0, matched: false, attempts: 0 });
    }

    #[test]
    fn rebuild_tracks_the_rescaled_map() {
        let map = patchy_map();
        let mut locator = RegionLocator::new(TARGET, LocatorStrategy::Precomputed, &map);
        let full = Raster::new(RgbImage::from_pixel(4, 4, image::Rgb([TARGET.r, TARGET.g, TARGET.b])));
        locator.rebuild(&full);
        assert_eq!(locator.indexed(), 16);
    }
}
