// Loads the painting and its four region maps, and keeps canvas-sized copies of them.
// Visual expectation: after `fit`, every buffer lines up pixel-for-pixel with the window.

use std::path::Path;

use image::RgbImage;
use image::imageops::{self, FilterType};
use log::{info, warn};

use crate::error::Error;
use crate::locator::LocatorStrategy;
use crate::region::{Region, RegionMap};
use crate::types::{Canvas, Rgb};

pub const REFERENCE_FILE: &str = "scream.jpg";

/// A decoded RGB image with point lookup (the pixel sampler).
pub struct Raster {
    image: RgbImage,
}

impl Raster {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Colour at integer pixel (x, y), or `None` outside the image.
    /// Particles routinely sit a few pixels past the edge, so misses are expected.
    #[inline]
    pub fn sample(&self, x: i64, y: i64) -> Option<Rgb> {
        if x < 0 || y < 0 {
            return None;
        }
        self.image.get_pixel_checked(x as u32, y as u32).map(|p| Rgb::from(*p))
    }

    /// Iterate over all (x, y, colour) triples, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Rgb)> + '_ {
        self.image.enumerate_pixels().map(|(x, y, p)| (x, y, Rgb::from(*p)))
    }
}

/// Canvas that fills `viewport_height` while keeping the source aspect ratio.
pub fn fit_to_height(src_width: u32, src_height: u32, viewport_height: u32) -> Canvas {
    let height = viewport_height.max(1);
    let aspect = src_width as f64 / src_height.max(1) as f64;
    let width = (height as f64 * aspect).round().max(1.0) as u32;
    Canvas::new(width, height)
}

/// Reference painting + region maps. Untouched sources are kept so every
/// resize scales from the originals instead of compounding resampling blur.
pub struct Assets {
    source_reference: RgbImage,
    source_maps: Vec<RgbImage>, // indexed by Region::index
    reference: Raster,
    maps: Vec<RegionMap>,       // indexed by Region::index
    canvas: Canvas,
}

impl Assets {
    /// Read `scream.jpg` and the four colour maps from `dir`.
    pub fn load(dir: &Path, strategy: LocatorStrategy) -> Result<Self, Error> {
        let reference = load_rgb(&dir.join(REFERENCE_FILE))?;
        let mut maps = Vec::with_capacity(Region::ALL.len());
        for region in Region::ALL {
            maps.push(load_rgb(&dir.join(region.map_file()))?);
        }
        info!(
            "loaded {} ({}x{}) and {} region maps from {}",
            REFERENCE_FILE,
            reference.width(),
            reference.height(),
            maps.len(),
            dir.display()
        );
        let maps: [RgbImage; 4] = maps
            .try_into()
            .map_err(|_| Error::AssetSize("expected exactly four region maps".into()))?;
        Self::from_images(reference, maps, strategy)
    }

    /// Build from already-decoded images, in `Region::ALL` order.
    /// The canvas starts at the reference's own size until `fit` is called.
    pub fn from_images(
        reference: RgbImage,
        maps: [RgbImage; 4],
        strategy: LocatorStrategy,
    ) -> Result<Self, Error> {
        if reference.width() == 0 || reference.height() == 0 {
            return Err(Error::AssetSize("reference image has no pixels".into()));
        }
        for (region, map) in Region::ALL.iter().zip(maps.iter()) {
            if map.width() == 0 || map.height() == 0 {
                return Err(Error::AssetSize(format!("{} has no pixels", region.map_file())));
            }
            if map.dimensions() != reference.dimensions() {
                // Still usable: everything is rescaled to the same canvas.
                warn!(
                    "{} is {}x{} but the reference is {}x{}",
                    region.map_file(),
                    map.width(),
                    map.height(),
                    reference.width(),
                    reference.height()
                );
            }
        }

        let canvas = Canvas::new(reference.width(), reference.height());
        let scaled_maps = Region::ALL
            .iter()
            .zip(maps.iter())
            .map(|(&region, map)| {
                let raster = Raster::new(scale(map, canvas, FilterType::Nearest));
                RegionMap::new(region, raster, strategy)
            })
            .collect();

        Ok(Self {
            reference: Raster::new(reference.clone()),
            source_reference: reference,
            source_maps: maps.into(),
            maps: scaled_maps,
            canvas,
        })
    }

    /// Rescale every buffer to fill `viewport_height`; returns the new canvas.
    /// Region maps use nearest-neighbour so their colours stay exact.
    pub fn fit(&mut self, viewport_height: u32) -> Canvas {
        let canvas = fit_to_height(
            self.source_reference.width(),
            self.source_reference.height(),
            viewport_height,
        );
        if canvas == self.canvas() {
            return canvas;
        }

        self.reference = Raster::new(scale(&self.source_reference, canvas, FilterType::Triangle));
        for (map, source) in self.maps.iter_mut().zip(self.source_maps.iter()) {
            map.rescale(Raster::new(scale(source, canvas, FilterType::Nearest)));
        }
        info!(
            "canvas fitted to {}x{} (reference {}x{})",
            canvas.width,
            canvas.height,
            self.reference.width(),
            self.reference.height()
        );
        self.canvas = canvas;
        canvas
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn reference(&self) -> &Raster {
        &self.reference
    }

    pub fn region_map(&self, region: Region) -> &RegionMap {
        &self.maps[region.index()]
    }
}

fn load_rgb(path: &Path) -> Result<RgbImage, Error> {
    let img = image::open(path)
        .map_err(|e| Error::AssetLoad { path: path.display().to_string(), reason: e.to_string() })?
        .to_rgb8();
    if img.width() == 0 || img.height() == 0 {
        return Err(Error::AssetSize(format!("{} has no pixels", path.display())));
    }
    Ok(img)
}

fn scale(src: &RgbImage, canvas: Canvas, filter: FilterType) -> RgbImage {
    if src.dimensions() == (canvas.width, canvas.height) {
        return src.clone();
    }
    imageops::resize(src, canvas.width, canvas.height, filter)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_preserves_three_by_two_aspect() {
        assert_eq!(fit_to_height(300, 200, 812), Canvas::new(1218, 812));
    }

    #[test]
    fn fit_never_produces_an_empty_canvas() {
        assert_eq!(fit_to_height(1, 1000, 0), Canvas::new(1, 1));
    }

    #[test]
    fn sampler_rejects_out_of_bounds() {
        let raster = Raster::new(RgbImage::from_pixel(4, 3, image::Rgb([9, 8, 7])));
        assert_eq!(raster.sample(3, 2), Some(Rgb::new(9, 8, 7)));
        assert_eq!(raster.sample(4, 0), None);
        assert_eq!(raster.sample(0, 3), None);
        assert_eq!(raster.sample(-1, 0), None);
    }

    #[test]
    fn resize_reloads_every_buffer_at_the_new_size() {
        let mut assets = fixtures::solid_assets(300, 200, Rgb::new(40, 50, 60), LocatorStrategy::Precomputed);
        let canvas = assets.fit(812);
        assert_eq!(canvas, Canvas::new(1218, 812));
        assert_eq!(assets.canvas(), canvas);
        assert_eq!((assets.reference().width(), assets.reference().height()), (1218, 812));
        for region in Region::ALL {
            let map = assets.region_map(region).raster();
            assert_eq!((map.width(), map.height()), (1218, 812));
            // Nearest-neighbour keeps the exact region colour everywhere.
            assert_eq!(map.sample(1217, 811), Some(region.colour()));
        }
        assert_eq!(assets.reference().sample(600, 400), Some(Rgb::new(40, 50, 60)));
    }

    #[test]
    fn empty_reference_is_rejected() {
        let maps = Region::ALL.map(|_| RgbImage::new(2, 2));
        let err = Assets::from_images(RgbImage::new(0, 0), maps, LocatorStrategy::Rejection);
        assert!(matches!(err, Err(Error::AssetSize(_))));
    }

    #[test]
    fn missing_folder_reports_the_path() {
        let err = Assets::load(Path::new("/definitely/not/here"), LocatorStrategy::Rejection);
        match err {
            Err(Error::AssetLoad { path, .. }) => assert!(path.ends_with(REFERENCE_FILE)),
            _ => panic!("expected AssetLoad"),
        }
    }
}
