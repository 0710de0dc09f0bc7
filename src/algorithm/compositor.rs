use crate::{
    algorithm::pool::{TileId, TilePool},
    io::configuration::{DEFAULT_COVERAGE, DEFAULT_SEED, DEFAULT_THRESHOLD},
    io::error::{Result, invalid_parameter, invalid_source},
    math::distance::DistanceMetric,
    spatial::region::{
        OverlaySampler, TargetRegion, grid_regions, overlay_iterations, truncated_dimensions,
    },
    spatial::tiles::TileLibrary,
};
use image::{RgbImage, imageops};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, warn};

/// Engine parameters controlling matching and the overlay sweep
#[derive(Clone, Copy, Debug)]
pub struct MosaicConfig {
    /// Edge length of every tile and grid cell in pixels
    pub tile_size: u32,
    /// Largest acceptable color distance for a match
    pub threshold: f64,
    /// Share of the canvas, in percent, covered again by off-grid tiles
    pub coverage: u8,
    /// Distance metric used to rank tiles
    pub metric: DistanceMetric,
    /// Seed for overlay position sampling
    pub seed: u64,
}

impl MosaicConfig {
    /// Configuration with defaults for everything but the tile size
    pub const fn new(tile_size: u32) -> Self {
        Self {
            tile_size,
            threshold: DEFAULT_THRESHOLD,
            coverage: DEFAULT_COVERAGE,
            metric: DistanceMetric::Perceptual,
            seed: DEFAULT_SEED,
        }
    }

    /// Check parameters before any image work starts
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile size is zero
    /// - The threshold is negative or not finite
    /// - The coverage is 100 or more
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &"must be at least one pixel",
            ));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(invalid_parameter(
                "threshold",
                &self.threshold,
                &"must be a finite, non-negative distance",
            ));
        }
        if self.coverage >= 100 {
            return Err(invalid_parameter(
                "coverage",
                &self.coverage,
                &"must be below 100 percent",
            ));
        }
        Ok(())
    }
}

/// Sweep that produced a placement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Aligned, non-overlapping grid sweep
    Grid,
    /// Randomized off-grid sweep
    Overlay,
}

/// One tile pasted onto the canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Sweep the placement belongs to
    pub phase: Phase,
    /// Region covered
    pub region: TargetRegion,
    /// Tile pasted there
    pub tile: TileId,
}

/// Finished composition
#[derive(Debug)]
pub struct Mosaic {
    /// Output raster, the target truncated to whole tiles
    pub canvas: RgbImage,
    /// Every placement in paste order
    pub placements: Vec<Placement>,
    /// How often recycled tiles had to be returned to the pool
    pub replenishments: usize,
}

impl Mosaic {
    /// Placements made during one phase
    pub fn placements_in(&self, phase: Phase) -> impl Iterator<Item = &Placement> + '_ {
        self.placements.iter().filter(move |p| p.phase == phase)
    }
}

/// Drives the grid and overlay sweeps over a target image
///
/// Owns the pool for one target; each placement crops a region, matches its
/// mean color against the pool and pastes the winning tile at the same box.
pub struct Compositor<'a> {
    library: &'a TileLibrary,
    pool: TilePool,
    config: MosaicConfig,
    rng: StdRng,
}

impl<'a> Compositor<'a> {
    /// Create a compositor with a fresh pool over the whole library
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or its tile size
    /// differs from the library's
    pub fn new(library: &'a TileLibrary, config: MosaicConfig) -> Result<Self> {
        config.validate()?;
        if library.tile_size() != config.tile_size {
            return Err(invalid_parameter(
                "tile_size",
                &config.tile_size,
                &format!("library holds {}px tiles", library.tile_size()),
            ));
        }

        let pool = TilePool::new(library.signatures(), config.threshold, config.metric);
        Ok(Self {
            library,
            pool,
            config,
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// Current pool state
    pub const fn pool(&self) -> &TilePool {
        &self.pool
    }

    /// Number of placements `compose` will make for a target of this size
    pub fn planned_placements(&self, width: u32, height: u32) -> usize {
        let tile_size = self.config.tile_size;
        let (width, height) = truncated_dimensions(width, height, tile_size);
        let grid = (width / tile_size) as usize * (height / tile_size) as usize;
        let overlay = if OverlaySampler::new(width, height, tile_size).is_some() {
            overlay_iterations(width, height, self.config.coverage, tile_size)
        } else {
            0
        };
        grid + overlay
    }

    /// Compose the mosaic for `target`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target is smaller than one tile in either dimension
    /// - The pool is exhausted for some region; the canvas is discarded
    pub fn compose(&mut self, target: &RgbImage) -> Result<Mosaic> {
        self.compose_with_progress(target, |_| {})
    }

    /// Compose the mosaic, calling `on_placement` with the running count
    ///
    /// # Errors
    ///
    /// Same as [`Compositor::compose`]
    pub fn compose_with_progress<F>(
        &mut self,
        target: &RgbImage,
        mut on_placement: F,
    ) -> Result<Mosaic>
    where
        F: FnMut(usize),
    {
        let tile_size = self.config.tile_size;
        let (width, height) = truncated_dimensions(target.width(), target.height(), tile_size);
        if width == 0 || height == 0 {
            return Err(invalid_source(&format!(
                "target of {}x{} is smaller than one {tile_size}px tile",
                target.width(),
                target.height()
            )));
        }

        let mut canvas = RgbImage::new(width, height);
        let mut placements = Vec::new();

        for region in grid_regions(width, height, tile_size) {
            placements.push(self.place(target, &mut canvas, region, Phase::Grid)?);
            on_placement(placements.len());
        }

        let iterations = overlay_iterations(width, height, self.config.coverage, tile_size);
        if iterations > 0 {
            match OverlaySampler::new(width, height, tile_size) {
                Some(sampler) => {
                    for _ in 0..iterations {
                        let region = sampler.sample(&mut self.rng);
                        placements.push(self.place(target, &mut canvas, region, Phase::Overlay)?);
                        on_placement(placements.len());
                    }
                }
                None => {
                    warn!(width, height, tile_size, "Canvas too small for overlay, skipping it");
                }
            }
        }

        Ok(Mosaic {
            canvas,
            placements,
            replenishments: self.pool.replenishments(),
        })
    }

    fn place(
        &mut self,
        target: &RgbImage,
        canvas: &mut RgbImage,
        region: TargetRegion,
        phase: Phase,
    ) -> Result<Placement> {
        let color = region.signature(target);
        let tile_id = self.pool.acquire_best_match(color)?;
        let tile = self
            .library
            .get(tile_id)
            .ok_or_else(|| invalid_source(&format!("pool returned unknown tile {tile_id}")))?;

        imageops::replace(canvas, tile.pixels(), i64::from(region.x), i64::from(region.y));
        debug!(?phase, x = region.x, y = region.y, tile = tile.name(), "Placed tile");

        Ok(Placement {
            phase,
            region,
            tile: tile_id,
        })
    }
}
