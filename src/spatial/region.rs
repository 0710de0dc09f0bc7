//! Region geometry for the grid and overlay sweeps
//!
//! All coordinates are in canvas pixels with `x` growing right and `y`
//! growing down. A region is always a `tile_size` square.

use crate::analysis::signature::{ColorValue, mean_color};
use image::{RgbImage, imageops};
use rand::Rng;

/// Square sub-area of the target image that one tile will cover
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetRegion {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Edge length in pixels
    pub size: u32,
}

impl TargetRegion {
    /// Region with top-left corner at `(x, y)`
    pub const fn new(x: u32, y: u32, size: u32) -> Self {
        Self { x, y, size }
    }

    /// Bounding box as `(left, top, right, bottom)`, right and bottom exclusive
    pub const fn bounds(&self) -> (u32, u32, u32, u32) {
        (self.x, self.y, self.x + self.size, self.y + self.size)
    }

    /// Whether the region lies fully inside a `width` by `height` canvas
    pub const fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x + self.size <= width && self.y + self.size <= height
    }

    /// Mean color of the target pixels under this region
    ///
    /// Recomputed on every call; regions are never cached.
    pub fn signature(&self, target: &RgbImage) -> ColorValue {
        let view = imageops::crop_imm(target, self.x, self.y, self.size, self.size);
        mean_color(&*view)
    }
}

/// Largest multiple of `tile_size` not exceeding `extent`
pub const fn truncate_to_tile(extent: u32, tile_size: u32) -> u32 {
    if tile_size == 0 {
        return 0;
    }
    (extent / tile_size) * tile_size
}

/// Canvas dimensions for a target, each truncated down to a tile multiple
pub const fn truncated_dimensions(width: u32, height: u32, tile_size: u32) -> (u32, u32) {
    (
        truncate_to_tile(width, tile_size),
        truncate_to_tile(height, tile_size),
    )
}

/// Regions of the grid sweep in placement order
///
/// Columns are the outer loop and rows the inner one, so the sweep walks
/// down each column before moving right.
pub fn grid_regions(width: u32, height: u32, tile_size: u32) -> Vec<TargetRegion> {
    if tile_size == 0 {
        return Vec::new();
    }
    let step = tile_size as usize;
    (0..width)
        .step_by(step)
        .flat_map(|x| {
            (0..height)
                .step_by(step)
                .map(move |y| TargetRegion::new(x, y, tile_size))
        })
        .collect()
}

/// Number of overlay placements for a coverage percentage
///
/// `floor(width · height · coverage / 100 / tile_size²)`
pub fn overlay_iterations(width: u32, height: u32, coverage: u8, tile_size: u32) -> usize {
    if tile_size == 0 {
        return 0;
    }
    let area = u64::from(width) * u64::from(height);
    let tile_area = u64::from(tile_size) * u64::from(tile_size);
    (area * u64::from(coverage) / 100 / tile_area) as usize
}

/// Samples overlay regions off the tile grid
///
/// Corners are drawn uniformly from `1..=extent - tile_size - 1` on each
/// axis, keeping a one pixel margin to every canvas edge. A coordinate that
/// lands on a multiple of the tile size is shifted one pixel right or down.
pub struct OverlaySampler {
    width: u32,
    height: u32,
    tile_size: u32,
}

impl OverlaySampler {
    /// Sampler for a canvas, or `None` when no interior box fits
    pub const fn new(width: u32, height: u32, tile_size: u32) -> Option<Self> {
        if tile_size == 0 || width < tile_size + 2 || height < tile_size + 2 {
            return None;
        }
        Some(Self {
            width,
            height,
            tile_size,
        })
    }

    /// Draw the next overlay region
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TargetRegion {
        let x = self.nudge(rng.random_range(1..=self.width - self.tile_size - 1));
        let y = self.nudge(rng.random_range(1..=self.height - self.tile_size - 1));
        TargetRegion::new(x, y, self.tile_size)
    }

    // Upper bound `extent - tile_size - 1` is never a tile multiple for
    // tile sizes above one, so the shifted value stays inside the interior
    const fn nudge(&self, coordinate: u32) -> u32 {
        if self.tile_size > 1 && coordinate % self.tile_size == 0 {
            coordinate + 1
        } else {
            coordinate
        }
    }
}
