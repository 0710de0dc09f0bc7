//! Tile images and the library they form
//!
//! Each tile owns its RGB pixels and the mean-color signature computed when
//! it joins the library. Tiles keep their library index as identity, which
//! the pool uses for deterministic tie-breaking.

use crate::algorithm::pool::TileId;
use crate::analysis::signature::{ColorValue, mean_color};
use image::{RgbImage, imageops};
use rayon::prelude::*;
use tracing::{debug, warn};

/// A single building block of the mosaic
#[derive(Clone, Debug)]
pub struct Tile {
    name: String,
    pixels: RgbImage,
    signature: ColorValue,
}

impl Tile {
    /// Build a tile, resizing it to `tile_size` square when needed
    pub fn new(name: String, pixels: RgbImage, tile_size: u32) -> Self {
        let pixels = if pixels.dimensions() == (tile_size, tile_size) {
            pixels
        } else {
            warn!(
                tile = %name,
                width = pixels.width(),
                height = pixels.height(),
                tile_size,
                "Resizing tile to match tile size"
            );
            imageops::resize(
                &pixels,
                tile_size,
                tile_size,
                imageops::FilterType::Lanczos3,
            )
        };
        let signature = mean_color(&pixels);
        debug!(tile = %name, %signature, "Processing tile");

        Self {
            name,
            pixels,
            signature,
        }
    }

    /// Name the tile was loaded under, usually its file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decoded RGB pixels, exactly `tile_size` square
    pub const fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Cached mean color
    pub const fn signature(&self) -> ColorValue {
        self.signature
    }
}

/// Ordered collection of tiles sharing one tile size
#[derive(Clone, Debug)]
pub struct TileLibrary {
    tile_size: u32,
    tiles: Vec<Tile>,
}

impl TileLibrary {
    /// Build a library from named images
    ///
    /// Signatures are computed in parallel; the input order becomes the
    /// [`TileId`] order.
    pub fn from_images(images: Vec<(String, RgbImage)>, tile_size: u32) -> Self {
        let tiles = images
            .into_par_iter()
            .map(|(name, pixels)| Tile::new(name, pixels, tile_size))
            .collect();

        Self { tile_size, tiles }
    }

    /// Edge length shared by every tile
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Tile by id
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0)
    }

    /// All tiles in id order
    pub const fn tiles(&self) -> &[Tile] {
        self.tiles.as_slice()
    }

    /// `(id, signature)` pairs for seeding a pool
    pub fn signatures(&self) -> impl Iterator<Item = (TileId, ColorValue)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| (TileId(index), tile.signature()))
    }

    /// Number of tiles
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the library has no tiles
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
