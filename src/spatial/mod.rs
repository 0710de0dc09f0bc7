//! Spatial data structures for the mosaic
//!
//! This module contains:
//! - Region geometry for the grid and overlay sweeps
//! - Tile images and the library they form

/// Target regions, grid truncation and overlay sampling
pub mod region;
/// Tile images with cached signatures
pub mod tiles;

pub use region::TargetRegion;
pub use tiles::{Tile, TileLibrary};
