//! Photo mosaic generation from a library of average-color matched tiles
//!
//! Every tile in the library is reduced to its mean RGB color once. The target
//! image is then swept on a tile-aligned grid, and optionally again at random
//! off-grid positions, pasting for each region the available tile whose color
//! is closest under the configured metric. Used tiles are recycled and only
//! return to play when nothing left is close enough.

#![forbid(unsafe_code)]

/// Tile pool bookkeeping and mosaic composition
pub mod algorithm;
/// Mean-color signature extraction
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Color distance metrics
pub mod math;
/// Region geometry and tile library data structures
pub mod spatial;

pub use io::error::{MosaicError, Result};
