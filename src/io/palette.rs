//! Swatch rendering of the tile library's color coverage
//!
//! One square per tile signature, in library order, laid out in a grid that
//! is as close to square as the tile count allows. Gaps in the palette show
//! which target colors the library will struggle to match.

use crate::spatial::tiles::TileLibrary;
use image::RgbImage;

/// Columns used for `count` swatches: the smallest `c` with `c² ≥ count`
pub const fn palette_columns(count: usize) -> u32 {
    let mut columns = 0usize;
    while columns * columns < count {
        columns += 1;
    }
    columns as u32
}

/// Render the library signatures as swatches of `swatch_size` pixels
///
/// Returns `None` for an empty library.
pub fn render_palette(library: &TileLibrary, swatch_size: u32) -> Option<RgbImage> {
    let count = library.len();
    if count == 0 || swatch_size == 0 {
        return None;
    }

    let columns = palette_columns(count);
    let rows = (count as u32).div_ceil(columns);
    let mut palette = RgbImage::new(columns * swatch_size, rows * swatch_size);

    for (index, tile) in library.tiles().iter().enumerate() {
        let index = index as u32;
        let left = (index % columns) * swatch_size;
        let top = (index / columns) * swatch_size;
        let color = tile.signature().to_rgb8();
        for y in top..top + swatch_size {
            for x in left..left + swatch_size {
                palette.put_pixel(x, y, color);
            }
        }
    }

    Some(palette)
}
