//! Tile library loading from a pre-scaled image directory

use crate::analysis::signature::normalize;
use crate::io::error::{MosaicError, Result, WithPath};
use crate::spatial::tiles::TileLibrary;
use image::ImageFormat;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory holding tiles of one size: `<root>/<tile_size>/`
pub fn library_dir(root: &Path, tile_size: u32) -> PathBuf {
    root.join(tile_size.to_string())
}

/// Image files in `dir` sorted by file name
///
/// Entries whose format cannot be inferred from the extension are skipped.
///
/// # Errors
///
/// Returns an error if the directory cannot be read
pub fn collect_image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| MosaicError::FileSystem {
        path: dir.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.with_path(dir)?.path();
        if path.is_file() && ImageFormat::from_path(&path).is_ok() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Decode every tile image in `dir` and compute its signature
///
/// Decoding runs in parallel; tiles keep file name order.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be read
/// - Any tile image fails to decode
pub fn load_library(dir: &Path, tile_size: u32) -> Result<TileLibrary> {
    let files = collect_image_files(dir)?;
    info!(dir = %dir.display(), count = files.len(), "Loading tile library");

    let images = files
        .par_iter()
        .map(|path| {
            let decoded = image::open(path).with_path(path)?;
            let name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned();
            Ok((name, normalize(decoded)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TileLibrary::from_images(images, tile_size))
}
