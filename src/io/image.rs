//! Target decoding and PNG export of finished canvases

use crate::analysis::signature::normalize;
use crate::io::configuration::{OUTPUT_SUFFIX, PALETTE_SUFFIX};
use crate::io::error::{MosaicError, Result, WithPath};
use image::{ImageFormat, RgbImage};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Decode a target image and normalize it to RGB
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_target(path: &Path) -> Result<RgbImage> {
    let decoded = image::open(path).with_path(path)?;
    Ok(normalize(decoded))
}

/// Append `suffix` to the full file name, keeping the original extension
fn with_suffix(target: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Mosaic output path: `<target>_out.png`
pub fn output_path(target: &Path) -> PathBuf {
    with_suffix(target, OUTPUT_SUFFIX)
}

/// Palette swatch path: `<target>_palette.png`
pub fn palette_path(target: &Path) -> PathBuf {
    with_suffix(target, PALETTE_SUFFIX)
}

/// Whether the path is one of this tool's own outputs
pub fn is_generated_output(path: &Path) -> bool {
    let name = path.to_string_lossy();
    name.ends_with(OUTPUT_SUFFIX) || name.ends_with(PALETTE_SUFFIX)
}

/// Save an RGB canvas as PNG, creating the parent directory if needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn export_canvas(canvas: &RgbImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    canvas
        .save_with_format(output_path, ImageFormat::Png)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
