//! Mean-color signatures for tiles and target regions
//!
//! A signature reduces an image, or a view into one, to the arithmetic mean
//! of each RGB channel. Tiles compute theirs once when the library loads;
//! target regions are transient and recompute on every placement.

use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use std::fmt;

/// Average channel intensities of an image or region, each in `0.0..=255.0`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorValue {
    /// Mean red intensity
    pub r: f64,
    /// Mean green intensity
    pub g: f64,
    /// Mean blue intensity
    pub b: f64,
}

impl ColorValue {
    /// Create a color from channel intensities
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Channel values as an array in `[r, g, b]` order
    pub const fn channels(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Round each channel to the nearest 8-bit value
    pub fn to_rgb8(self) -> Rgb<u8> {
        let quantize = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        Rgb([quantize(self.r), quantize(self.g), quantize(self.b)])
    }
}

impl From<Rgb<u8>> for ColorValue {
    fn from(pixel: Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self::new(f64::from(r), f64::from(g), f64::from(b))
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.r, self.g, self.b)
    }
}

/// Convert any decoded image to 3-channel RGB
///
/// Every input is converted, whatever its original color type, so grayscale
/// and alpha images never reach signature extraction in another layout.
pub fn normalize(image: DynamicImage) -> RgbImage {
    image.into_rgb8()
}

/// Arithmetic mean of each channel over every pixel of the view
///
/// Works on whole images and on cropped sub-views alike. An empty view has
/// no pixels to average and yields black.
pub fn mean_color<V>(view: &V) -> ColorValue
where
    V: GenericImageView<Pixel = Rgb<u8>>,
{
    let (width, height) = view.dimensions();
    let count = u64::from(width) * u64::from(height);
    if count == 0 {
        return ColorValue::default();
    }

    // Integer sums keep the result independent of iteration order
    let mut sums = [0u64; 3];
    for (_, _, pixel) in view.pixels() {
        for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
            *sum += u64::from(channel);
        }
    }

    let [r, g, b] = sums;
    let count = count as f64;
    ColorValue::new(r as f64 / count, g as f64 / count, b as f64 / count)
}
