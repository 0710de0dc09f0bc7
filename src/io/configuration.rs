//! Engine constants and runtime configuration defaults

// Matching defaults
/// Largest acceptable color distance, determined by experimenting
pub const DEFAULT_THRESHOLD: f64 = 66.0;
/// Overlay coverage in percent; zero disables the overlay sweep
pub const DEFAULT_COVERAGE: u8 = 0;
/// Fixed seed for reproducible overlay positions
pub const DEFAULT_SEED: u64 = 42;

// Tile library layout
/// Root holding one sub-directory of scaled tiles per tile size
pub const DEFAULT_LIBRARY_DIR: &str = "img_scaled";

// Output settings
/// Suffix appended to the target file name for the mosaic
pub const OUTPUT_SUFFIX: &str = "_out.png";
/// Suffix appended to the target file name for the palette swatches
pub const PALETTE_SUFFIX: &str = "_palette.png";
/// Edge length of one palette swatch in pixels
pub const PALETTE_SWATCH_SIZE: u32 = 16;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
