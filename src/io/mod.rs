/// Command-line parsing and batch processing of targets
pub mod cli;
/// Engine constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Target decoding and PNG export
pub mod image;
/// Tile library loading
pub mod library;
/// Library palette swatches
pub mod palette;
/// Progress display
pub mod progress;
