//! Color analysis of tiles and target regions

/// Mean-color signatures and RGB normalization
pub mod signature;
