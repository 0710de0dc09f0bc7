//! Mathematical utilities for color matching

/// Selectable color distance metrics
pub mod distance;
