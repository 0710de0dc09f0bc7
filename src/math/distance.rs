use crate::analysis::signature::ColorValue;
use clap::ValueEnum;
use std::fmt;

/// Color dissimilarity metric used to rank tiles against a region
///
/// Both variants return a non-negative distance that is zero exactly when
/// the two colors are identical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DistanceMetric {
    /// Straight-line distance in RGB space
    Euclidean,
    /// Redmean-style weighted approximation of perceived difference
    #[default]
    Perceptual,
}

impl DistanceMetric {
    /// Distance between two colors under this metric
    pub fn distance(self, a: ColorValue, b: ColorValue) -> f64 {
        match self {
            Self::Euclidean => euclidean_distance(a, b),
            Self::Perceptual => perceptual_distance(a, b),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Euclidean => write!(f, "euclidean"),
            Self::Perceptual => write!(f, "perceptual"),
        }
    }
}

/// `sqrt(dr² + dg² + db²)`
pub fn euclidean_distance(a: ColorValue, b: ColorValue) -> f64 {
    let dr = a.r - b.r;
    let dg = a.g - b.g;
    let db = a.b - b.b;
    db.mul_add(db, dr.mul_add(dr, dg * dg)).sqrt()
}

/// Weighted RGB distance with a red-dependent correction term
///
/// `sqrt(2·dr² + 4·dg² + 3·db² + (r̄·(dr² − db²)) / 256)` where `r̄ = dr / 2`.
pub fn perceptual_distance(a: ColorValue, b: ColorValue) -> f64 {
    let dr = a.r - b.r;
    let dg = a.g - b.g;
    let db = a.b - b.b;
    let r_mean = dr / 2.0;

    let dr2 = dr * dr;
    let db2 = db * db;
    let weighted = 2.0f64.mul_add(dr2, 4.0f64.mul_add(dg * dg, 3.0 * db2));
    let correction = r_mean * (dr2 - db2) / 256.0;

    // Only reachable for channel deltas far outside 0..=255
    (weighted + correction).max(0.0).sqrt()
}
