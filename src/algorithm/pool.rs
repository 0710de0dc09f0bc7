//! Available/recycled tile bookkeeping with threshold-triggered replenishment
//!
//! Every known tile sits in exactly one of two sets. Matching withdraws the
//! winner from `available` into `recycled`; when nothing in `available` is
//! close enough, all recycled tiles return and the scan runs once more.

use crate::analysis::signature::ColorValue;
use crate::io::error::{MosaicError, Result};
use crate::math::distance::DistanceMetric;
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Stable handle of a tile, its index in the sorted tile library
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub usize);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Closest tile found by a scan
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Winning tile
    pub tile: TileId,
    /// Its distance to the target color
    pub error: f64,
}

/// Working set of tiles partitioned into available and recycled
///
/// Both maps are ordered by [`TileId`], so scans visit tiles in library
/// order and ties go to the lowest id.
#[derive(Clone, Debug)]
pub struct TilePool {
    available: BTreeMap<TileId, ColorValue>,
    recycled: BTreeMap<TileId, ColorValue>,
    threshold: f64,
    metric: DistanceMetric,
    replenishments: usize,
}

impl TilePool {
    /// Create a pool with every signature available
    pub fn new(
        signatures: impl IntoIterator<Item = (TileId, ColorValue)>,
        threshold: f64,
        metric: DistanceMetric,
    ) -> Self {
        Self {
            available: signatures.into_iter().collect(),
            recycled: BTreeMap::new(),
            threshold,
            metric,
            replenishments: 0,
        }
    }

    /// Pick the closest available tile and move it to the recycled set
    ///
    /// When the pool is empty or the best distance exceeds the threshold,
    /// recycled tiles are merged back and the scan repeats once. A distance
    /// equal to the threshold is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::PoolExhausted`] when no tile meets the
    /// threshold even after replenishment. The pool is left unchanged
    /// apart from the replenishment itself.
    pub fn acquire_best_match(&mut self, target: ColorValue) -> Result<TileId> {
        let mut best = self.best_available(target);

        if !self.is_acceptable(best) {
            warn!(
                threshold = self.threshold,
                error = best.map(|c| c.error),
                "Tripped error threshold"
            );
            self.replenish();
            best = self.best_available(target);
        }

        match best {
            Some(candidate) if self.is_acceptable(best) => {
                self.withdraw(candidate.tile);
                Ok(candidate.tile)
            }
            _ => Err(MosaicError::PoolExhausted {
                threshold: self.threshold,
                best_error: best.map(|c| c.error),
                target,
            }),
        }
    }

    /// Closest available tile to `target`, first in id order on ties
    pub fn best_available(&self, target: ColorValue) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for (&tile, &signature) in &self.available {
            let error = self.metric.distance(target, signature);
            if best.is_none_or(|current| error < current.error) {
                best = Some(Candidate { tile, error });
            }
        }
        best
    }

    /// Return every recycled tile to the available set
    pub fn replenish(&mut self) {
        self.available.append(&mut self.recycled);
        self.replenishments += 1;
    }

    fn withdraw(&mut self, tile: TileId) {
        if let Some(signature) = self.available.remove(&tile) {
            self.recycled.insert(tile, signature);
        }
    }

    fn is_acceptable(&self, candidate: Option<Candidate>) -> bool {
        candidate.is_some_and(|c| c.error <= self.threshold)
    }

    /// Whether the tile can currently be matched
    pub fn is_available(&self, tile: TileId) -> bool {
        self.available.contains_key(&tile)
    }

    /// Whether the tile has been used since the last replenishment
    pub fn is_recycled(&self, tile: TileId) -> bool {
        self.recycled.contains_key(&tile)
    }

    /// Number of tiles ready for matching
    pub fn available_len(&self) -> usize {
        self.available.len()
    }

    /// Number of tiles waiting for replenishment
    pub fn recycled_len(&self) -> usize {
        self.recycled.len()
    }

    /// Total number of tiles known to the pool
    pub fn len(&self) -> usize {
        self.available.len() + self.recycled.len()
    }

    /// Whether the pool knows no tiles at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many times recycled tiles were returned to the pool
    pub const fn replenishments(&self) -> usize {
        self.replenishments
    }

    /// Configured error threshold
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Configured distance metric
    pub const fn metric(&self) -> DistanceMetric {
        self.metric
    }
}
