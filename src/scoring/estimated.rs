// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Estimated scores for the untranslated remainder of a sentence.
//!
//! The search ranks hypotheses by accumulated score plus an estimate of what
//! translating the uncovered positions will add. The estimate depends on the
//! coverage only, so hypotheses with different coverage become comparable
//! within one stack.

use crate::coverage::{Bitmap, Range};
use crate::error::{Error, Result};

/// Read-only oracle from coverage to remaining-score estimate.
pub trait EstimatedScores: Send + Sync {
    fn calc_estimated_score(&self, bitmap: &Bitmap) -> f64;

    /// Longest sentence the estimates cover, if they are bounded.
    fn source_len(&self) -> Option<usize> {
        None
    }
}

/// Estimates every remainder as 0.0, ranking by accumulated score alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroEstimates;

impl EstimatedScores for ZeroEstimates {
    fn calc_estimated_score(&self, _bitmap: &Bitmap) -> f64 {
        0.0
    }
}

/// Best achievable score for every contiguous span of the sentence.
///
/// The estimate of a bitmap is the sum of the entries for each maximal
/// uncovered gap.
#[derive(Debug, Clone)]
pub struct FutureCostTable {
    source_len: usize,
    // Row-major [start][end]; entries with end < start are unused.
    scores: Vec<f64>,
}

impl FutureCostTable {
    /// A table over `source_len` positions with every span estimated at 0.0.
    pub fn new(source_len: usize) -> Self {
        Self {
            source_len,
            scores: vec![0.0; source_len * source_len],
        }
    }

    /// Set the estimate of `range`.
    pub fn set(&mut self, range: Range, score: f64) -> Result<()> {
        if range.end_pos() >= self.source_len {
            return Err(Error::RangeOutOfBounds {
                range,
                source_len: self.source_len,
            });
        }
        self.scores[range.start_pos() * self.source_len + range.end_pos()] = score;
        Ok(())
    }

    /// Estimate of `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` does not fit the sentence.
    pub fn get(&self, range: Range) -> f64 {
        assert!(
            range.end_pos() < self.source_len,
            "Range {} out of future cost table of length {}",
            range,
            self.source_len
        );
        self.scores[range.start_pos() * self.source_len + range.end_pos()]
    }
}

impl EstimatedScores for FutureCostTable {
    fn calc_estimated_score(&self, bitmap: &Bitmap) -> f64 {
        bitmap.gaps().into_iter().map(|gap| self.get(gap)).sum()
    }

    fn source_len(&self) -> Option<usize> {
        Some(self.source_len)
    }
}
