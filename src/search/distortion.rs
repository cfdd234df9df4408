// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Reordering constraints on expansions.

use crate::coverage::{Bitmap, Range};

/// Jump distance from the span translated last to `current`.
///
/// Zero when `current` starts right after `prev`. With no previous span the
/// distance is measured from the start of the sentence.
pub fn compute_distortion_distance(prev: Option<&Range>, current: &Range) -> usize {
    match prev {
        None => current.start_pos(),
        Some(prev) => {
            (prev.end_pos() as i64 - current.start_pos() as i64 + 1).unsigned_abs() as usize
        }
    }
}

/// Outcome of testing a candidate span against a hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    /// The span overlaps existing coverage.
    Overlap,
    /// The jump from the previous span exceeds the limit.
    DistortionLimit,
    /// Returning from the span to the leftmost gap would exceed the limit.
    Lookahead,
}

/// Decide whether translating `candidate` next is allowed.
///
/// A span starting at the leftmost gap is never rejected for distance.
/// `max_distortion` of `None` allows unlimited reordering.
pub fn admit(
    bitmap: &Bitmap,
    prev: Option<&Range>,
    candidate: &Range,
    max_distortion: Option<usize>,
) -> Admission {
    if bitmap.overlap(candidate) {
        return Admission::Overlap;
    }
    let Some(limit) = max_distortion else {
        return Admission::Accepted;
    };
    // Non-overlapping, so some position is still uncovered.
    let first_gap = bitmap.first_gap_pos().unwrap_or(candidate.start_pos());
    if first_gap == candidate.start_pos() {
        return Admission::Accepted;
    }
    if compute_distortion_distance(prev, candidate) > limit {
        return Admission::DistortionLimit;
    }
    let back_to_gap = Range::single(first_gap);
    if compute_distortion_distance(Some(candidate), &back_to_gap) > limit {
        return Admission::Lookahead;
    }
    Admission::Accepted
}
