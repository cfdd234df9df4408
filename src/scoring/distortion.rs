// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Distortion (reordering) penalty.

use super::{FeatureSlot, StatefulFeature};
use crate::coverage::Range;
use crate::search::{compute_distortion_distance, Hypothesis};

/// Minus the jump distance between consecutive phrases.
///
/// State signature: one past the end position of the last source span
/// translated, or 0 for the initial hypothesis.
#[derive(Debug, Clone, Copy, Default)]
pub struct Distortion;

impl Distortion {
    fn state_for(range: Option<Range>) -> u64 {
        range.map_or(0, |r| r.end_pos() as u64 + 1)
    }
}

impl StatefulFeature for Distortion {
    fn name(&self) -> &str {
        "Distortion"
    }

    fn empty_state(&self) -> u64 {
        Self::state_for(None)
    }

    fn evaluate_batch(&self, batch: &mut [Hypothesis], slot: &FeatureSlot) {
        for hypo in batch.iter_mut() {
            let Some(range) = hypo.range() else {
                hypo.apply_stateful(slot, 0.0, Self::state_for(None));
                continue;
            };
            let prev = hypo.parent().and_then(|p| p.range());
            let distance = compute_distortion_distance(prev.as_ref(), &range);
            hypo.apply_stateful(slot, -(distance as f64), Self::state_for(Some(range)));
        }
    }
}
