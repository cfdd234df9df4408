// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Accumulated feature scores of a hypothesis.

use smallvec::SmallVec;

/// Weighted total plus the unweighted value of every feature.
///
/// `breakdown[i]` is the running sum of feature `i`'s raw values along the
/// derivation; `total` is the weighted sum over all features.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scores {
    total: f64,
    breakdown: SmallVec<[f64; 8]>,
}

impl Scores {
    /// All-zero scores for `num_scores` features.
    pub fn zeros(num_scores: usize) -> Self {
        Self {
            total: 0.0,
            breakdown: SmallVec::from_elem(0.0, num_scores),
        }
    }

    /// Overwrite with a copy of `other`, reusing this buffer.
    pub fn reset_from(&mut self, other: &Scores) {
        self.total = other.total;
        self.breakdown.clear();
        self.breakdown.extend_from_slice(&other.breakdown);
    }

    /// Add `value` to feature `index`, and `weight * value` to the total.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a registered feature.
    pub fn plus_equals(&mut self, index: usize, weight: f64, value: f64) {
        self.breakdown[index] += value;
        self.total += weight * value;
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Unweighted running value of feature `index`.
    pub fn get(&self, index: usize) -> f64 {
        self.breakdown[index]
    }

    pub fn breakdown(&self) -> &[f64] {
        &self.breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_equals_weights_total_only() {
        let mut scores = Scores::zeros(2);
        scores.plus_equals(0, 0.5, -2.0);
        scores.plus_equals(1, 2.0, 1.0);
        scores.plus_equals(0, 0.5, -2.0);
        assert_eq!(scores.get(0), -4.0);
        assert_eq!(scores.get(1), 1.0);
        assert_eq!(scores.total(), -2.0 + 2.0);
    }

    #[test]
    fn test_reset_from_copies() {
        let mut parent = Scores::zeros(3);
        parent.plus_equals(2, 1.0, 7.0);
        let mut child = Scores::zeros(1);
        child.reset_from(&parent);
        assert_eq!(child, parent);
        child.plus_equals(0, 1.0, 1.0);
        assert_eq!(parent.get(0), 0.0);
    }
}
