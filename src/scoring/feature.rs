// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Feature function traits and the registry that orders them.
//!
//! Two kinds of scoring component take part in the search:
//!
//! - **Stateless** features depend only on the hypothesis being built and
//!   are evaluated eagerly, once, while the hypothesis is initialised.
//! - **Stateful** features depend on context carried along the derivation
//!   (the previous target word, the previous source position, ...). They are
//!   evaluated in batch: one call per feature receives every new hypothesis
//!   of a stack, sorted so that hypotheses sharing context are adjacent.
//!
//! Each stateful feature records a `u64` state signature on the hypotheses it
//! scores. Signatures take part in recombination: two hypotheses with equal
//! coverage are only interchangeable if every stateful feature would score
//! their future identically, which is what an equal signature asserts.

use crate::search::Hypothesis;
use smallvec::SmallVec;
use std::fmt;

/// A feature evaluated once per hypothesis at construction time.
pub trait StatelessFeature: Send + Sync {
    /// Unique name for debugging and score reports.
    fn name(&self) -> &str;

    /// Raw (unweighted) score contribution of the phrase just applied.
    fn evaluate_when_applied(&self, hypo: &Hypothesis) -> f64;
}

/// Where a stateful feature writes its score and its state signature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSlot {
    /// Index into the hypothesis score breakdown.
    pub score_index: usize,
    /// Index into the hypothesis state signatures.
    pub state_index: usize,
    pub weight: f64,
}

/// A feature evaluated over a whole sorted batch of new hypotheses.
pub trait StatefulFeature: Send + Sync {
    /// Unique name for debugging and score reports.
    fn name(&self) -> &str;

    /// State signature of the initial, empty hypothesis.
    fn empty_state(&self) -> u64;

    /// Score every hypothesis of `batch`, exactly once each.
    ///
    /// Implementations read the parent's signature with
    /// [`Hypothesis::prev_state`] and record their result with
    /// [`Hypothesis::apply_stateful`].
    fn evaluate_batch(&self, batch: &mut [Hypothesis], slot: &FeatureSlot);
}

struct StatelessEntry {
    feature: Box<dyn StatelessFeature>,
    score_index: usize,
    weight: f64,
}

struct StatefulEntry {
    feature: Box<dyn StatefulFeature>,
    slot: FeatureSlot,
}

/// Registered features, in the order they were configured.
///
/// Registration assigns every feature a score index; stateful features also
/// get a state index. Stateful features are evaluated in registration order.
#[derive(Default)]
pub struct FeatureFunctions {
    stateless: Vec<StatelessEntry>,
    stateful: Vec<StatefulEntry>,
    names: Vec<String>,
}

impl FeatureFunctions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stateless feature, returning its score index.
    pub fn add_stateless<F: StatelessFeature + 'static>(
        &mut self,
        feature: F,
        weight: f64,
    ) -> usize {
        let score_index = self.names.len();
        self.names.push(feature.name().to_string());
        self.stateless.push(StatelessEntry {
            feature: Box::new(feature),
            score_index,
            weight,
        });
        score_index
    }

    /// Register a stateful feature, returning its slot.
    pub fn add_stateful<F: StatefulFeature + 'static>(
        &mut self,
        feature: F,
        weight: f64,
    ) -> FeatureSlot {
        let slot = FeatureSlot {
            score_index: self.names.len(),
            state_index: self.stateful.len(),
            weight,
        };
        self.names.push(feature.name().to_string());
        self.stateful.push(StatefulEntry {
            feature: Box::new(feature),
            slot,
        });
        slot
    }

    /// Number of score components (stateless plus stateful).
    pub fn num_scores(&self) -> usize {
        self.names.len()
    }

    /// Number of stateful features, and so of state signatures.
    pub fn num_states(&self) -> usize {
        self.stateful.len()
    }

    /// Feature names indexed by score index.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Score index of the feature called `name`.
    pub fn score_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// State signatures of the initial hypothesis.
    pub fn initial_states(&self) -> SmallVec<[u64; 4]> {
        self.stateful
            .iter()
            .map(|entry| entry.feature.empty_state())
            .collect()
    }

    /// Apply every stateless feature to a freshly initialised hypothesis.
    pub fn evaluate_when_applied_non_batch(&self, hypo: &mut Hypothesis) {
        for entry in &self.stateless {
            let value = entry.feature.evaluate_when_applied(hypo);
            hypo.add_score(entry.score_index, entry.weight, value);
        }
    }

    /// Stateful features with their slots, in evaluation order.
    pub fn stateful(&self) -> impl Iterator<Item = (&dyn StatefulFeature, &FeatureSlot)> {
        self.stateful
            .iter()
            .map(|entry| (entry.feature.as_ref(), &entry.slot))
    }
}

impl fmt::Debug for FeatureFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureFunctions")
            .field("names", &self.names)
            .field("num_stateful", &self.stateful.len())
            .finish()
    }
}
