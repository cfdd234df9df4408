// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Partial translations.

use crate::coverage::{Bitmap, Range};
use crate::input::{TargetPhrase, WordId};
use crate::memory::Recyclable;
use crate::scoring::{FeatureFunctions, FeatureSlot, Scores};
use smallvec::SmallVec;
use std::sync::Arc;

/// A partial translation: the source coverage so far, the phrase just
/// applied, the accumulated scores and a back-pointer to the hypothesis it
/// extends.
///
/// Parents are shared, read-only handles. A hypothesis with no parent is the
/// initial, empty translation of its sentence.
#[derive(Debug)]
pub struct Hypothesis {
    parent: Option<Arc<Hypothesis>>,
    target_phrase: Option<Arc<TargetPhrase>>,
    range: Option<Range>,
    bitmap: Arc<Bitmap>,
    estimated_score: f64,
    scores: Scores,
    ff_states: SmallVec<[u64; 4]>,
    // Stateful features that have scored this hypothesis.
    evaluated: usize,
}

impl Hypothesis {
    /// The empty translation, already scored by every feature.
    pub fn initial(bitmap: Arc<Bitmap>, estimated_score: f64, features: &FeatureFunctions) -> Self {
        Self {
            parent: None,
            target_phrase: None,
            range: None,
            bitmap,
            estimated_score,
            scores: Scores::zeros(features.num_scores()),
            ff_states: features.initial_states(),
            evaluated: features.num_states(),
        }
    }

    /// Extend `parent` by translating `range` as `target_phrase`.
    ///
    /// `reuse` is a pooled instance to overwrite, if the caller has one.
    /// The result carries the parent's scores and state signatures until the
    /// features are applied.
    pub fn create(
        reuse: Option<Hypothesis>,
        parent: &Arc<Hypothesis>,
        target_phrase: &Arc<TargetPhrase>,
        range: Range,
        bitmap: Arc<Bitmap>,
        estimated_score: f64,
    ) -> Self {
        match reuse {
            Some(mut hypo) => {
                hypo.init(parent, target_phrase, range, bitmap, estimated_score);
                hypo
            }
            None => Self {
                parent: Some(Arc::clone(parent)),
                target_phrase: Some(Arc::clone(target_phrase)),
                range: Some(range),
                bitmap,
                estimated_score,
                scores: parent.scores.clone(),
                ff_states: parent.ff_states.clone(),
                evaluated: 0,
            },
        }
    }

    /// Overwrite every field, keeping buffer capacity.
    pub fn init(
        &mut self,
        parent: &Arc<Hypothesis>,
        target_phrase: &Arc<TargetPhrase>,
        range: Range,
        bitmap: Arc<Bitmap>,
        estimated_score: f64,
    ) {
        debug_assert!(
            bitmap.num_words_covered() == parent.num_words_covered() + range.num_words_covered(),
            "Bitmap {} is not {} plus {}",
            bitmap,
            parent.bitmap,
            range
        );
        self.scores.reset_from(&parent.scores);
        self.ff_states.clear();
        self.ff_states.extend_from_slice(&parent.ff_states);
        self.parent = Some(Arc::clone(parent));
        self.target_phrase = Some(Arc::clone(target_phrase));
        self.range = Some(range);
        self.bitmap = bitmap;
        self.estimated_score = estimated_score;
        self.evaluated = 0;
    }

    pub fn parent(&self) -> Option<&Arc<Hypothesis>> {
        self.parent.as_ref()
    }

    /// The phrase applied by this hypothesis; `None` for the initial one.
    pub fn target_phrase(&self) -> Option<&Arc<TargetPhrase>> {
        self.target_phrase.as_ref()
    }

    /// The source span translated by this hypothesis; `None` for the
    /// initial one.
    pub fn range(&self) -> Option<Range> {
        self.range
    }

    pub fn bitmap(&self) -> &Arc<Bitmap> {
        &self.bitmap
    }

    pub fn num_words_covered(&self) -> usize {
        self.bitmap.num_words_covered()
    }

    pub fn estimated_score(&self) -> f64 {
        self.estimated_score
    }

    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    /// Weighted score accumulated along the derivation.
    pub fn total_score(&self) -> f64 {
        self.scores.total()
    }

    /// Accumulated plus estimated remaining score: the ranking key.
    pub fn future_score(&self) -> f64 {
        self.scores.total() + self.estimated_score
    }

    pub fn states(&self) -> &[u64] {
        &self.ff_states
    }

    pub fn state(&self, state_index: usize) -> u64 {
        self.ff_states[state_index]
    }

    /// The state signature this hypothesis was extended from.
    pub fn prev_state(&self, state_index: usize) -> u64 {
        match &self.parent {
            Some(parent) => parent.ff_states[state_index],
            None => self.ff_states[state_index],
        }
    }

    /// Add a stateless feature value.
    pub fn add_score(&mut self, score_index: usize, weight: f64, value: f64) {
        self.scores.plus_equals(score_index, weight, value);
    }

    /// Record a stateful feature's value and new state signature.
    pub fn apply_stateful(&mut self, slot: &FeatureSlot, value: f64, state: u64) {
        self.scores.plus_equals(slot.score_index, slot.weight, value);
        self.ff_states[slot.state_index] = state;
        self.evaluated += 1;
    }

    /// Number of stateful evaluations since initialisation.
    pub fn stateful_evaluations(&self) -> usize {
        self.evaluated
    }

    /// Walk from this hypothesis back to the initial one.
    pub fn derivation(&self) -> Derivation<'_> {
        Derivation { next: Some(self) }
    }

    /// Target words of the whole derivation, in output order.
    pub fn output_words(&self) -> Vec<WordId> {
        let mut phrases: Vec<&TargetPhrase> = self
            .derivation()
            .filter_map(|h| h.target_phrase.as_deref())
            .collect();
        phrases.reverse();
        phrases
            .into_iter()
            .flat_map(|tp| tp.words().iter().copied())
            .collect()
    }
}

impl Recyclable for Hypothesis {
    fn on_release(&mut self) {
        self.parent = None;
        self.target_phrase = None;
    }
}

/// Iterator over a back-pointer chain, newest first.
pub struct Derivation<'a> {
    next: Option<&'a Hypothesis>,
}

impl<'a> Iterator for Derivation<'a> {
    type Item = &'a Hypothesis;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}
