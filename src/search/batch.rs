// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pending hypotheses of one stack, awaiting stateful evaluation.

use super::Hypothesis;
use crate::input::WordId;
use std::cmp::Ordering;

/// Order that puts hypotheses sharing target context next to each other.
///
/// Compares the words of the applied target phrase, then the state
/// signatures of the parent. Hypotheses equal under both are left in the
/// order they were pushed.
pub fn target_phrase_order(a: &Hypothesis, b: &Hypothesis) -> Ordering {
    words(a)
        .cmp(&words(b))
        .then_with(|| context(a).cmp(&context(b)))
}

fn words(hypo: &Hypothesis) -> Option<&[WordId]> {
    hypo.target_phrase().map(|tp| tp.words())
}

fn context(hypo: &Hypothesis) -> Option<&[u64]> {
    hypo.parent().map(|p| p.states())
}

/// The batch buffer owned by the driver, cleared after every stack.
#[derive(Debug, Default)]
pub struct BatchForEval {
    hypos: Vec<Hypothesis>,
}

impl BatchForEval {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hypo: Hypothesis) {
        self.hypos.push(hypo);
    }

    pub fn len(&self) -> usize {
        self.hypos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hypos.is_empty()
    }

    /// Stable sort by [`target_phrase_order`].
    pub fn sort(&mut self) {
        self.hypos.sort_by(target_phrase_order);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hypothesis> {
        self.hypos.iter()
    }

    pub fn as_mut_slice(&mut self) -> &mut [Hypothesis] {
        &mut self.hypos
    }

    /// Move every hypothesis out, in batch order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, Hypothesis> {
        self.hypos.drain(..)
    }

    /// Empty the buffer, keeping its capacity.
    pub fn reset(&mut self) {
        self.hypos.clear();
    }
}
