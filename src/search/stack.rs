// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! One beam of hypotheses with recombination and pruning.

use super::Hypothesis;
use crate::coverage::Bitmap;
use crate::memory::Recycler;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::collections::hash_map::Entry;
use std::sync::Arc;

/// Everything that decides how a hypothesis can be continued.
///
/// Two hypotheses with equal keys have the same future: they cover the same
/// positions, they sit at the same source position for the next jump, and
/// every stateful feature will score their extensions identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RecombinationKey {
    bitmap: Arc<Bitmap>,
    prev_end: Option<usize>,
    states: SmallVec<[u64; 4]>,
}

impl RecombinationKey {
    fn of(hypo: &Hypothesis) -> Self {
        Self {
            bitmap: Arc::clone(hypo.bitmap()),
            prev_end: hypo.range().map(|r| r.end_pos()),
            states: SmallVec::from_slice(hypo.states()),
        }
    }
}

/// Result of [`Stack::add`].
#[derive(Debug)]
pub struct StackAdd {
    /// Whether the candidate is now in the stack.
    pub added: bool,
    /// The loser of a recombination: either the candidate itself or the
    /// incumbent it replaced.
    pub to_be_recycled: Option<Hypothesis>,
}

/// Hypotheses covering the same number of source words.
#[derive(Debug, Default)]
pub struct Stack {
    hypos: Vec<Hypothesis>,
    index: FxHashMap<RecombinationKey, usize>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hypos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hypos.is_empty()
    }

    /// Hypotheses in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Hypothesis> {
        self.hypos.iter()
    }

    /// Insert `hypo`, recombining with an equivalent incumbent.
    ///
    /// Of two equivalent hypotheses the one with the higher total score is
    /// kept. On a tie the incumbent stays.
    pub fn add(&mut self, hypo: Hypothesis) -> StackAdd {
        match self.index.entry(RecombinationKey::of(&hypo)) {
            Entry::Vacant(entry) => {
                entry.insert(self.hypos.len());
                self.hypos.push(hypo);
                StackAdd {
                    added: true,
                    to_be_recycled: None,
                }
            }
            Entry::Occupied(entry) => {
                let incumbent = &mut self.hypos[*entry.get()];
                if hypo.total_score() > incumbent.total_score() {
                    let loser = std::mem::replace(incumbent, hypo);
                    StackAdd {
                        added: true,
                        to_be_recycled: Some(loser),
                    }
                } else {
                    StackAdd {
                        added: false,
                        to_be_recycled: Some(hypo),
                    }
                }
            }
        }
    }

    /// The `k` best hypotheses by future score, best first.
    ///
    /// Equal scores keep insertion order.
    pub fn best_hypos(&self, k: usize) -> Vec<&Hypothesis> {
        let mut ranked: Vec<&Hypothesis> = self.hypos.iter().collect();
        ranked.sort_by(|a, b| b.future_score().total_cmp(&a.future_score()));
        ranked.truncate(k);
        ranked
    }

    /// Keep the `beam_width` best hypotheses, releasing the rest to `pool`.
    ///
    /// Afterwards the stack holds its survivors best first. Returns the
    /// number of hypotheses pruned.
    pub fn prune(&mut self, beam_width: usize, pool: &mut Recycler<Hypothesis>) -> usize {
        self.hypos
            .sort_by(|a, b| b.future_score().total_cmp(&a.future_score()));
        let keep = beam_width.min(self.hypos.len());
        let pruned = self.hypos.len() - keep;
        for hypo in self.hypos.drain(keep..) {
            pool.release(hypo);
        }
        self.reindex();
        pruned
    }

    /// Prune, then hand the survivors over for expansion, best first.
    ///
    /// The stack is left empty. Survivors become shared so that their
    /// extensions can point back at them.
    pub fn best_hypos_and_prune(
        &mut self,
        beam_width: usize,
        pool: &mut Recycler<Hypothesis>,
    ) -> Vec<Arc<Hypothesis>> {
        self.prune(beam_width, pool);
        self.index.clear();
        self.hypos.drain(..).map(Arc::new).collect()
    }

    /// Release every remaining hypothesis to `pool`, returning how many.
    pub fn clear(&mut self, pool: &mut Recycler<Hypothesis>) -> usize {
        self.index.clear();
        let released = self.hypos.len();
        for hypo in self.hypos.drain(..) {
            pool.release(hypo);
        }
        released
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (i, hypo) in self.hypos.iter().enumerate() {
            self.index.insert(RecombinationKey::of(hypo), i);
        }
    }
}
