// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Batched beam search over source coverage.
//!
//! Stacks are decoded in order of words covered. Decoding stack `s`:
//!
//! 1. prunes it to the beam width,
//! 2. extends every survivor by every admissible span and candidate
//!    translation, scoring the stateless features on the spot,
//! 3. sorts the new hypotheses so that shared target context is adjacent,
//! 4. runs each stateful feature once over the whole sorted batch,
//! 5. inserts the batch into the later stacks, recombining as it goes,
//! 6. releases stack `s`.
//!
//! No hypothesis reaches a stack before every stateful feature has scored
//! it. The answer is the best hypothesis of the last stack.

pub mod batch;
pub mod distortion;
pub mod hypothesis;
pub mod stack;
pub mod stacks;

pub use batch::{target_phrase_order, BatchForEval};
pub use distortion::{admit, compute_distortion_distance, Admission};
pub use hypothesis::{Derivation, Hypothesis};
pub use stack::{Stack, StackAdd};
pub use stacks::Stacks;

use crate::context::{DynamicState, SearchContext};
use crate::memory::Recycler;
use crate::state::{Counters, Statistics};
use log::{debug, info, log_enabled, trace, Level};
use rayon::prelude::*;
use std::sync::Arc;

/// The driver of one sentence's search.
pub struct BatchSearch<'a> {
    ctx: SearchContext<'a>,
    state: DynamicState,
    stacks: Stacks,
    batch: BatchForEval,
    statistics: Statistics,
    next_stack: usize,
}

impl<'a> BatchSearch<'a> {
    /// Set up the stacks, with the initial hypothesis in stack 0.
    pub fn new(ctx: SearchContext<'a>) -> Self {
        Self::with_recycler(ctx, Recycler::new())
    }

    /// As [`BatchSearch::new`], reusing hypotheses pooled by a previous
    /// sentence.
    pub fn with_recycler(ctx: SearchContext<'a>, recycler: Recycler<Hypothesis>) -> Self {
        let source_len = ctx.source_len();
        let state = DynamicState::new(source_len, recycler);
        let bitmap = state.initial_bitmap();
        let estimated = ctx.estimated_scores.calc_estimated_score(&bitmap);
        let initial = Hypothesis::initial(bitmap, estimated, ctx.features);

        let mut stacks = Stacks::new(source_len);
        stacks.get_mut(0).add(initial);
        Self {
            ctx,
            state,
            stacks,
            batch: BatchForEval::new(),
            statistics: Statistics::new(),
            next_stack: 0,
        }
    }

    /// Decode every remaining stack, then return the best translation.
    pub fn decode(&mut self) -> Option<&Hypothesis> {
        let last = self.stacks.len() - 1;
        for ind in self.next_stack..last {
            self.decode_stack(ind);
        }
        match self.best_hypothesis() {
            Some(best) => info!(
                "Decoded {} words: score {:.4}; {}",
                self.ctx.source_len(),
                best.total_score(),
                self.statistics
            ),
            None => info!(
                "No translation of {} words found; {}",
                self.ctx.source_len(),
                self.statistics
            ),
        }
        self.best_hypothesis()
    }

    /// Expand stack `ind` into the later stacks and release it.
    ///
    /// # Panics
    ///
    /// Panics unless `ind` is the next undecoded stack. The last stack holds
    /// complete translations and is never expanded.
    pub fn decode_stack(&mut self, ind: usize) {
        assert_eq!(
            ind, self.next_stack,
            "Stacks must be decoded in order: expected {}, got {}",
            self.next_stack, ind
        );
        assert!(
            ind + 1 < self.stacks.len(),
            "Stack {} holds complete translations and cannot be expanded",
            ind
        );
        self.next_stack += 1;

        let survivors = {
            let mut pool = self.state.recycler();
            let before = self.stacks.get(ind).len();
            let survivors = self
                .stacks
                .get_mut(ind)
                .best_hypos_and_prune(self.ctx.config.beam_width, &mut pool);
            let pruned = before - survivors.len();
            self.statistics.add(Counters::Pruned, pruned as u64);
            self.statistics.add(Counters::Recycled, pruned as u64);
            survivors
        };

        let num_survivors = survivors.len();
        let expander = Expander {
            ctx: &self.ctx,
            state: &self.state,
        };
        let config = self.ctx.config;
        let expanded: Vec<(Vec<Hypothesis>, Statistics)> =
            if config.parallel_expansion && survivors.len() >= config.parallel_threshold {
                survivors.par_iter().map(|hypo| expander.expand(hypo)).collect()
            } else {
                survivors.iter().map(|hypo| expander.expand(hypo)).collect()
            };
        for (hypos, stats) in expanded {
            self.statistics.merge(&stats);
            for hypo in hypos {
                self.batch.push(hypo);
            }
        }

        self.batch.sort();
        if log_enabled!(Level::Trace) {
            for hypo in self.batch.iter() {
                trace!(
                    "SORTED: {:?} {}",
                    hypo.target_phrase().map(|tp| tp.words()),
                    hypo.bitmap()
                );
            }
        }

        for (feature, slot) in self.ctx.features.stateful() {
            feature.evaluate_batch(self.batch.as_mut_slice(), slot);
        }

        let batch_len = self.batch.len();
        let num_states = self.ctx.features.num_states();
        let mut recombined = 0;
        {
            let mut pool = self.state.recycler();
            for hypo in self.batch.drain() {
                assert_eq!(
                    hypo.stateful_evaluations(),
                    num_states,
                    "Hypothesis {} was not scored exactly once by every stateful feature",
                    hypo.bitmap()
                );
                let dest = hypo.num_words_covered();
                let added = self.stacks.get_mut(dest).add(hypo);
                if let Some(loser) = added.to_be_recycled {
                    recombined += 1;
                    pool.release(loser);
                }
            }

            // Survivors with no extension left in any stack are free.
            for survivor in survivors {
                if let Ok(hypo) = Arc::try_unwrap(survivor) {
                    pool.release(hypo);
                    self.statistics.increment(Counters::Recycled);
                }
            }
            let deleted = self.stacks.delete(ind, &mut pool);
            self.statistics.add(Counters::Recycled, deleted as u64);
        }
        self.batch.reset();
        self.statistics.add(Counters::Recombined, recombined);
        self.statistics.add(Counters::Recycled, recombined);
        self.statistics.increment(Counters::StacksDecoded);

        debug!(
            "Stack {}: {} survivors, batch of {}, {} recombined; {} bitmaps",
            ind,
            num_survivors,
            batch_len,
            recombined,
            self.state.num_bitmaps()
        );
    }

    /// The best complete translation, if any.
    pub fn best_hypothesis(&self) -> Option<&Hypothesis> {
        self.stacks.back().best_hypos(1).into_iter().next()
    }

    /// Up to `k` complete translations, best first.
    pub fn best_hypotheses(&self, k: usize) -> Vec<&Hypothesis> {
        self.stacks.back().best_hypos(k)
    }

    pub fn stacks(&self) -> &Stacks {
        &self.stacks
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Finish the sentence, keeping the pool for the next one.
    /// The remaining stacks are released and added to [`Counters::Recycled`].
    pub fn into_recycler(mut self) -> Recycler<Hypothesis> {
        let mut released = 0;
        {
            let mut pool = self.state.recycler();
            for ind in 0..self.stacks.len() {
                released += self.stacks.delete(ind, &mut pool);
            }
        }
        self.statistics.add(Counters::Recycled, released as u64);
        debug!("Released {} hypotheses; {}", released, self.statistics);
        self.state.into_recycler()
    }
}

/// Extends one survivor; shared by the expansion workers.
struct Expander<'s, 'a> {
    ctx: &'s SearchContext<'a>,
    state: &'s DynamicState,
}

impl Expander<'_, '_> {
    fn expand(&self, hypo: &Arc<Hypothesis>) -> (Vec<Hypothesis>, Statistics) {
        let mut out = Vec::new();
        let mut stats = Statistics::new();
        let prev_range = hypo.range();
        for path in self.ctx.input_paths.iter() {
            let range = path.range;
            match admit(
                hypo.bitmap(),
                prev_range.as_ref(),
                &range,
                self.ctx.config.max_distortion,
            ) {
                Admission::Accepted => {}
                Admission::Overlap => {
                    stats.increment(Counters::RejectedOverlap);
                    continue;
                }
                Admission::DistortionLimit => {
                    stats.increment(Counters::RejectedDistortion);
                    continue;
                }
                Admission::Lookahead => {
                    stats.increment(Counters::RejectedLookahead);
                    continue;
                }
            }

            let bitmap = self.state.bitmap(hypo.bitmap(), range);
            let estimated = self.ctx.estimated_scores.calc_estimated_score(&bitmap);
            for table in &path.target_phrases {
                let Some(phrases) = table else {
                    stats.increment(Counters::EmptyTranslationTables);
                    continue;
                };
                for target_phrase in phrases.iter() {
                    let reuse = self.state.acquire();
                    if reuse.is_some() {
                        stats.increment(Counters::PoolReused);
                    }
                    let mut new_hypo = Hypothesis::create(
                        reuse,
                        hypo,
                        target_phrase,
                        range,
                        Arc::clone(&bitmap),
                        estimated,
                    );
                    self.ctx.features.evaluate_when_applied_non_batch(&mut new_hypo);
                    stats.increment(Counters::HyposCreated);
                    out.push(new_hypo);
                }
            }
        }
        (out, stats)
    }
}
