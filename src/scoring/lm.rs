// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! A bigram language model scored over sorted batches.

use super::{FeatureSlot, StatefulFeature};
use crate::input::WordId;
use crate::search::Hypothesis;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Log-probability bigram model over target word ids.
///
/// State signature: the id of the last target word produced, starting from
/// `<s>`. A bigram missing from the table falls back to the unigram
/// log-probability of the word plus the backoff weight of its context;
/// words with no unigram entry score `unknown_log_prob`.
///
/// Batches arrive sorted by target phrase and parent state, so identical
/// (context, phrase) pairs are adjacent. The model scores such a run once
/// and copies the result to the rest of it.
#[derive(Debug)]
pub struct BigramLanguageModel {
    bigrams: FxHashMap<(WordId, WordId), f64>,
    unigrams: FxHashMap<WordId, f64>,
    backoffs: FxHashMap<WordId, f64>,
    unknown_log_prob: f64,
    cache_hits: AtomicU64,
}

impl BigramLanguageModel {
    pub fn new(unknown_log_prob: f64) -> Self {
        Self {
            bigrams: FxHashMap::default(),
            unigrams: FxHashMap::default(),
            backoffs: FxHashMap::default(),
            unknown_log_prob,
            cache_hits: AtomicU64::new(0),
        }
    }

    pub fn with_bigram(mut self, prev: WordId, word: WordId, log_prob: f64) -> Self {
        self.bigrams.insert((prev, word), log_prob);
        self
    }

    pub fn with_unigram(mut self, word: WordId, log_prob: f64) -> Self {
        self.unigrams.insert(word, log_prob);
        self
    }

    pub fn with_backoff(mut self, context: WordId, weight: f64) -> Self {
        self.backoffs.insert(context, weight);
        self
    }

    /// Log-probability of `word` following `prev`.
    pub fn log_prob(&self, prev: WordId, word: WordId) -> f64 {
        if let Some(lp) = self.bigrams.get(&(prev, word)) {
            return *lp;
        }
        match self.unigrams.get(&word) {
            Some(lp) => lp + self.backoffs.get(&prev).copied().unwrap_or(0.0),
            None => self.unknown_log_prob,
        }
    }

    /// Score of producing `words` after `context`, and the new context.
    pub fn score_words(&self, context: WordId, words: &[WordId], complete: bool) -> (f64, WordId) {
        let mut prev = context;
        let mut total = 0.0;
        for &word in words {
            total += self.log_prob(prev, word);
            prev = word;
        }
        if complete {
            total += self.log_prob(prev, WordId::SENTENCE_END);
        }
        (total, prev)
    }

    /// Number of batch members whose score was copied from their neighbour.
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }
}

fn to_state(word: WordId) -> u64 {
    u64::from(word.value())
}

fn from_state(state: u64) -> WordId {
    // States are only ever produced by to_state.
    WordId::new(state as u32)
}

impl StatefulFeature for BigramLanguageModel {
    fn name(&self) -> &str {
        "BigramLanguageModel"
    }

    fn empty_state(&self) -> u64 {
        to_state(WordId::SENTENCE_START)
    }

    fn evaluate_batch(&self, batch: &mut [Hypothesis], slot: &FeatureSlot) {
        let mut previous: Option<(u64, bool, usize, f64, WordId)> = None;
        for i in 0..batch.len() {
            let context = batch[i].prev_state(slot.state_index);
            let complete = batch[i].bitmap().is_complete();
            let Some(phrase) = batch[i].target_phrase().cloned() else {
                batch[i].apply_stateful(slot, 0.0, context);
                continue;
            };

            let reuse = match previous {
                Some((ctx, done, j, score, last))
                    if ctx == context
                        && done == complete
                        && batch[j]
                            .target_phrase()
                            .is_some_and(|p| p.words() == phrase.words()) =>
                {
                    Some((score, last))
                }
                _ => None,
            };
            let (score, last) = match reuse {
                Some(hit) => {
                    self.cache_hits.fetch_add(1, Ordering::Relaxed);
                    hit
                }
                None => self.score_words(from_state(context), phrase.words(), complete),
            };
            batch[i].apply_stateful(slot, score, to_state(last));
            previous = Some((context, complete, i, score, last));
        }
    }
}
