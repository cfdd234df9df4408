// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use stack_decoder::coverage::Range;
use stack_decoder::input::{InputPaths, TargetPhrase, Vocab, WordId};
use stack_decoder::scoring::{FeatureSlot, StatefulFeature};
use stack_decoder::search::Hypothesis;
use std::sync::{Arc, Mutex};

/// Build a sentence of `source_len` positions from `(start, end, translations)`
/// entries, each translation a space-separated target text with one
/// translation-model score.
pub fn sentence(
    vocab: &mut Vocab,
    source_len: usize,
    spans: &[(usize, usize, &[(&str, f64)])],
) -> InputPaths {
    let mut paths = InputPaths::new(source_len).unwrap();
    for (start, end, translations) in spans {
        let phrases: Vec<TargetPhrase> = translations
            .iter()
            .map(|(text, score)| TargetPhrase::from_text(vocab, text, &[*score]))
            .collect();
        paths.add_phrases(Range::new(*start, *end), phrases).unwrap();
    }
    paths
}

/// Target words of `hypo`'s derivation as text.
pub fn output(vocab: &Vocab, hypo: &Hypothesis) -> String {
    vocab.render(&hypo.output_words())
}

/// Source spans of `hypo`'s derivation, in the order they were translated.
pub fn source_order(hypo: &Hypothesis) -> Vec<Range> {
    let mut ranges: Vec<Range> = hypo.derivation().filter_map(|h| h.range()).collect();
    ranges.reverse();
    ranges
}

/// What a [`RecordingFeature`] saw of one batch member.
#[derive(Debug, Clone, PartialEq)]
pub struct Seen {
    pub range: Range,
    pub words: Vec<WordId>,
    pub parent_first_gap: Option<usize>,
    pub parent_covered: Vec<usize>,
    pub covered: Vec<usize>,
}

/// A stateful feature that scores nothing and records every batch it is
/// given, in the order given.
#[derive(Debug, Default, Clone)]
pub struct RecordingFeature {
    pub batches: Arc<Mutex<Vec<Vec<Seen>>>>,
}

impl RecordingFeature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> Vec<Vec<Seen>> {
        self.batches.lock().unwrap().clone()
    }
}

impl StatefulFeature for RecordingFeature {
    fn name(&self) -> &str {
        "Recording"
    }

    fn empty_state(&self) -> u64 {
        0
    }

    fn evaluate_batch(&self, batch: &mut [Hypothesis], slot: &FeatureSlot) {
        let seen = batch
            .iter()
            .map(|h| {
                let parent = h.parent().unwrap();
                Seen {
                    range: h.range().unwrap(),
                    words: h.target_phrase().unwrap().words().to_vec(),
                    parent_first_gap: parent.bitmap().first_gap_pos(),
                    parent_covered: parent.bitmap().covered_positions().collect(),
                    covered: h.bitmap().covered_positions().collect(),
                }
            })
            .collect();
        self.batches.lock().unwrap().push(seen);
        for hypo in batch.iter_mut() {
            hypo.apply_stateful(slot, 0.0, 0);
        }
    }
}
