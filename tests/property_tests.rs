// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

mod common;

use common::sentence;
use proptest::prelude::*;
use stack_decoder::config::SearchConfig;
use stack_decoder::context::SearchContext;
use stack_decoder::coverage::{Bitmap, Range};
use stack_decoder::input::{TargetPhrase, Vocab, WordId};
use stack_decoder::memory::Recycler;
use stack_decoder::scoring::{
    Distortion, FeatureFunctions, FeatureSlot, StatefulFeature, TranslationModel, ZeroEstimates,
};
use stack_decoder::search::{admit, compute_distortion_distance, Admission, Hypothesis, Stack};
use std::sync::Arc;

fn bitmap_from(len: usize, covered: &[bool]) -> Bitmap {
    let mut bitmap = Bitmap::new(len);
    for (pos, &c) in covered.iter().enumerate().take(len) {
        if c {
            bitmap = bitmap.union(&Range::single(pos));
        }
    }
    bitmap
}

struct Tag;

impl StatefulFeature for Tag {
    fn name(&self) -> &str {
        "Tag"
    }

    fn empty_state(&self) -> u64 {
        0
    }

    fn evaluate_batch(&self, _batch: &mut [Hypothesis], _slot: &FeatureSlot) {}
}

proptest! {
    #[test]
    fn test_bitmap_queries(covered in prop::collection::vec(any::<bool>(), 1..150)) {
        let len = covered.len();
        let bitmap = bitmap_from(len, &covered);

        prop_assert_eq!(bitmap.num_words_covered(), covered.iter().filter(|&&c| c).count());
        prop_assert_eq!(bitmap.first_gap_pos(), covered.iter().position(|&c| !c));
        for start in (0..len).step_by(7) {
            for end in (start..len).step_by(5) {
                let expected = covered[start..=end].iter().any(|&c| c);
                prop_assert_eq!(bitmap.overlap(&Range::new(start, end)), expected);
            }
        }
        for pos in 0..len {
            let expected = (pos + 1..len).find(|&p| covered[p]).map_or(len - 1, |p| p - 1);
            prop_assert_eq!(bitmap.edge_to_the_right_of(pos), expected);
        }
    }

    #[test]
    fn test_union_adds_exactly_the_range(
        mut covered in prop::collection::vec(any::<bool>(), 2..100),
        start in 0..100usize,
        width in 1..10usize,
    ) {
        let len = covered.len();
        let start = start % len;
        let end = (start + width - 1).min(len - 1);
        let range = Range::new(start, end);
        for c in &mut covered[start..=end] {
            *c = false;
        }
        let bitmap = bitmap_from(len, &covered);

        let next = bitmap.union(&range);
        prop_assert!(next.is_superset_of(&bitmap));
        prop_assert_eq!(
            next.num_words_covered(),
            bitmap.num_words_covered() + range.num_words_covered()
        );
        let added: Vec<usize> = next
            .covered_positions()
            .filter(|&p| !bitmap.is_covered(p))
            .collect();
        prop_assert_eq!(added, (start..=end).collect::<Vec<_>>());
    }

    #[test]
    fn test_admission_respects_limit(
        covered in prop::collection::vec(any::<bool>(), 1..20),
        prev_end in 0..20usize,
        start in 0..20usize,
        width in 1..4usize,
        limit in prop::option::of(0..8usize),
    ) {
        let len = covered.len();
        let start = start % len;
        let candidate = Range::new(start, (start + width - 1).min(len - 1));
        let prev = Range::single(prev_end % len);
        let bitmap = bitmap_from(len, &covered);

        let verdict = admit(&bitmap, Some(&prev), &candidate, limit);
        if bitmap.overlap(&candidate) {
            prop_assert_eq!(verdict, Admission::Overlap);
        } else if bitmap.first_gap_pos() == Some(candidate.start_pos()) || limit.is_none() {
            prop_assert_eq!(verdict, Admission::Accepted);
        } else if verdict == Admission::Accepted {
            let limit = limit.unwrap();
            prop_assert!(compute_distortion_distance(Some(&prev), &candidate) <= limit);
        } else {
            let limit = limit.unwrap();
            prop_assert!(
                compute_distortion_distance(Some(&prev), &candidate) > limit
                    || verdict == Admission::Lookahead
            );
        }
    }

    #[test]
    fn test_prune_keeps_the_best(
        scores in prop::collection::vec(-100i32..0, 0..40),
        beam_width in 1..10usize,
    ) {
        let mut features = FeatureFunctions::new();
        let slot = features.add_stateful(Tag, 1.0);
        let root = Arc::new(Hypothesis::initial(Arc::new(Bitmap::new(1)), 0.0, &features));
        let tp = Arc::new(TargetPhrase::new(vec![WordId::new(2)], &[]));
        let range = Range::single(0);
        let bitmap = Arc::new(root.bitmap().union(&range));

        let mut stack = Stack::new();
        for (i, &score) in scores.iter().enumerate() {
            let mut hypo = Hypothesis::create(None, &root, &tp, range, Arc::clone(&bitmap), 0.0);
            // Distinct states, so nothing recombines.
            hypo.apply_stateful(&slot, f64::from(score), i as u64);
            stack.add(hypo);
        }
        let mut pool = Recycler::new();
        let pruned_count = stack.prune(beam_width, &mut pool);

        prop_assert!(stack.len() <= beam_width);
        prop_assert_eq!(stack.len() + pool.len(), scores.len());
        prop_assert_eq!(pruned_count, pool.len());
        let worst_kept = stack.iter().map(|h| h.future_score()).fold(f64::INFINITY, f64::min);
        while let Some(pruned) = pool.acquire() {
            prop_assert!(pruned.future_score() <= worst_kept);
        }
    }

    #[test]
    fn test_decoded_derivations_are_consistent(
        source_len in 1..6usize,
        limit in prop::option::of(0..4usize),
        beam_width in 1..8usize,
        scores in prop::collection::vec(-5.0f64..0.0, 12),
    ) {
        let mut vocab = Vocab::new();
        let words = ["a", "b", "c", "d", "e", "f"];
        let single: Vec<[(&str, f64); 2]> = (0..source_len)
            .map(|i| [(words[i], scores[2 * i]), (words[(i + 1) % 6], scores[2 * i + 1])])
            .collect();
        let mut spans: Vec<(usize, usize, &[(&str, f64)])> = Vec::new();
        for (i, translations) in single.iter().enumerate() {
            spans.push((i, i, translations.as_slice()));
        }
        let pair = [("ab", -1.0)];
        if source_len > 1 {
            spans.push((0, 1, &pair[..]));
        }
        let paths = sentence(&mut vocab, source_len, &spans);

        let mut features = FeatureFunctions::new();
        features.add_stateless(TranslationModel::new(0), 1.0);
        features.add_stateful(Distortion, 0.5);
        let config = SearchConfig {
            max_distortion: limit,
            ..SearchConfig::unlimited_reordering(beam_width)
        };
        let ctx = SearchContext::new(&paths, &ZeroEstimates, &features, &config).unwrap();
        let mut search = stack_decoder::search::BatchSearch::new(ctx);

        // Every position has a single-word translation, so monotone
        // decoding always succeeds.
        let best = search.decode();
        prop_assert!(best.is_some());
        for hypo in search.best_hypotheses(usize::MAX) {
            prop_assert!(hypo.bitmap().is_complete());
            for step in hypo.derivation() {
                let Some(parent) = step.parent() else {
                    prop_assert_eq!(step.num_words_covered(), 0);
                    continue;
                };
                let range = step.range().unwrap();
                prop_assert!(!parent.bitmap().overlap(&range));
                prop_assert_eq!(&**step.bitmap(), &parent.bitmap().union(&range));
                let at_gap = parent.bitmap().first_gap_pos() == Some(range.start_pos());
                if let (Some(limit), false) = (limit, at_gap) {
                    let prev = parent.range();
                    prop_assert!(compute_distortion_distance(prev.as_ref(), &range) <= limit);
                }
            }
        }
    }
}
