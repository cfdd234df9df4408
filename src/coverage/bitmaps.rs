// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Per-sentence cache of derived bitmaps.
//!
//! Many hypotheses share a coverage. The cache hands out one shared
//! `Arc<Bitmap>` per distinct coverage and memoises `prev ∪ range` so the
//! union is computed once per (bitmap, span) pair.

use super::{Bitmap, Range};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Interned bitmaps for one source sentence.
#[derive(Debug)]
pub struct Bitmaps {
    initial: Arc<Bitmap>,
    interned: FxHashMap<Bitmap, Arc<Bitmap>>,
    successors: FxHashMap<(Arc<Bitmap>, Range), Arc<Bitmap>>,
}

impl Bitmaps {
    /// Create a cache for a source sentence of `source_len` positions.
    pub fn new(source_len: usize) -> Self {
        let initial = Arc::new(Bitmap::new(source_len));
        let mut interned = FxHashMap::default();
        interned.insert((*initial).clone(), Arc::clone(&initial));
        Self {
            initial,
            interned,
            successors: FxHashMap::default(),
        }
    }

    /// The empty coverage of the initial hypothesis.
    pub fn initial(&self) -> Arc<Bitmap> {
        Arc::clone(&self.initial)
    }

    /// The bitmap covering `prev` plus `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` overlaps `prev`.
    pub fn get(&mut self, prev: &Arc<Bitmap>, range: Range) -> Arc<Bitmap> {
        let key = (Arc::clone(prev), range);
        if let Some(next) = self.successors.get(&key) {
            return Arc::clone(next);
        }

        let next = prev.union(&range);
        let next = match self.interned.get(&next) {
            Some(existing) => Arc::clone(existing),
            None => {
                let shared = Arc::new(next.clone());
                self.interned.insert(next, Arc::clone(&shared));
                shared
            }
        };
        self.successors.insert(key, Arc::clone(&next));
        next
    }

    /// Number of distinct coverages seen so far.
    pub fn len(&self) -> usize {
        self.interned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interned.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_is_empty() {
        let bitmaps = Bitmaps::new(4);
        assert_eq!(bitmaps.initial().num_words_covered(), 0);
        assert_eq!(bitmaps.len(), 1);
    }

    #[test]
    fn test_successor_is_memoised() {
        let mut bitmaps = Bitmaps::new(4);
        let initial = bitmaps.initial();
        let a = bitmaps.get(&initial, Range::new(0, 1));
        let b = bitmaps.get(&initial, Range::new(0, 1));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(format!("{}", a), "1100");
    }

    #[test]
    fn test_equal_coverage_is_shared() {
        let mut bitmaps = Bitmaps::new(4);
        let initial = bitmaps.initial();

        let left = bitmaps.get(&initial, Range::single(0));
        let left_then_right = bitmaps.get(&left, Range::single(1));

        let right = bitmaps.get(&initial, Range::single(1));
        let right_then_left = bitmaps.get(&right, Range::single(0));

        assert!(Arc::ptr_eq(&left_then_right, &right_then_left));
        assert_eq!(bitmaps.len(), 4);
    }

    #[test]
    #[should_panic(expected = "Cannot cover")]
    fn test_overlap_is_fatal() {
        let mut bitmaps = Bitmaps::new(3);
        let initial = bitmaps.initial();
        let covered = bitmaps.get(&initial, Range::new(0, 1));
        let _ = bitmaps.get(&covered, Range::new(1, 2));
    }
}
