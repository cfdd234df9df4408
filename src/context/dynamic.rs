// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Shared mutable state of one sentence's search (DYNAMIC).

use crate::coverage::{Bitmap, Bitmaps, Range};
use crate::memory::{self, Recycler};
use crate::search::Hypothesis;
use std::sync::{Arc, Mutex};

/// Caches and pools used by every expansion of a sentence.
///
/// Each lock is held for a single lookup or pool operation only.
#[derive(Debug)]
pub struct DynamicState {
    bitmaps: Mutex<Bitmaps>,
    recycler: Mutex<Recycler<Hypothesis>>,
}

impl DynamicState {
    pub fn new(source_len: usize, recycler: Recycler<Hypothesis>) -> Self {
        Self {
            bitmaps: Mutex::new(Bitmaps::new(source_len)),
            recycler: Mutex::new(recycler),
        }
    }

    /// The shared empty coverage.
    pub fn initial_bitmap(&self) -> Arc<Bitmap> {
        memory::lock(&self.bitmaps).initial()
    }

    /// The shared coverage `prev ∪ range`.
    pub fn bitmap(&self, prev: &Arc<Bitmap>, range: Range) -> Arc<Bitmap> {
        memory::lock(&self.bitmaps).get(prev, range)
    }

    /// Number of distinct coverages derived so far.
    pub fn num_bitmaps(&self) -> usize {
        memory::lock(&self.bitmaps).len()
    }

    /// A pooled hypothesis to reinitialise, if any.
    pub fn acquire(&self) -> Option<Hypothesis> {
        memory::lock(&self.recycler).acquire()
    }

    /// Exclusive access to the pool for a run of releases.
    pub fn recycler(&self) -> std::sync::MutexGuard<'_, Recycler<Hypothesis>> {
        memory::lock(&self.recycler)
    }

    pub fn into_recycler(self) -> Recycler<Hypothesis> {
        self.recycler
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
