// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bitmap type for representing source coverage as a bitset.
//!
//! A Bitmap records which source positions a hypothesis has translated,
//! where bit i is set if position i is covered. Sentences can be longer than
//! one machine word, so the bits live in a run of u64 words, kept inline for
//! sentences up to 128 words.
//!
//! Bitmaps are values: a successor is derived with [`Bitmap::union`], the
//! receiver never changes.
//!
//! # Examples
//!
//! ```
//! use stack_decoder::coverage::{Bitmap, Range};
//!
//! let empty = Bitmap::new(5);
//! let bitmap = empty.union(&Range::new(1, 2));
//!
//! assert_eq!(bitmap.num_words_covered(), 2);
//! assert_eq!(bitmap.first_gap_pos(), Some(0));
//! assert!(bitmap.overlap(&Range::new(2, 4)));
//! assert_eq!(format!("{}", bitmap), "01100");
//! ```

use super::Range;
use smallvec::SmallVec;
use std::fmt;

const WORD_BITS: usize = 64;

/// Coverage of a source sentence of fixed length.
///
/// Bits at or beyond `len` are always zero, so derived equality and hashing
/// compare coverage only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bitmap {
    words: SmallVec<[u64; 2]>,
    len: usize,
    covered: usize,
}

impl Bitmap {
    /// Create an empty bitmap over a source of `len` positions.
    pub fn new(len: usize) -> Self {
        let nwords = len.div_ceil(WORD_BITS);
        Self {
            words: SmallVec::from_elem(0, nwords),
            len,
            covered: 0,
        }
    }

    /// Length of the source sentence this bitmap covers.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the source sentence has no positions at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn num_words_covered(&self) -> usize {
        self.covered
    }

    /// True if every source position is covered.
    pub fn is_complete(&self) -> bool {
        self.covered == self.len
    }

    /// Check if a specific position is covered.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len`.
    pub fn is_covered(&self, pos: usize) -> bool {
        assert!(
            pos < self.len,
            "Position out of range: {} >= {}",
            pos,
            self.len
        );
        (self.words[pos / WORD_BITS] >> (pos % WORD_BITS)) & 1 != 0
    }

    /// True if any position of `range` is already covered.
    ///
    /// # Panics
    ///
    /// Panics if the range extends past the end of the sentence.
    pub fn overlap(&self, range: &Range) -> bool {
        self.check_range(range);
        let first = range.start_pos() / WORD_BITS;
        let last = range.end_pos() / WORD_BITS;
        (first..=last).any(|w| self.words[w] & word_mask(w, range) != 0)
    }

    /// Smallest uncovered position, or `None` if the bitmap is complete.
    pub fn first_gap_pos(&self) -> Option<usize> {
        self.next_uncovered_from(0)
    }

    /// Last position of the uncovered run that starts right after `pos`.
    ///
    /// Returns the position just before the next covered position to the
    /// right of `pos`, or the final position of the sentence if nothing to
    /// the right is covered. When `pos + 1` is itself covered the result is
    /// `pos`.
    pub fn edge_to_the_right_of(&self, pos: usize) -> usize {
        match self.next_covered_after(pos) {
            Some(covered) => covered - 1,
            None => self.len.saturating_sub(1).max(pos),
        }
    }

    /// Derive the bitmap that also covers `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` overlaps existing coverage. Callers must gate
    /// expansions with [`Bitmap::overlap`] first.
    pub fn union(&self, range: &Range) -> Bitmap {
        assert!(
            !self.overlap(range),
            "Cannot cover {} twice in bitmap {}",
            range,
            self
        );
        let mut next = self.clone();
        let first = range.start_pos() / WORD_BITS;
        let last = range.end_pos() / WORD_BITS;
        for w in first..=last {
            next.words[w] |= word_mask(w, range);
        }
        next.covered += range.num_words_covered();
        next
    }

    /// True if every position covered by `other` is covered here too.
    pub fn is_superset_of(&self, other: &Bitmap) -> bool {
        self.len == other.len
            && self
                .words
                .iter()
                .zip(other.words.iter())
                .all(|(mine, theirs)| theirs & !mine == 0)
    }

    /// Maximal runs of uncovered positions, left to right.
    pub fn gaps(&self) -> Vec<Range> {
        let mut gaps = Vec::new();
        let mut pos = 0;
        while let Some(start) = self.next_uncovered_from(pos) {
            let end = self.edge_to_the_right_of(start);
            gaps.push(Range::new(start, end));
            pos = end + 1;
        }
        gaps
    }

    /// Iterate over covered positions in ascending order.
    pub fn covered_positions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(move |&pos| self.is_covered(pos))
    }

    fn next_uncovered_from(&self, pos: usize) -> Option<usize> {
        if pos >= self.len {
            return None;
        }
        let mut w = pos / WORD_BITS;
        let mut bits = !self.words[w] & (u64::MAX << (pos % WORD_BITS));
        loop {
            if bits != 0 {
                let found = w * WORD_BITS + bits.trailing_zeros() as usize;
                return (found < self.len).then_some(found);
            }
            w += 1;
            if w >= self.words.len() {
                return None;
            }
            bits = !self.words[w];
        }
    }

    fn next_covered_after(&self, pos: usize) -> Option<usize> {
        let start = pos + 1;
        if start >= self.len {
            return None;
        }
        let mut w = start / WORD_BITS;
        let mut bits = self.words[w] & (u64::MAX << (start % WORD_BITS));
        loop {
            if bits != 0 {
                return Some(w * WORD_BITS + bits.trailing_zeros() as usize);
            }
            w += 1;
            if w >= self.words.len() {
                return None;
            }
            bits = self.words[w];
        }
    }

    fn check_range(&self, range: &Range) {
        assert!(
            range.end_pos() < self.len,
            "Range {} out of bitmap of length {}",
            range,
            self.len
        );
    }
}

/// Bits of word `w` that fall inside `range`.
fn word_mask(w: usize, range: &Range) -> u64 {
    let base = w * WORD_BITS;
    let lo = range.start_pos().max(base) - base;
    let hi = range.end_pos().min(base + WORD_BITS - 1) - base;
    let width = hi - lo + 1;
    if width == WORD_BITS {
        u64::MAX
    } else {
        ((1u64 << width) - 1) << lo
    }
}

impl fmt::Display for Bitmap {
    /// Format a bitmap as one digit per position, e.g. "0110".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pos in 0..self.len {
            write!(f, "{}", if self.is_covered(pos) { '1' } else { '0' })?;
        }
        Ok(())
    }
}
