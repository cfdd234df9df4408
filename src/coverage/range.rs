// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Inclusive spans of source positions.

use crate::error::{Error, Result};
use std::fmt;

/// An inclusive span `[start, end]` of source positions.
///
/// A `Range` always covers at least one word. The empty range of the initial
/// hypothesis is modelled as `Option<Range>::None` by its users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Range {
    start: usize,
    end: usize,
}

impl Range {
    /// Create a range covering `start..=end`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`. Use [`Range::try_new`] for unchecked input.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(
            start <= end,
            "Invalid range: start {} is after end {}",
            start,
            end
        );
        Self { start, end }
    }

    /// Create a range, reporting `start > end` as an error.
    pub fn try_new(start: usize, end: usize) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering the single position `pos`.
    pub const fn single(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn start_pos(&self) -> usize {
        self.start
    }

    pub fn end_pos(&self) -> usize {
        self.end
    }

    /// Number of source words in the span.
    pub fn num_words_covered(&self) -> usize {
        self.end - self.start + 1
    }

    /// True if the two spans share at least one position.
    pub fn overlaps(&self, other: &Range) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for Range {
    /// Format a range as "[start..end]".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}]", self.start, self.end)
    }
}
