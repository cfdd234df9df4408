// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Expansion-eligible source spans and their translations.

use super::{TargetPhrase, TargetPhrases};
use crate::coverage::Range;
use crate::error::{Error, Result};
use std::sync::Arc;

/// A source span with one candidate list per phrase table.
///
/// A `None` entry means that table has nothing for the span.
#[derive(Debug, Clone)]
pub struct InputPath {
    pub range: Range,
    pub target_phrases: Vec<Option<Arc<TargetPhrases>>>,
}

impl InputPath {
    /// Total number of candidate translations over all tables.
    pub fn num_translations(&self) -> usize {
        self.target_phrases
            .iter()
            .flatten()
            .map(|tps| tps.len())
            .sum()
    }
}

/// All spans of one source sentence that the search may translate.
#[derive(Debug, Clone)]
pub struct InputPaths {
    source_len: usize,
    paths: Vec<InputPath>,
}

impl InputPaths {
    /// Create an empty set of paths over a sentence of `source_len` words.
    pub fn new(source_len: usize) -> Result<Self> {
        if source_len == 0 {
            return Err(Error::EmptySource);
        }
        Ok(Self {
            source_len,
            paths: Vec::new(),
        })
    }

    /// Add a span with its per-table candidate lists.
    pub fn add(
        &mut self,
        range: Range,
        target_phrases: Vec<Option<Arc<TargetPhrases>>>,
    ) -> Result<()> {
        if range.end_pos() >= self.source_len {
            return Err(Error::RangeOutOfBounds {
                range,
                source_len: self.source_len,
            });
        }
        self.paths.push(InputPath {
            range,
            target_phrases,
        });
        Ok(())
    }

    /// Add a span whose candidates all come from a single table.
    pub fn add_phrases(
        &mut self,
        range: Range,
        phrases: impl IntoIterator<Item = TargetPhrase>,
    ) -> Result<()> {
        let tps: TargetPhrases = phrases.into_iter().collect();
        self.add(range, vec![Some(Arc::new(tps))])
    }

    pub fn source_len(&self) -> usize {
        self.source_len
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputPath> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
