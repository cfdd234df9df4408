// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! What one sentence's search reads and shares.
//!
//! The SearchContext combines two tiers:
//! - MEMO: the immutable inputs of the sentence (spans with candidate
//!   translations, the estimate oracle, the feature set, the configuration)
//! - DYNAMIC: the per-sentence caches touched by every expansion (the
//!   derived-bitmap cache and the hypothesis pool)
//!
//! MEMO data is borrowed and never changes during the search. DYNAMIC data
//! sits behind mutexes so that expansion workers can share it.

pub mod dynamic;

pub use dynamic::DynamicState;

use crate::config::SearchConfig;
use crate::coverage::Range;
use crate::error::{Error, Result};
use crate::input::InputPaths;
use crate::scoring::{EstimatedScores, FeatureFunctions};

/// Immutable inputs of one sentence (MEMO).
#[derive(Clone, Copy)]
pub struct SearchContext<'a> {
    pub input_paths: &'a InputPaths,
    pub estimated_scores: &'a dyn EstimatedScores,
    pub features: &'a FeatureFunctions,
    pub config: &'a SearchConfig,
}

impl<'a> SearchContext<'a> {
    /// Bundle the inputs of a sentence, validating the configuration and
    /// checking that the estimates cover every position.
    pub fn new(
        input_paths: &'a InputPaths,
        estimated_scores: &'a dyn EstimatedScores,
        features: &'a FeatureFunctions,
        config: &'a SearchConfig,
    ) -> Result<Self> {
        config.validate()?;
        let source_len = input_paths.source_len();
        if let Some(estimated_len) = estimated_scores.source_len() {
            if estimated_len < source_len {
                return Err(Error::RangeOutOfBounds {
                    range: Range::new(0, source_len - 1),
                    source_len: estimated_len,
                });
            }
        }
        Ok(Self {
            input_paths,
            estimated_scores,
            features,
            config,
        })
    }

    pub fn source_len(&self) -> usize {
        self.input_paths.source_len()
    }
}

impl std::fmt::Debug for SearchContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchContext")
            .field("source_len", &self.source_len())
            .field("num_paths", &self.input_paths.len())
            .field("features", self.features)
            .field("config", self.config)
            .finish()
    }
}
