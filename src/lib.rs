// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Batched beam search for phrase-based statistical decoding.
//!
//! Given a source sentence whose spans have been paired with candidate
//! translations, the search builds partial translations (hypotheses) left to
//! right in the target and in any order in the source, within a reordering
//! limit, and returns the best complete one.
//!
//! # Architecture
//!
//! ## Tier 1: MEMO Data (Immutable)
//!
//! Borrowed for the whole sentence:
//! - [`input::InputPaths`] - source spans with their candidate translations
//! - [`scoring::EstimatedScores`] - remaining-score estimate per coverage
//! - [`scoring::FeatureFunctions`] - the weighted feature set
//! - [`config::SearchConfig`] - beam width and reordering limit
//!
//! ## Tier 2: DYNAMIC Data (Mutable)
//!
//! Owned by the driver for one sentence:
//! - one [`search::Stack`] per number of covered source words
//! - the batch of new hypotheses awaiting stateful scoring
//! - the shared bitmap cache and the hypothesis [`memory::Recycler`]
//!
//! # Search Algorithm
//!
//! Stacks are decoded in increasing order of coverage. Each stack is pruned
//! to the beam width; its survivors are extended by every admissible span;
//! the extensions are sorted, scored in one batch per stateful feature and
//! only then inserted, with recombination, into later stacks.
//!
//! # Parallelization
//!
//! Stacks depend on each other and run in order. Inside a stack the
//! survivors can be extended on the rayon pool
//! ([`config::SearchConfig::parallel_expansion`]).

pub mod config;
pub mod context;
pub mod coverage;
pub mod error;
pub mod input;
pub mod logging;
pub mod memory;
pub mod scoring;
pub mod search;
pub mod state;

// Re-export commonly used types
pub use config::SearchConfig;
pub use context::SearchContext;
pub use coverage::{Bitmap, Range};
pub use error::{Error, Result};
pub use input::{InputPaths, TargetPhrase, TargetPhrases, Vocab, WordId};
pub use scoring::{EstimatedScores, FeatureFunctions, StatefulFeature, StatelessFeature};
pub use search::{BatchSearch, Hypothesis};
pub use state::{Counters, Statistics};
