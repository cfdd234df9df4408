// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Scoring of hypotheses.
//!
//! - Scores: weighted total plus per-feature breakdown
//! - StatelessFeature / StatefulFeature / FeatureFunctions: the feature set
//! - EstimatedScores: remaining-cost estimates keyed by coverage
//! - WordPenalty, PhrasePenalty, TranslationModel, Distortion,
//!   BigramLanguageModel: stock features

pub mod distortion;
pub mod estimated;
pub mod feature;
pub mod lm;
pub mod scores;
pub mod stateless;

pub use distortion::Distortion;
pub use estimated::{EstimatedScores, FutureCostTable, ZeroEstimates};
pub use feature::{FeatureFunctions, FeatureSlot, StatefulFeature, StatelessFeature};
pub use lm::BigramLanguageModel;
pub use scores::Scores;
pub use stateless::{PhrasePenalty, TranslationModel, WordPenalty};
