// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Features that only look at the phrase just applied.

use super::StatelessFeature;
use crate::search::Hypothesis;

/// Minus one per target word produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordPenalty;

impl StatelessFeature for WordPenalty {
    fn name(&self) -> &str {
        "WordPenalty"
    }

    fn evaluate_when_applied(&self, hypo: &Hypothesis) -> f64 {
        hypo.target_phrase().map_or(0.0, |tp| -(tp.len() as f64))
    }
}

/// One per phrase applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhrasePenalty;

impl StatelessFeature for PhrasePenalty {
    fn name(&self) -> &str {
        "PhrasePenalty"
    }

    fn evaluate_when_applied(&self, hypo: &Hypothesis) -> f64 {
        if hypo.target_phrase().is_some() {
            1.0
        } else {
            0.0
        }
    }
}

/// One phrase-table score column.
#[derive(Debug, Clone)]
pub struct TranslationModel {
    name: String,
    column: usize,
}

impl TranslationModel {
    pub fn new(column: usize) -> Self {
        Self {
            name: format!("TranslationModel{}", column),
            column,
        }
    }
}

impl StatelessFeature for TranslationModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate_when_applied(&self, hypo: &Hypothesis) -> f64 {
        hypo.target_phrase().map_or(0.0, |tp| tp.score(self.column))
    }
}
