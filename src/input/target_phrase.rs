// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Candidate translations of a source span.

use super::{Vocab, WordId};
use smallvec::SmallVec;
use std::sync::Arc;

/// One candidate translation: target words plus phrase-table scores.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetPhrase {
    words: SmallVec<[WordId; 4]>,
    scores: SmallVec<[f64; 4]>,
}

impl TargetPhrase {
    pub fn new(words: impl Into<SmallVec<[WordId; 4]>>, scores: &[f64]) -> Self {
        Self {
            words: words.into(),
            scores: SmallVec::from_slice(scores),
        }
    }

    /// Build a phrase from whitespace-separated text, interning its words.
    pub fn from_text(vocab: &mut Vocab, text: &str, scores: &[f64]) -> Self {
        Self::new(vocab.intern_phrase(text), scores)
    }

    pub fn words(&self) -> &[WordId] {
        &self.words
    }

    /// Phrase-table scores, in table column order.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Score in column `index`, or 0.0 if the table has fewer columns.
    pub fn score(&self, index: usize) -> f64 {
        self.scores.get(index).copied().unwrap_or(0.0)
    }

    /// Number of target words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True for a phrase that deletes its source span.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn display(&self, vocab: &Vocab) -> String {
        vocab.render(&self.words)
    }
}

/// Ranked candidate translations from one phrase table.
#[derive(Debug, Clone, Default)]
pub struct TargetPhrases {
    phrases: Vec<Arc<TargetPhrase>>,
}

impl TargetPhrases {
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TargetPhrase>> {
        self.phrases.iter()
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

impl FromIterator<TargetPhrase> for TargetPhrases {
    fn from_iter<I: IntoIterator<Item = TargetPhrase>>(iter: I) -> Self {
        Self {
            phrases: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let mut vocab = Vocab::new();
        let phrase = TargetPhrase::from_text(&mut vocab, "a small house", &[-0.5, -1.0]);
        assert_eq!(phrase.len(), 3);
        assert_eq!(phrase.display(&vocab), "a small house");
        assert_eq!(phrase.score(1), -1.0);
        assert_eq!(phrase.score(5), 0.0);
    }

    #[test]
    fn test_empty_phrase_is_deletion() {
        let phrase = TargetPhrase::new(SmallVec::new(), &[]);
        assert!(phrase.is_empty());
    }

    #[test]
    fn test_collect_target_phrases() {
        let mut vocab = Vocab::new();
        let phrases: TargetPhrases = ["house", "home"]
            .iter()
            .map(|t| TargetPhrase::from_text(&mut vocab, t, &[0.0]))
            .collect();
        assert_eq!(phrases.len(), 2);
        let rendered: Vec<_> = phrases.iter().map(|p| p.display(&vocab)).collect();
        assert_eq!(rendered, vec!["house", "home"]);
    }
}
