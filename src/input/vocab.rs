// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Target-side word interning.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;

/// Dense identifier of a target word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordId(u32);

impl WordId {
    /// Sentence-start marker `<s>`, always the first interned word.
    pub const SENTENCE_START: WordId = WordId(0);

    /// Sentence-end marker `</s>`, always the second interned word.
    pub const SENTENCE_END: WordId = WordId(1);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bidirectional map between target words and their ids.
#[derive(Debug, Clone)]
pub struct Vocab {
    str_to_id: FxHashMap<String, WordId>,
    id_to_str: Vec<String>,
}

impl Vocab {
    /// Create a vocabulary holding only the sentence markers.
    pub fn new() -> Self {
        let mut vocab = Self {
            str_to_id: FxHashMap::default(),
            id_to_str: Vec::new(),
        };
        vocab.intern("<s>");
        vocab.intern("</s>");
        vocab
    }

    /// Id for `word`, adding it if unseen.
    pub fn intern(&mut self, word: &str) -> WordId {
        if let Some(id) = self.str_to_id.get(word) {
            return *id;
        }
        let id = WordId(
            u32::try_from(self.id_to_str.len())
                .expect("target vocabulary exceeded WordId capacity (u32)"),
        );
        self.id_to_str.push(word.to_string());
        self.str_to_id.insert(word.to_string(), id);
        id
    }

    /// Intern every whitespace-separated word of `text`.
    pub fn intern_phrase(&mut self, text: &str) -> SmallVec<[WordId; 4]> {
        text.split_whitespace().map(|w| self.intern(w)).collect()
    }

    /// Id for `word` if it has been interned.
    pub fn get(&self, word: &str) -> Option<WordId> {
        self.str_to_id.get(word).copied()
    }

    /// Surface form of `id`, if it belongs to this vocabulary.
    pub fn word(&self, id: WordId) -> Option<&str> {
        self.id_to_str.get(id.0 as usize).map(String::as_str)
    }

    /// Render a word sequence, using `<unk>` for foreign ids.
    pub fn render(&self, ids: &[WordId]) -> String {
        ids.iter()
            .map(|&id| self.word(id).unwrap_or("<unk>"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn len(&self) -> usize {
        self.id_to_str.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_str.is_empty()
    }
}

impl Default for Vocab {
    fn default() -> Self {
        Self::new()
    }
}
