// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Decoder input: source spans and their candidate translations.
//!
//! Phrase-table lookup happens before the search. By the time a sentence is
//! decoded every eligible span has been paired with ranked candidate lists:
//! - Vocab / WordId: interned target words
//! - TargetPhrase / TargetPhrases: candidate translations of one span
//! - InputPath / InputPaths: spans of the sentence with their candidates

pub mod paths;
pub mod target_phrase;
pub mod vocab;

pub use paths::{InputPath, InputPaths};
pub use target_phrase::{TargetPhrase, TargetPhrases};
pub use vocab::{Vocab, WordId};
