// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use super::{Hypothesis, Stack};
use crate::memory::Recycler;

/// One stack per number of covered source words, `0..=source_len`.
#[derive(Debug)]
pub struct Stacks {
    stacks: Vec<Stack>,
}

impl Stacks {
    pub fn new(source_len: usize) -> Self {
        Self {
            stacks: (0..=source_len).map(|_| Stack::new()).collect(),
        }
    }

    /// Number of stacks, one more than the sentence length.
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn get(&self, ind: usize) -> &Stack {
        &self.stacks[ind]
    }

    pub fn get_mut(&mut self, ind: usize) -> &mut Stack {
        &mut self.stacks[ind]
    }

    /// The stack of complete translations.
    pub fn back(&self) -> &Stack {
        &self.stacks[self.stacks.len() - 1]
    }

    /// Release what is left in stack `ind`; it will not be read again.
    /// Returns the number released.
    pub fn delete(&mut self, ind: usize, pool: &mut Recycler<Hypothesis>) -> usize {
        self.stacks[ind].clear(pool)
    }
}
