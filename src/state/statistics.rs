// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Counters of what the search did with each candidate, kept by the driver
//! and by every parallel expansion worker, then merged.

use std::fmt;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

#[derive(EnumCountMacro, EnumIter, IntoStaticStr, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    HyposCreated,
    RejectedOverlap,
    RejectedDistortion,
    RejectedLookahead,
    /// Phrase tables with no entry for a span.
    EmptyTranslationTables,
    Recombined,
    Pruned,
    /// Hypotheses returned to the pool.
    Recycled,
    /// Hypotheses built from a pooled instance.
    PoolReused,
    StacksDecoded,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub fn increment(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    pub fn add(&mut self, counter: Counters, amount: u64) {
        self.stats[counter as usize] += amount;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    /// Add every counter of `other` into this one.
    pub fn merge(&mut self, other: &Statistics) {
        for (mine, theirs) in self.stats.iter_mut().zip(other.stats.iter()) {
            *mine += theirs;
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for counter in Counters::iter() {
            let name: &'static str = counter.into();
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, self.get(counter))?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = Statistics::new();
        stats.increment(Counters::Pruned);
        stats.add(Counters::Pruned, 4);
        assert_eq!(stats.get(Counters::Pruned), 5);
        assert_eq!(stats.get(Counters::Recycled), 0);
    }

    #[test]
    fn test_merge() {
        let mut a = Statistics::new();
        a.increment(Counters::HyposCreated);
        let mut b = Statistics::new();
        b.add(Counters::HyposCreated, 2);
        b.increment(Counters::RejectedOverlap);
        a.merge(&b);
        assert_eq!(a.get(Counters::HyposCreated), 3);
        assert_eq!(a.get(Counters::RejectedOverlap), 1);
    }

    #[test]
    fn test_display() {
        let mut stats = Statistics::new();
        stats.increment(Counters::StacksDecoded);
        let text = stats.to_string();
        assert!(text.starts_with("HyposCreated=0, "));
        assert!(text.contains("StacksDecoded=1"));
    }
}
