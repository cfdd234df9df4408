// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mutable bookkeeping of a decoding run.

pub mod statistics;

pub use statistics::{Counters, Statistics};
