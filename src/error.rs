// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for building decoder inputs and configuration.
//!
//! The search itself never fails: rejected expansions are pruned silently and
//! an empty final stack is reported as `None`. These errors only arise at the
//! boundary, while a caller assembles spans, estimates or configuration.

use crate::coverage::Range;
use thiserror::Error;

/// Errors raised while constructing decoder inputs.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value is out of its valid domain.
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),

    /// A range was requested with its start after its end.
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange { start: usize, end: usize },

    /// A range does not fit inside the source sentence.
    #[error("range {range} is outside a source of length {source_len}")]
    RangeOutOfBounds { range: Range, source_len: usize },

    /// The source sentence has no words.
    #[error("source sentence is empty")]
    EmptySource,

    /// Configuration text could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for decoder construction.
pub type Result<T> = std::result::Result<T, Error>;
