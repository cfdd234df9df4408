// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Source coverage types.
//!
//! This module contains the value types the search uses to describe what a
//! hypothesis has translated:
//! - Range: an inclusive span of source positions
//! - Bitmap: the set of covered source positions
//! - Bitmaps: a per-sentence cache that shares equal bitmaps

pub mod bitmap;
pub mod bitmaps;
pub mod range;

pub use bitmap::Bitmap;
pub use bitmaps::Bitmaps;
pub use range::Range;
