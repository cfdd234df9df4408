// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Object reuse for the hot expansion loop.
//!
//! Every expansion creates a hypothesis and most of them are discarded soon
//! after, by pruning or recombination. The recycler keeps discarded
//! hypotheses so their buffers can be reused instead of reallocated.
//!
//! Pools are index-free: an object is moved into the pool and moved back out,
//! so the borrow checker enforces that no one else still holds it.

pub mod recycler;

pub use recycler::{Recyclable, Recycler};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a shared pool or cache, recovering it if a worker panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
