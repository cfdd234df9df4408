// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Generic free-list of released objects.

/// Hook run when an object is handed back to a [`Recycler`].
///
/// Implementations drop anything that must not outlive the object's previous
/// use, such as shared references into other objects, while keeping buffers
/// whose capacity is worth reusing.
pub trait Recyclable {
    fn on_release(&mut self) {}
}

/// A pool of released instances, reused in LIFO order.
///
/// Ownership is exclusive at all times: an instance is either held by its
/// current user or sitting in the pool, because [`Recycler::release`] takes it
/// by value and [`Recycler::acquire`] gives it back by value.
#[derive(Debug)]
pub struct Recycler<T> {
    free: Vec<T>,
    released: u64,
    reused: u64,
}

impl<T: Recyclable> Recycler<T> {
    pub fn new() -> Self {
        Self {
            free: Vec::new(),
            released: 0,
            reused: 0,
        }
    }

    /// Return an instance to the pool.
    pub fn release(&mut self, mut item: T) {
        item.on_release();
        self.released += 1;
        self.free.push(item);
    }

    /// Take a pooled instance, if any. The caller re-initialises it.
    pub fn acquire(&mut self) -> Option<T> {
        let item = self.free.pop();
        if item.is_some() {
            self.reused += 1;
        }
        item
    }

    /// Number of instances currently pooled.
    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Total number of [`Recycler::release`] calls.
    pub fn released_count(&self) -> u64 {
        self.released
    }

    /// Total number of successful [`Recycler::acquire`] calls.
    pub fn reused_count(&self) -> u64 {
        self.reused
    }

    /// Drop every pooled instance.
    pub fn clear(&mut self) {
        self.free.clear();
    }
}

impl<T: Recyclable> Default for Recycler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Buffer {
        data: Vec<u32>,
        owner: Option<String>,
    }

    impl Recyclable for Buffer {
        fn on_release(&mut self) {
            self.data.clear();
            self.owner = None;
        }
    }

    #[test]
    fn test_new_is_empty() {
        let pool: Recycler<Buffer> = Recycler::new();
        assert!(pool.is_empty());
        assert_eq!(pool.released_count(), 0);
    }

    #[test]
    fn test_acquire_from_empty() {
        let mut pool: Recycler<Buffer> = Recycler::new();
        assert!(pool.acquire().is_none());
        assert_eq!(pool.reused_count(), 0);
    }

    #[test]
    fn test_release_runs_hook_and_keeps_capacity() {
        let mut pool = Recycler::new();
        let mut buffer = Buffer::default();
        buffer.data.extend(0..100);
        buffer.owner = Some("stack 3".to_string());
        let capacity = buffer.data.capacity();

        pool.release(buffer);
        assert_eq!(pool.len(), 1);

        let reused = pool.acquire().unwrap();
        assert!(reused.data.is_empty());
        assert!(reused.owner.is_none());
        assert_eq!(reused.data.capacity(), capacity);
        assert_eq!(pool.reused_count(), 1);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_lifo_order() {
        let mut pool = Recycler::new();
        for i in 0..3 {
            let mut buffer = Buffer::default();
            buffer.data.reserve(10 * (i + 1));
            pool.release(buffer);
        }
        assert_eq!(pool.released_count(), 3);
        let last = pool.acquire().unwrap();
        assert!(last.data.capacity() >= 30);
    }

    #[test]
    fn test_clear() {
        let mut pool = Recycler::new();
        pool.release(Buffer::default());
        pool.release(Buffer::default());
        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.released_count(), 2);
    }
}
