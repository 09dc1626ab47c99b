//! Accounting for memory the resolver engine allocates through the context
//! allocator. The counter must read zero before the context may be torn
//! down.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared counter of bytes currently allocated by the engine.
#[derive(Debug, Default)]
pub struct AllocationCounter {
    bytes: AtomicUsize,
}

impl AllocationCounter {
    pub fn in_use(&self) -> usize {
        self.bytes.load(Ordering::Acquire)
    }

    pub fn grow(&self, size: usize) {
        self.bytes.fetch_add(size, Ordering::AcqRel);
    }

    /// Panics if `size` exceeds the pre-decrement total: the engine freed
    /// memory it never reported allocating.
    pub fn shrink(&self, size: usize) {
        let result = self
            .bytes
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                current.checked_sub(size)
            });
        if let Err(current) = result {
            panic!(
                "allocator accounting underflow: freeing {size} bytes with {current} in use"
            );
        }
    }
}

/// Cloneable capability handed to the engine adapter; every engine
/// malloc/realloc/free must report through it.
#[derive(Debug, Clone, Default)]
pub struct TrackingAllocator {
    counter: Arc<AllocationCounter>,
}

impl TrackingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_alloc(&self, size: usize) {
        self.counter.grow(size);
    }

    pub fn on_realloc(&self, old_size: usize, new_size: usize) {
        self.counter.grow(new_size);
        self.counter.shrink(old_size);
    }

    pub fn on_free(&self, size: usize) {
        self.counter.shrink(size);
    }

    pub fn in_use(&self) -> usize {
        self.counter.in_use()
    }
}
