//! Capacity growth and shrink policy.
//!
//! # Growth Strategy
//!
//! When a push finds every slot live, the array doubles. After a removal
//! leaves the array at or below `1 / shrink_divisor` occupancy it halves,
//! never below the configured floor and never below the live length. Both
//! reflows copy the live window to slot 0. A single push or pop can cost
//! O(n); any sequence of N operations costs O(N) in total.

use crate::config::DequeConfig;
use crate::stats::DequeStats;
use crate::storage::RingStorage;

/// Growth factor when resizing (2x).
pub(crate) const GROWTH_FACTOR: usize = 2;

/// Decides when the slot array is resized and performs the reflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CapacityManager {
    min_capacity: usize,
    shrink_divisor: usize,
    /// Smallest power of two holding `maxlen`, for bounded deques.
    max_capacity: Option<usize>,
}

impl CapacityManager {
    pub(crate) fn new(config: &DequeConfig) -> Self {
        let min_capacity = config.min_capacity;
        let max_capacity = config.maxlen.map(|maxlen| {
            maxlen
                .checked_next_power_of_two()
                .unwrap_or(usize::MAX / 2 + 1)
                .max(min_capacity)
        });
        Self {
            min_capacity,
            shrink_divisor: config.shrink_divisor,
            max_capacity,
        }
    }

    /// Initial capacity for a deque expecting at least `hint` elements.
    pub(crate) fn initial_capacity(&self, hint: usize) -> usize {
        let wanted = match self.max_capacity {
            Some(max) => hint.min(max),
            None => hint,
        };
        wanted
            .max(self.min_capacity)
            .checked_next_power_of_two()
            .unwrap_or(self.min_capacity)
    }

    /// New capacity if a push at `len` would overflow `capacity`.
    #[inline]
    pub(crate) fn grow_target(&self, capacity: usize, len: usize) -> Option<usize> {
        if len < capacity {
            return None;
        }
        let target = capacity * GROWTH_FACTOR;
        Some(match self.max_capacity {
            Some(max) => target.min(max).max(capacity),
            None => target,
        })
    }

    /// New capacity if the array is sparse enough to halve.
    #[inline]
    pub(crate) fn shrink_target(&self, capacity: usize, len: usize) -> Option<usize> {
        if self.shrink_divisor == 0 || capacity <= self.min_capacity {
            return None;
        }
        if len > capacity / self.shrink_divisor {
            return None;
        }
        let half = capacity / GROWTH_FACTOR;
        (half >= self.min_capacity && half >= len).then_some(half)
    }

    // =========================================================================
    // Reflow Triggers
    // =========================================================================

    /// Make room for one more element.
    pub(crate) fn reserve_one<T>(&self, storage: &mut RingStorage<T>, stats: &mut DequeStats) {
        let capacity = storage.capacity();
        if let Some(new_capacity) = self.grow_target(capacity, storage.len()) {
            let moved = storage.reflow(new_capacity);
            stats.record_grow(moved);
            tracing::trace!(
                "deque grew {} -> {} slots ({} elements moved)",
                capacity,
                new_capacity,
                moved
            );
        }
    }

    /// Give memory back after a removal, if occupancy dropped far enough.
    pub(crate) fn release_slack<T>(&self, storage: &mut RingStorage<T>, stats: &mut DequeStats) {
        let capacity = storage.capacity();
        if let Some(new_capacity) = self.shrink_target(capacity, storage.len()) {
            let moved = storage.reflow(new_capacity);
            stats.record_shrink(moved);
            tracing::trace!(
                "deque shrank {} -> {} slots ({} elements moved)",
                capacity,
                new_capacity,
                moved
            );
        }
    }

    /// Drop everything and return the array to the floor.
    pub(crate) fn reset<T>(&self, storage: &mut RingStorage<T>) {
        storage.reset(self.min_capacity);
    }
}
