//! Circular slot storage.
//!
//! A power-of-two array of optional slots plus a head offset and a logical
//! length. Logical element `i` lives at `(head + i) & (capacity - 1)`;
//! slots outside the live window are always `None`.
//!
//! ```text
//!  capacity = 8, head = 6, len = 4
//!
//!  slot:    0    1    2    3    4    5    6    7
//!         [ c ][ d ][   ][   ][   ][   ][ a ][ b ]
//!                                        ^head
//!  logical order: a b c d
//! ```

use crate::index::{physical, wrap_sub};
use std::iter;

/// Fixed-capacity ring of slots. Never resizes itself; the capacity
/// manager decides when to call [`RingStorage::reflow`].
#[derive(Debug, Clone)]
pub(crate) struct RingStorage<T> {
    /// Slot array, `slots.len()` is the capacity.
    slots: Vec<Option<T>>,
    /// Physical index of logical element 0.
    head: usize,
    /// Number of live elements.
    len: usize,
}

impl<T> RingStorage<T> {
    /// Create empty storage. `capacity` must be a power of two.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        Self {
            slots: Self::empty_slots(capacity),
            head: 0,
            len: 0,
        }
    }

    fn empty_slots(capacity: usize) -> Vec<Option<T>> {
        iter::repeat_with(|| None).take(capacity).collect()
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn head(&self) -> usize {
        self.head
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Physical slot of an in-range logical position.
    #[inline]
    pub(crate) fn slot_of(&self, logical: usize) -> usize {
        physical(logical, self.head, self.slots.len())
    }

    // =========================================================================
    // Slot Access
    // =========================================================================

    #[inline]
    pub(crate) fn read(&self, slot: usize) -> Option<&T> {
        self.slots[slot].as_ref()
    }

    #[inline]
    pub(crate) fn read_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.slots[slot].as_mut()
    }

    /// Overwrite a live slot, returning the previous occupant.
    #[inline]
    pub(crate) fn replace(&mut self, slot: usize, value: T) -> Option<T> {
        self.slots[slot].replace(value)
    }

    /// Swap two live logical positions.
    #[inline]
    pub(crate) fn swap_logical(&mut self, a: usize, b: usize) {
        let (a, b) = (self.slot_of(a), self.slot_of(b));
        self.slots.swap(a, b);
    }

    // =========================================================================
    // End Operations (caller guarantees room / non-emptiness)
    // =========================================================================

    #[inline]
    pub(crate) fn push_back(&mut self, value: T) {
        debug_assert!(!self.is_full());
        let slot = self.slot_of(self.len);
        self.slots[slot] = Some(value);
        self.len += 1;
    }

    #[inline]
    pub(crate) fn push_front(&mut self, value: T) {
        debug_assert!(!self.is_full());
        self.head = wrap_sub(self.head, 1, self.slots.len());
        self.slots[self.head] = Some(value);
        self.len += 1;
    }

    #[inline]
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let slot = self.slot_of(self.len - 1);
        self.len -= 1;
        self.slots[slot].take()
    }

    #[inline]
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.slots[self.head].take();
        self.head = physical(1, self.head, self.slots.len());
        self.len -= 1;
        value
    }

    /// Remove the element at a live logical position, closing the gap by
    /// shifting whichever side is shorter.
    pub(crate) fn remove_at(&mut self, logical: usize) -> Option<T> {
        debug_assert!(logical < self.len);
        let slot = self.slot_of(logical);
        let removed = self.slots[slot].take();

        if logical < self.len / 2 {
            // Shift the front part one slot toward the tail
            for i in (0..logical).rev() {
                let from = self.slot_of(i);
                let to = self.slot_of(i + 1);
                self.slots[to] = self.slots[from].take();
            }
            self.head = physical(1, self.head, self.slots.len());
        } else {
            // Shift the back part one slot toward the head
            for i in logical + 1..self.len {
                let from = self.slot_of(i);
                let to = self.slot_of(i - 1);
                self.slots[to] = self.slots[from].take();
            }
        }

        self.len -= 1;
        removed
    }

    // =========================================================================
    // Rotation Primitives
    // =========================================================================

    /// Move `count` elements from the back to the front. Returns the number
    /// of element moves performed.
    pub(crate) fn shift_back_to_front(&mut self, count: usize) -> usize {
        debug_assert!(count <= self.len);
        let capacity = self.slots.len();
        if self.is_full() {
            // Every slot is live: the window just slides
            self.head = wrap_sub(self.head, count, capacity);
            return 0;
        }
        for _ in 0..count {
            let tail = self.slot_of(self.len - 1);
            let value = self.slots[tail].take();
            self.head = wrap_sub(self.head, 1, capacity);
            self.slots[self.head] = value;
        }
        count
    }

    /// Move `count` elements from the front to the back. Returns the number
    /// of element moves performed.
    pub(crate) fn shift_front_to_back(&mut self, count: usize) -> usize {
        debug_assert!(count <= self.len);
        let capacity = self.slots.len();
        if self.is_full() {
            self.head = physical(count, self.head, capacity);
            return 0;
        }
        for _ in 0..count {
            let value = self.slots[self.head].take();
            self.head = physical(1, self.head, capacity);
            let tail = self.slot_of(self.len - 1);
            self.slots[tail] = value;
        }
        count
    }

    // =========================================================================
    // Reflow
    // =========================================================================

    /// Move the live elements into a fresh array of `new_capacity` slots,
    /// starting at slot 0. Returns the number of elements moved.
    pub(crate) fn reflow(&mut self, new_capacity: usize) -> usize {
        debug_assert!(new_capacity.is_power_of_two());
        debug_assert!(new_capacity >= self.len);

        let mut fresh = Self::empty_slots(new_capacity);
        for (dst, logical) in (0..self.len).enumerate() {
            let src = self.slot_of(logical);
            fresh[dst] = self.slots[src].take();
        }

        self.slots = fresh;
        self.head = 0;
        self.len
    }

    /// Drop every element and start over with `capacity` empty slots.
    pub(crate) fn reset(&mut self, capacity: usize) {
        self.slots = Self::empty_slots(capacity);
        self.head = 0;
        self.len = 0;
    }

    // =========================================================================
    // Linear Views
    // =========================================================================

    /// The live window as at most two contiguous slot runs, in logical order.
    pub(crate) fn as_slices(&self) -> (&[Option<T>], &[Option<T>]) {
        let capacity = self.slots.len();
        if self.head + self.len <= capacity {
            (&self.slots[self.head..self.head + self.len], &[])
        } else {
            let wrapped = self.head + self.len - capacity;
            (&self.slots[self.head..], &self.slots[..wrapped])
        }
    }

    /// Mutable counterpart of [`RingStorage::as_slices`].
    pub(crate) fn as_mut_slices(&mut self) -> (&mut [Option<T>], &mut [Option<T>]) {
        let capacity = self.slots.len();
        if self.head + self.len <= capacity {
            let end = self.head + self.len;
            (&mut self.slots[self.head..end], &mut [])
        } else {
            let wrapped = self.head + self.len - capacity;
            let (low, high) = self.slots.split_at_mut(self.head);
            (high, &mut low[..wrapped])
        }
    }
}
