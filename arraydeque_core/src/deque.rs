//! Array-backed double-ended queue.
//!
//! The deque stores its elements in a single contiguous ring buffer, which
//! gives cache locality that node-linked deques can't and O(1) random access
//! by logical index.
//!
//! # Performance Characteristics
//!
//! | Operation | Time | Notes |
//! |-----------|------|-------|
//! | `append()` / `appendleft()` | O(1) amortized | May trigger growth |
//! | `pop()` / `popleft()` | O(1) amortized | May trigger shrink |
//! | `extend()` / `extendleft()` | O(k) amortized | k = elements added |
//! | `get()` / `set()` | O(1) | Negative indices count from the tail |
//! | `rotate(k)` | O(min(k mod n, n - k mod n)) | Never resizes |
//! | `remove()` | O(n) | Shifts the shorter side |
//! | `count()` / `contains()` | O(n) | |
//! | `clear()` | O(n) | Drops elements, capacity back to floor |
//!
//! # Bounded Deques
//!
//! With a `maxlen`, a push onto a full deque discards the element at the
//! opposite end. Pushes report the discarded element back to the caller.

use crate::capacity::CapacityManager;
use crate::config::{ConfigError, DequeConfig};
use crate::error::{DequeError, DequeResult};
use crate::eviction::{self, Admission};
use crate::factory::DequeFactory;
use crate::index::{self, IndexKey};
use crate::iter::{Iter, IterMut};
use crate::rotate;
use crate::stats::DequeStats;
use crate::storage::RingStorage;
use std::fmt;
use std::ops::{Index, IndexMut};

// =============================================================================
// Deque
// =============================================================================

/// A double-ended queue with O(1) amortized operations at both ends.
///
/// # Examples
///
/// ```
/// use arraydeque_core::Deque;
///
/// let mut d = Deque::with_maxlen(3);
/// for i in 1..=4 {
///     d.append(i);
/// }
/// assert_eq!(d.to_vec(), vec![2, 3, 4]);
///
/// d.rotate(1);
/// assert_eq!(d.to_vec(), vec![4, 2, 3]);
/// assert_eq!(d.get(-1), Ok(&3));
/// ```
#[derive(Clone)]
pub struct Deque<T> {
    /// Ring buffer storage.
    storage: RingStorage<T>,
    /// Growth/shrink policy.
    capacity: CapacityManager,
    /// Optional maximum length, fixed at construction.
    maxlen: Option<usize>,
    /// Counters for reflows, evictions, and rotation moves.
    stats: DequeStats,
}

impl<T> Deque<T> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Create a new empty, unbounded deque.
    #[inline]
    pub fn new() -> Self {
        Self::from_parts(DequeConfig::default(), 0)
    }

    /// Create an unbounded deque with room for at least `capacity` elements
    /// before its first reflow.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_parts(DequeConfig::default(), capacity)
    }

    /// Create a deque with a maximum length.
    ///
    /// When full, adding new elements drops elements from the opposite end.
    #[inline]
    pub fn with_maxlen(maxlen: usize) -> Self {
        Self::from_parts(DequeConfig::bounded(maxlen), 0)
    }

    /// Create a deque with an explicit configuration.
    pub fn with_config(config: DequeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, 0))
    }

    /// Create a deque from a source sequence and an optional bound.
    ///
    /// Elements are appended in source order, so a bounded deque keeps only
    /// the trailing `maxlen` of them.
    pub fn from_iter_bounded<I>(source: I, maxlen: Option<usize>) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let source = source.into_iter();
        let (lower, _) = source.size_hint();
        let config = DequeConfig {
            maxlen,
            ..Default::default()
        };
        let mut d = Self::from_parts(config, lower);
        d.extend(source);
        d
    }

    fn from_parts(config: DequeConfig, hint: usize) -> Self {
        let capacity = CapacityManager::new(&config);
        Self {
            storage: RingStorage::with_capacity(capacity.initial_capacity(hint)),
            capacity,
            maxlen: config.maxlen,
            stats: DequeStats::new(),
        }
    }

    // =========================================================================
    // Core Properties
    // =========================================================================

    /// Returns the number of elements in the deque.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns true if the deque is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.len() == 0
    }

    /// Returns the maximum length, if set.
    #[inline]
    pub fn maxlen(&self) -> Option<usize> {
        self.maxlen
    }

    /// Returns true if the deque is bounded and at its bound.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.maxlen.is_some_and(|maxlen| self.len() >= maxlen)
    }

    /// Counters describing the internal work done so far.
    #[inline]
    pub fn stats(&self) -> &DequeStats {
        &self.stats
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    // =========================================================================
    // Append Operations (O(1) amortized)
    // =========================================================================

    /// Add an element to the right end.
    ///
    /// Returns the element that left the deque to make room: the evicted
    /// leftmost element of a full bounded deque, or `value` itself when the
    /// bound is zero.
    #[inline]
    pub fn append(&mut self, value: T) -> Option<T> {
        let evicted = match eviction::admit(self.maxlen, self.len()) {
            Admission::Reject => return Some(value),
            Admission::EvictOpposite => {
                self.stats.record_eviction();
                tracing::trace!("bounded deque full, evicting leftmost element");
                self.storage.pop_front()
            }
            Admission::Insert => None,
        };

        self.capacity.reserve_one(&mut self.storage, &mut self.stats);
        self.storage.push_back(value);
        evicted
    }

    /// Add an element to the left end.
    ///
    /// Returns the evicted rightmost element of a full bounded deque, or
    /// `value` itself when the bound is zero.
    #[inline]
    pub fn appendleft(&mut self, value: T) -> Option<T> {
        let evicted = match eviction::admit(self.maxlen, self.len()) {
            Admission::Reject => return Some(value),
            Admission::EvictOpposite => {
                self.stats.record_eviction();
                tracing::trace!("bounded deque full, evicting rightmost element");
                self.storage.pop_back()
            }
            Admission::Insert => None,
        };

        self.capacity.reserve_one(&mut self.storage, &mut self.stats);
        self.storage.push_front(value);
        evicted
    }

    /// Extend the deque by appending elements from an iterator.
    #[inline]
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }

    /// Extend the deque by appending elements from an iterator to the left.
    ///
    /// Each element is pushed onto the left in turn, so the source order
    /// ends up reversed.
    #[inline]
    pub fn extendleft<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.appendleft(item);
        }
    }

    // =========================================================================
    // Pop Operations (O(1) amortized)
    // =========================================================================

    /// Remove and return an element from the right end.
    #[inline]
    pub fn pop(&mut self) -> DequeResult<T> {
        let value = self.storage.pop_back().ok_or(DequeError::Empty)?;
        self.capacity.release_slack(&mut self.storage, &mut self.stats);
        Ok(value)
    }

    /// Remove and return an element from the left end.
    #[inline]
    pub fn popleft(&mut self) -> DequeResult<T> {
        let value = self.storage.pop_front().ok_or(DequeError::Empty)?;
        self.capacity.release_slack(&mut self.storage, &mut self.stats);
        Ok(value)
    }

    // =========================================================================
    // Access Operations
    // =========================================================================

    /// Get a reference to the element at `index`.
    /// Negative indices count from the right end.
    #[inline]
    pub fn get(&self, index: isize) -> DequeResult<&T> {
        let slot = self.slot(index as i64)?;
        self.storage.read(slot).ok_or(DequeError::IndexOutOfRange {
            index: index as i64,
            len: self.len(),
        })
    }

    /// Get a mutable reference to the element at `index`.
    #[inline]
    pub fn get_mut(&mut self, index: isize) -> DequeResult<&mut T> {
        let len = self.len();
        let slot = self.slot(index as i64)?;
        self.storage.read_mut(slot).ok_or(DequeError::IndexOutOfRange {
            index: index as i64,
            len,
        })
    }

    /// Replace the element at `index`, returning the previous one.
    pub fn set(&mut self, index: isize, value: T) -> DequeResult<T> {
        let len = self.len();
        let slot = self.slot(index as i64)?;
        self.storage
            .replace(slot, value)
            .ok_or(DequeError::IndexOutOfRange {
                index: index as i64,
                len,
            })
    }

    /// Get an element through a dynamically-typed key.
    ///
    /// Non-integer keys (including slices) fail with
    /// [`DequeError::WrongIndexType`] before any bounds check.
    pub fn get_item(&self, key: IndexKey) -> DequeResult<&T> {
        let index = key.as_int()?;
        let slot = self.slot(index)?;
        self.storage.read(slot).ok_or(DequeError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Replace an element through a dynamically-typed key.
    pub fn set_item(&mut self, key: IndexKey, value: T) -> DequeResult<T> {
        let index = key.as_int()?;
        let len = self.len();
        let slot = self.slot(index)?;
        self.storage
            .replace(slot, value)
            .ok_or(DequeError::IndexOutOfRange { index, len })
    }

    /// Get the first element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            self.storage.read(self.storage.head())
        }
    }

    /// Get the last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        let last = self.len().checked_sub(1)?;
        self.storage.read(self.storage.slot_of(last))
    }

    #[inline]
    fn slot(&self, logical: i64) -> DequeResult<usize> {
        index::translate(
            logical,
            self.storage.head(),
            self.storage.len(),
            self.storage.capacity(),
        )
    }

    // =========================================================================
    // Mutation Operations
    // =========================================================================

    /// Rotate the deque `steps` positions to the right.
    /// If `steps` is negative, rotate to the left.
    ///
    /// Rotating right by one moves the last element to the front.
    pub fn rotate(&mut self, steps: isize) {
        let moved = rotate::rotate(&mut self.storage, steps);
        self.stats.record_rotation(moved);
    }

    /// Reverse the deque in place.
    pub fn reverse(&mut self) {
        let len = self.len();
        for i in 0..len / 2 {
            self.storage.swap_logical(i, len - 1 - i);
        }
    }

    /// Clear all elements and return the slot array to its floor.
    #[inline]
    pub fn clear(&mut self) {
        self.capacity.reset(&mut self.storage);
    }

    // =========================================================================
    // Iterator Support
    // =========================================================================

    /// Returns an iterator over the elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        let (front, back) = self.storage.as_slices();
        Iter::new(front, back)
    }

    /// Returns a mutable iterator over the elements, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (front, back) = self.storage.as_mut_slices();
        IterMut::new(front, back)
    }

    /// Logical-order snapshot of the elements.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Build a new instance of some variant from this deque's elements and
    /// bound, through a caller-supplied factory.
    pub fn rebuild_with<F>(&self, factory: &F) -> F::Output
    where
        T: Clone,
        F: DequeFactory<T>,
    {
        factory.construct(self.to_vec(), self.maxlen)
    }
}

// =============================================================================
// Value Search
// =============================================================================

impl<T: PartialEq> Deque<T> {
    /// Remove and return the first element equal to `value`.
    pub fn remove(&mut self, value: &T) -> DequeResult<T> {
        let position = self.index_of(value).ok_or(DequeError::ValueNotFound)?;
        let removed = self
            .storage
            .remove_at(position)
            .ok_or(DequeError::ValueNotFound)?;
        self.capacity.release_slack(&mut self.storage, &mut self.stats);
        Ok(removed)
    }

    /// Count occurrences of a value.
    pub fn count(&self, value: &T) -> usize {
        self.iter().filter(|v| *v == value).count()
    }

    /// Returns true if any element equals `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|v| v == value)
    }

    /// Find the index of the first occurrence of a value.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter().position(|v| v == value)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for Deque<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get_item(IndexKey::from(index)) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T> IndexMut<usize> for Deque<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let len = self.len();
        let logical = isize::try_from(index).unwrap_or(isize::MAX);
        match self.get_mut(logical) {
            Ok(value) => value,
            Err(_) => panic!(
                "{}",
                DequeError::IndexOutOfRange {
                    index: i64::try_from(index).unwrap_or(i64::MAX),
                    len
                }
            ),
        }
    }
}

/// Equality ignores the bound: same length and pairwise-equal elements.
impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Deque::from_iter_bounded(iter, None)
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        Deque::extend(self, iter)
    }
}

impl<T, const N: usize> From<[T; N]> for Deque<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T> From<Vec<T>> for Deque<T> {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

// =============================================================================
// Rendering
// =============================================================================

impl<T> Deque<T> {
    fn render(
        &self,
        f: &mut fmt::Formatter<'_>,
        item: impl Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        f.write_str("deque([")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            item(value, f)?;
        }
        f.write_str("]")?;
        if let Some(maxlen) = self.maxlen {
            write!(f, ", maxlen={}", maxlen)?;
        }
        f.write_str(")")
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, |value, f| write!(f, "{:?}", value))
    }
}

impl<T: fmt::Display> fmt::Display for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, |value, f| write!(f, "{}", value))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod deque_tests {
    use super::*;

    fn ints(d: &Deque<i64>) -> Vec<i64> {
        d.iter().copied().collect()
    }

    // =========================================================================
    // Construction Tests
    // =========================================================================

    #[test]
    fn test_new_creates_empty_deque() {
        let d: Deque<i64> = Deque::new();
        assert!(d.is_empty());
        assert_eq!(d.len(), 0);
        assert_eq!(d.maxlen(), None);
    }

    #[test]
    fn test_with_capacity_respects_minimum() {
        let d: Deque<i64> = Deque::with_capacity(4);
        assert_eq!(d.capacity(), 8);
    }

    #[test]
    fn test_with_capacity_rounds_to_power_of_two() {
        let d: Deque<i64> = Deque::with_capacity(17);
        assert_eq!(d.capacity(), 32);
    }

    #[test]
    fn test_with_maxlen() {
        let d: Deque<i64> = Deque::with_maxlen(5);
        assert_eq!(d.maxlen(), Some(5));
    }

    #[test]
    fn test_with_invalid_config() {
        let config = DequeConfig {
            min_capacity: 6,
            ..Default::default()
        };
        assert_eq!(
            Deque::<i64>::with_config(config).err(),
            Some(ConfigError::InvalidMinCapacity)
        );
    }

    #[test]
    fn test_from_iter_bounded_keeps_tail() {
        let d = Deque::from_iter_bounded(0..10, Some(5));
        assert_eq!(ints(&d), vec![5, 6, 7, 8, 9]);
        assert_eq!(d.stats().evictions, 5);
    }

    #[test]
    fn test_from_iter_bounded_presizes() {
        let d = Deque::from_iter_bounded(0..100, None);
        assert_eq!(d.capacity(), 128);
        assert_eq!(d.stats().grows, 0);
    }

    // =========================================================================
    // Append/Pop Tests
    // =========================================================================

    #[test]
    fn test_append_and_pop_order() {
        let mut d = Deque::new();
        d.append(1);
        d.append(2);
        d.append(3);

        assert_eq!(d.pop(), Ok(3));
        assert_eq!(d.pop(), Ok(2));
        assert_eq!(d.pop(), Ok(1));
        assert_eq!(d.pop(), Err(DequeError::Empty));
    }

    #[test]
    fn test_appendleft_and_popleft_order() {
        let mut d = Deque::new();
        d.appendleft(1);
        d.appendleft(2);
        d.appendleft(3);

        assert_eq!(d.popleft(), Ok(3));
        assert_eq!(d.popleft(), Ok(2));
        assert_eq!(d.popleft(), Ok(1));
        assert_eq!(d.popleft(), Err(DequeError::Empty));
    }

    #[test]
    fn test_mixed_operations() {
        let mut d = Deque::new();
        d.append(1);
        d.appendleft(0);
        d.append(2);

        // [0, 1, 2]
        assert_eq!(d.popleft(), Ok(0));
        assert_eq!(d.pop(), Ok(2));
        assert_eq!(d.popleft(), Ok(1));
    }

    #[test]
    fn test_unbounded_append_never_evicts() {
        let mut d = Deque::new();
        for i in 0..100 {
            assert_eq!(d.append(i), None);
        }
        assert_eq!(d.len(), 100);
    }

    // =========================================================================
    // Maxlen Tests
    // =========================================================================

    #[test]
    fn test_maxlen_drops_from_left_on_append() {
        let mut d = Deque::with_maxlen(3);
        assert_eq!(d.append(1), None);
        assert_eq!(d.append(2), None);
        assert_eq!(d.append(3), None);
        assert!(d.is_full());

        assert_eq!(d.append(4), Some(1));
        assert_eq!(ints(&d), vec![2, 3, 4]);
    }

    #[test]
    fn test_maxlen_drops_from_right_on_appendleft() {
        let mut d = Deque::with_maxlen(3);
        for i in 1..=3 {
            d.appendleft(i);
        }
        assert_eq!(d.appendleft(4), Some(1));
        assert_eq!(ints(&d), vec![4, 3, 2]);
    }

    #[test]
    fn test_maxlen_zero_ignores_appends() {
        let mut d = Deque::with_maxlen(0);
        assert_eq!(d.append(1), Some(1));
        assert_eq!(d.appendleft(2), Some(2));
        assert!(d.is_empty());
        assert_eq!(d.pop(), Err(DequeError::Empty));
        assert_eq!(d.popleft(), Err(DequeError::Empty));
    }

    #[test]
    fn test_bounded_extend_evicts_per_element() {
        let mut d = Deque::with_maxlen(4);
        d.extend([1, 2, 3]);
        d.extend([4, 5, 6]);
        assert_eq!(ints(&d), vec![3, 4, 5, 6]);

        d.extendleft([7, 8]);
        assert_eq!(ints(&d), vec![8, 7, 3, 4]);
    }

    #[test]
    fn test_bounded_capacity_stays_capped() {
        let mut d = Deque::with_maxlen(20);
        for i in 0..10_000 {
            d.append(i);
        }
        assert_eq!(d.len(), 20);
        assert_eq!(d.capacity(), 32);
    }

    // =========================================================================
    // Index Access Tests
    // =========================================================================

    #[test]
    fn test_positive_and_negative_index() {
        let d: Deque<i64> = [10, 20, 30].into();

        assert_eq!(d.get(0), Ok(&10));
        assert_eq!(d.get(2), Ok(&30));
        assert_eq!(d.get(-1), Ok(&30));
        assert_eq!(d.get(-3), Ok(&10));
    }

    #[test]
    fn test_out_of_bounds_index() {
        let d: Deque<i64> = [1].into();

        assert_eq!(
            d.get(5),
            Err(DequeError::IndexOutOfRange { index: 5, len: 1 })
        );
        assert_eq!(
            d.get(-2),
            Err(DequeError::IndexOutOfRange { index: -2, len: 1 })
        );
    }

    #[test]
    fn test_set_replaces_and_returns_old() {
        let mut d: Deque<i64> = [100, 200, 300, 400].into();
        assert_eq!(d.set(0, 111), Ok(100));
        assert_eq!(d.set(-1, 444), Ok(400));
        assert_eq!(ints(&d), vec![111, 200, 300, 444]);
        assert!(d.set(4, 0).is_err());
        assert!(d.set(-5, 999).is_err());
        assert_eq!(ints(&d), vec![111, 200, 300, 444]);
    }

    #[test]
    fn test_get_item_rejects_wrong_types() {
        let mut d: Deque<i64> = [1, 2, 3].into();
        assert_eq!(d.get_item(IndexKey::Int(-1)), Ok(&3));
        assert_eq!(
            d.get_item(IndexKey::Other("str")),
            Err(DequeError::WrongIndexType("str"))
        );
        assert_eq!(
            d.get_item(IndexKey::from(1..3)),
            Err(DequeError::WrongIndexType("slice"))
        );
        assert_eq!(
            d.set_item(IndexKey::Other("float"), 9),
            Err(DequeError::WrongIndexType("float"))
        );
        assert_eq!(ints(&d), vec![1, 2, 3]);
    }

    #[test]
    fn test_wrong_type_checked_before_bounds() {
        let d: Deque<i64> = Deque::new();
        assert_eq!(
            d.get_item(IndexKey::Slice),
            Err(DequeError::WrongIndexType("slice"))
        );
    }

    #[test]
    fn test_front_and_back() {
        let mut d = Deque::new();
        assert_eq!(d.front(), None);
        assert_eq!(d.back(), None);

        d.append(1);
        d.append(2);
        d.appendleft(0);

        assert_eq!(d.front(), Some(&0));
        assert_eq!(d.back(), Some(&2));
    }

    #[test]
    fn test_index_trait() {
        let mut d: Deque<i64> = [10, 20].into();
        assert_eq!(d[0], 10);
        d[1] = 25;
        assert_eq!(d[1], 25);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_out_of_bounds_panics() {
        let d: Deque<i64> = Deque::new();
        let _ = &d[0];
    }

    // =========================================================================
    // Rotation Tests
    // =========================================================================

    #[test]
    fn test_rotate_right() {
        let mut d: Deque<i64> = (0..5).collect();
        d.rotate(2);
        assert_eq!(ints(&d), vec![3, 4, 0, 1, 2]);
    }

    #[test]
    fn test_rotate_left() {
        let mut d: Deque<i64> = (0..5).collect();
        d.rotate(-2);
        assert_eq!(ints(&d), vec![2, 3, 4, 0, 1]);
    }

    #[test]
    fn test_rotate_empty_and_single() {
        let mut d: Deque<i64> = Deque::new();
        d.rotate(5);
        assert!(d.is_empty());

        d.append(1);
        d.rotate(100);
        assert_eq!(ints(&d), vec![1]);
    }

    #[test]
    fn test_rotate_preserves_capacity_and_bound() {
        let mut d = Deque::from_iter_bounded(0..6, Some(6));
        let capacity = d.capacity();
        d.rotate(4);
        assert_eq!(d.capacity(), capacity);
        assert_eq!(d.maxlen(), Some(6));
        assert_eq!(ints(&d), vec![2, 3, 4, 5, 0, 1]);
    }

    #[test]
    fn test_rotate_move_count_is_minimal() {
        let mut d: Deque<i64> = (0..10).collect();
        d.rotate(9);
        assert_eq!(d.stats().rotate_moves, 1);
        d.rotate(-9);
        assert_eq!(d.stats().rotate_moves, 2);
        assert_eq!(ints(&d), (0..10).collect::<Vec<_>>());
    }

    // =========================================================================
    // Reverse Tests
    // =========================================================================

    #[test]
    fn test_reverse() {
        let mut d: Deque<i64> = (0..5).collect();
        d.rotate(2);
        d.reverse();
        assert_eq!(ints(&d), vec![2, 1, 0, 4, 3]);
    }

    #[test]
    fn test_reverse_empty_and_single() {
        let mut d: Deque<i64> = Deque::new();
        d.reverse();
        assert!(d.is_empty());
        d.append(1);
        d.reverse();
        assert_eq!(ints(&d), vec![1]);
    }

    // =========================================================================
    // Clear Tests
    // =========================================================================

    #[test]
    fn test_clear_resets_capacity() {
        let mut d: Deque<i64> = (0..1000).collect();
        d.clear();
        assert!(d.is_empty());
        assert_eq!(d.capacity(), 8);

        d.append(99);
        assert_eq!(ints(&d), vec![99]);
    }

    // =========================================================================
    // Remove/Count Tests
    // =========================================================================

    #[test]
    fn test_remove_first_occurrence() {
        let mut d: Deque<char> = "abcbc".chars().collect();
        assert_eq!(d.remove(&'b'), Ok('b'));
        assert_eq!(d.iter().collect::<String>(), "acbc");
    }

    #[test]
    fn test_remove_not_found_leaves_deque() {
        let mut d: Deque<i64> = [1, 2].into();
        assert_eq!(d.remove(&99), Err(DequeError::ValueNotFound));
        assert_eq!(ints(&d), vec![1, 2]);
    }

    #[test]
    fn test_remove_across_wrap() {
        let mut d = Deque::new();
        for i in 0..4 {
            d.append(i);
            d.appendleft(-(i + 1));
        }
        // [-4, -3, -2, -1, 0, 1, 2, 3], head wrapped
        assert_eq!(d.remove(&-1), Ok(-1));
        assert_eq!(d.remove(&2), Ok(2));
        assert_eq!(ints(&d), vec![-4, -3, -2, 0, 1, 3]);
    }

    #[test]
    fn test_count_and_contains() {
        let d: Deque<char> = "abbccc".chars().collect();
        assert_eq!(d.count(&'a'), 1);
        assert_eq!(d.count(&'b'), 2);
        assert_eq!(d.count(&'c'), 3);
        assert_eq!(d.count(&'z'), 0);
        assert!(d.contains(&'c'));
        assert!(!d.contains(&'z'));
        assert_eq!(d.index_of(&'c'), Some(3));
    }

    // =========================================================================
    // Iterator Tests
    // =========================================================================

    #[test]
    fn test_iter_forward_and_reverse() {
        let mut d = Deque::new();
        d.append(2);
        d.append(3);
        d.appendleft(1);

        assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(d.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(d.iter().len(), 3);
    }

    #[test]
    fn test_iter_is_restartable() {
        let d: Deque<i64> = (0..4).collect();
        let first: Vec<_> = d.iter().collect();
        let second: Vec<_> = d.iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_iter_mut() {
        let mut d: Deque<i64> = (0..4).collect();
        d.rotate(1);
        for v in d.iter_mut() {
            *v *= 10;
        }
        assert_eq!(ints(&d), vec![30, 0, 10, 20]);
    }

    #[test]
    fn test_into_iter() {
        let d: Deque<i64> = (0..3).collect();
        let vals: Vec<i64> = d.into_iter().collect();
        assert_eq!(vals, vec![0, 1, 2]);
    }

    // =========================================================================
    // Growth Tests
    // =========================================================================

    #[test]
    fn test_growth_preserves_order() {
        let mut d = Deque::new();

        // Add elements from both ends
        for i in 0..10 {
            d.append(i);
            d.appendleft(-(i + 1));
        }

        // Force growth
        for i in 10..30 {
            d.append(i);
        }

        assert_eq!(d.get(0), Ok(&-10));
        assert_eq!(d.get(10), Ok(&0));
        assert_eq!(d.get(-1), Ok(&29));
    }

    #[test]
    fn test_shrink_after_drain() {
        let mut d: Deque<i64> = Deque::new();
        for i in 0..1024 {
            d.append(i);
        }
        assert_eq!(d.capacity(), 1024);
        while d.len() > 3 {
            d.popleft().unwrap();
        }
        assert_eq!(d.capacity(), 8);
        assert_eq!(ints(&d), vec![1021, 1022, 1023]);
    }

    #[test]
    fn test_reads_never_resize() {
        let d: Deque<i64> = (0..33).collect();
        let capacity = d.capacity();
        let stats = *d.stats();
        for i in -33..33 {
            let _ = d.get(i);
        }
        let _ = d.count(&5);
        let _ = d.to_vec();
        assert_eq!(d.capacity(), capacity);
        assert_eq!(*d.stats(), stats);
    }

    // =========================================================================
    // Equality/Rendering Tests
    // =========================================================================

    #[test]
    fn test_equality_ignores_layout_and_bound() {
        let mut a = Deque::new();
        for i in (0..5).rev() {
            a.appendleft(i);
        }
        let b = Deque::from_iter_bounded(0..5, Some(10));
        assert_eq!(a, b);

        let c: Deque<i64> = (0..4).collect();
        assert_ne!(a, c);
    }

    #[test]
    fn test_debug_and_display() {
        let d: Deque<&str> = ["a", "b"].into();
        assert_eq!(format!("{:?}", d), r#"deque(["a", "b"])"#);
        assert_eq!(format!("{}", d), "deque([a, b])");

        let bounded = Deque::from_iter_bounded([1, 2], Some(3));
        assert_eq!(format!("{:?}", bounded), "deque([1, 2], maxlen=3)");
    }

    // =========================================================================
    // Stress Tests
    // =========================================================================

    #[test]
    fn test_stress_alternating_operations() {
        let mut d = Deque::new();

        for i in 0..1000 {
            if i % 2 == 0 {
                d.append(i);
            } else {
                d.appendleft(i);
            }
        }

        for _ in 0..500 {
            d.pop().unwrap();
            d.popleft().unwrap();
        }

        assert!(d.is_empty());
    }

    #[test]
    fn test_stress_rotate_full_length() {
        let mut d: Deque<i64> = (0..100).collect();
        d.rotate(100);
        assert_eq!(ints(&d), (0..100).collect::<Vec<_>>());
        assert_eq!(d.stats().rotate_moves, 0);
    }
}
