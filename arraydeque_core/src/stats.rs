//! Deque statistics.
//!
//! Counts the expensive events behind the amortized guarantees so callers
//! and tests can check them over a sequence of operations.

/// Statistics about a deque's internal work.
///
/// Counters are plain integers: a deque is only ever mutated through
/// `&mut self`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DequeStats {
    // =========================================================================
    // Capacity Statistics
    // =========================================================================
    /// Number of reflows that doubled the slot array.
    pub grows: u64,
    /// Number of reflows that halved the slot array.
    pub shrinks: u64,
    /// Total elements moved by reflows (grow and shrink).
    pub reflow_moves: u64,

    // =========================================================================
    // Policy Statistics
    // =========================================================================
    /// Elements discarded by the bounded eviction policy.
    pub evictions: u64,
    /// Total elements moved by rotations.
    pub rotate_moves: u64,
}

impl DequeStats {
    /// Create new empty statistics.
    pub const fn new() -> Self {
        Self {
            grows: 0,
            shrinks: 0,
            reflow_moves: 0,
            evictions: 0,
            rotate_moves: 0,
        }
    }

    /// Record a grow reflow that moved `moved` elements.
    #[inline]
    pub fn record_grow(&mut self, moved: usize) {
        self.grows += 1;
        self.reflow_moves += moved as u64;
    }

    /// Record a shrink reflow that moved `moved` elements.
    #[inline]
    pub fn record_shrink(&mut self, moved: usize) {
        self.shrinks += 1;
        self.reflow_moves += moved as u64;
    }

    /// Record one bounded eviction.
    #[inline]
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Record element moves performed by a rotation.
    #[inline]
    pub fn record_rotation(&mut self, moved: usize) {
        self.rotate_moves += moved as u64;
    }

    /// Total reflows of either kind.
    #[inline]
    pub fn reflows(&self) -> u64 {
        self.grows + self.shrinks
    }

    /// Reset all counters.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
