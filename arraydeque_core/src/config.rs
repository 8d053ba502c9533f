//! Deque configuration parameters.
//!
//! The capacity policy is tunable; defaults follow the conventional
//! doubling / quarter-occupancy scheme.

/// Configuration for a deque instance.
///
/// # Example
///
/// ```
/// use arraydeque_core::{Deque, DequeConfig};
///
/// // Bounded deque that never gives memory back
/// let config = DequeConfig {
///     maxlen: Some(64),
///     shrink_divisor: 0,
///     ..Default::default()
/// };
/// let d: Deque<u32> = Deque::with_config(config).unwrap();
/// assert_eq!(d.maxlen(), Some(64));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DequeConfig {
    // =========================================================================
    // Capacity
    // =========================================================================
    /// Smallest slot array the deque will ever hold.
    ///
    /// Must be a power of two. Shrinking never goes below this floor and
    /// `clear()` resets the array to it.
    ///
    /// Default: 8
    pub min_capacity: usize,

    /// Occupancy divisor that triggers a shrink.
    ///
    /// After a removal, when `len <= capacity / shrink_divisor` the capacity
    /// is halved. Must be at least 3 so a halved array keeps headroom for
    /// further pushes. Set to 0 to disable shrinking.
    ///
    /// Default: 4
    pub shrink_divisor: usize,

    // =========================================================================
    // Bound
    // =========================================================================
    /// Maximum length, `None` for unbounded. Fixed for the deque's lifetime.
    ///
    /// Default: None
    pub maxlen: Option<usize>,
}

impl Default for DequeConfig {
    fn default() -> Self {
        Self {
            min_capacity: 8,
            shrink_divisor: 4,
            maxlen: None,
        }
    }
}

impl DequeConfig {
    /// Configuration for a bounded deque with default capacity policy.
    pub fn bounded(maxlen: usize) -> Self {
        Self {
            maxlen: Some(maxlen),
            ..Default::default()
        }
    }

    /// Configuration that keeps memory tight for many small deques.
    pub fn compact() -> Self {
        Self {
            min_capacity: 4,
            shrink_divisor: 4,
            ..Default::default()
        }
    }

    /// Configuration for long-lived queues with bursty traffic.
    ///
    /// A larger floor and no shrinking avoid reflow churn.
    pub fn throughput() -> Self {
        Self {
            min_capacity: 64,
            shrink_divisor: 0,
            ..Default::default()
        }
    }

    /// Returns true if the capacity policy may shrink the slot array.
    #[inline]
    pub fn shrink_enabled(&self) -> bool {
        self.shrink_divisor != 0
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_capacity == 0 || !self.min_capacity.is_power_of_two() {
            return Err(ConfigError::InvalidMinCapacity);
        }
        if matches!(self.shrink_divisor, 1 | 2) {
            return Err(ConfigError::InvalidShrinkDivisor);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Minimum capacity must be a non-zero power of two.
    InvalidMinCapacity,
    /// Shrink divisor must be 0 (disabled) or at least 3.
    InvalidShrinkDivisor,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidMinCapacity => {
                write!(f, "minimum capacity must be a non-zero power of two")
            }
            ConfigError::InvalidShrinkDivisor => {
                write!(f, "shrink divisor must be 0 (disabled) or at least 3")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
