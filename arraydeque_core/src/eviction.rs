//! Bounded eviction policy.
//!
//! A deque with a `maxlen` that is already full makes room for a push at
//! one end by discarding the element at the opposite end. A `maxlen` of
//! zero stores nothing: the pushed value is handed straight back.

use crate::error::{DequeError, DequeResult};

/// What a push must do before writing its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Admission {
    /// Room available, write directly.
    Insert,
    /// Bounded and full: discard the element at the opposite end first.
    EvictOpposite,
    /// Bound is zero: drop the push entirely.
    Reject,
}

/// Decide how a push is admitted under an optional bound.
#[inline]
pub(crate) fn admit(maxlen: Option<usize>, len: usize) -> Admission {
    match maxlen {
        None => Admission::Insert,
        Some(0) => Admission::Reject,
        Some(maxlen) if len >= maxlen => Admission::EvictOpposite,
        Some(_) => Admission::Insert,
    }
}

/// Validate a signed bound supplied by a dynamic caller.
///
/// ```
/// use arraydeque_core::{validate_maxlen, DequeError};
///
/// assert_eq!(validate_maxlen(5), Ok(5));
/// assert!(matches!(validate_maxlen(-1), Err(DequeError::InvalidArgument(_))));
/// ```
pub fn validate_maxlen(raw: i64) -> DequeResult<usize> {
    usize::try_from(raw)
        .map_err(|_| DequeError::InvalidArgument("maxlen must be non-negative".to_string()))
}
