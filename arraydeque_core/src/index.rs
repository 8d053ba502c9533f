//! Logical-to-physical index translation.
//!
//! Logical index `i` (negative counts from the tail) maps to physical slot
//! `(head + i) mod capacity`. Capacity is always a power of two, so the
//! modulo is a mask.

use crate::error::{DequeError, DequeResult};
use std::ops::{Range, RangeFull};

/// A dynamically-typed index argument.
///
/// Bindings for dynamic languages lower their key objects into an
/// `IndexKey` so the type check happens here, before any arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKey {
    /// An integer index, possibly negative.
    Int(i64),
    /// A slice or range. Deques do not support slicing.
    Slice,
    /// Any other key; carries the key's type name for the error message.
    Other(&'static str),
}

impl IndexKey {
    /// Extract the integer index, rejecting every non-integer key.
    #[inline]
    pub fn as_int(self) -> DequeResult<i64> {
        match self {
            IndexKey::Int(i) => Ok(i),
            IndexKey::Slice => Err(DequeError::WrongIndexType("slice")),
            IndexKey::Other(type_name) => Err(DequeError::WrongIndexType(type_name)),
        }
    }
}

impl From<i64> for IndexKey {
    #[inline]
    fn from(i: i64) -> Self {
        IndexKey::Int(i)
    }
}

impl From<i32> for IndexKey {
    #[inline]
    fn from(i: i32) -> Self {
        IndexKey::Int(i64::from(i))
    }
}

impl From<isize> for IndexKey {
    #[inline]
    fn from(i: isize) -> Self {
        IndexKey::Int(i as i64)
    }
}

impl From<usize> for IndexKey {
    #[inline]
    fn from(i: usize) -> Self {
        // Anything past i64::MAX is out of range for every deque anyway.
        IndexKey::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<Range<i64>> for IndexKey {
    #[inline]
    fn from(_: Range<i64>) -> Self {
        IndexKey::Slice
    }
}

impl From<RangeFull> for IndexKey {
    #[inline]
    fn from(_: RangeFull) -> Self {
        IndexKey::Slice
    }
}

/// Remap a possibly negative index into `[0, len)`.
#[inline]
pub fn normalize(index: i64, len: usize) -> DequeResult<usize> {
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let normalized = if index < 0 { index + len_i } else { index };

    if (0..len_i).contains(&normalized) {
        Ok(normalized as usize)
    } else {
        Err(DequeError::IndexOutOfRange { index, len })
    }
}

/// Physical slot of an in-range logical position.
#[inline(always)]
pub fn physical(logical: usize, head: usize, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    head.wrapping_add(logical) & (capacity - 1)
}

/// Physical slot `offset` positions before `slot`, wrapping.
#[inline(always)]
pub fn wrap_sub(slot: usize, offset: usize, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    slot.wrapping_sub(offset) & (capacity - 1)
}

/// Translate a signed logical index into a physical slot.
#[inline]
pub fn translate(index: i64, head: usize, len: usize, capacity: usize) -> DequeResult<usize> {
    let logical = normalize(index, len)?;
    Ok(physical(logical, head, capacity))
}
