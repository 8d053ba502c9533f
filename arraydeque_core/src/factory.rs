//! Variant-aware construction.
//!
//! Duplication and reconstruction sometimes need "a new instance of the same
//! runtime variant". The engine stays variant-agnostic: a binding layer
//! supplies a [`DequeFactory`] that knows which variant to build, and the
//! engine hands it the constructor arguments (source elements and bound).

use crate::deque::Deque;

/// Builds a deque-like object from a source sequence and an optional bound.
///
/// Implementations must honor the ordinary constructor contract: elements
/// are appended in source order and, when bounded, only the trailing
/// `maxlen` elements are retained.
pub trait DequeFactory<T> {
    /// The object produced.
    type Output;

    /// Construct a new instance.
    fn construct(&self, source: Vec<T>, maxlen: Option<usize>) -> Self::Output;
}

/// Factory producing plain [`Deque`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainDeque;

impl<T> DequeFactory<T> for PlainDeque {
    type Output = Deque<T>;

    fn construct(&self, source: Vec<T>, maxlen: Option<usize>) -> Deque<T> {
        Deque::from_iter_bounded(source, maxlen)
    }
}
