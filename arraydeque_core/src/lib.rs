//! Array-backed double-ended queue.
//!
//! A deque stored in one contiguous, power-of-two ring of slots instead of a
//! chain of blocks. Both ends push and pop in amortized O(1), any logical
//! index is reachable in O(1), and the slot array grows and shrinks with the
//! live length.
//!
//! # Architecture
//!
//! - **Index translation** ([`index`]): signed logical index to physical slot.
//! - **Circular storage**: the slot array, head offset, and live length.
//! - **Capacity manager**: doubling on overflow, halving at low occupancy,
//!   both via a reflow that copies the live window to slot 0.
//! - **Bounded eviction**: a full deque with a `maxlen` discards from the
//!   opposite end on every push.
//! - **Rotation**: `rotate(k)` reduced modulo the length and performed in the
//!   cheaper direction, with no reflow.
//! - **Tracing hook** ([`trace`]): lets an external collector enumerate the
//!   references a deque holds.
//!
//! # Usage
//!
//! ```
//! use arraydeque_core::{Deque, DequeError};
//!
//! let mut d: Deque<char> = "abcde".chars().collect();
//! d.rotate(1);
//! assert_eq!(d.iter().collect::<String>(), "eabcd");
//!
//! assert_eq!(d.popleft(), Ok('e'));
//! d.clear();
//! assert_eq!(d.pop(), Err(DequeError::Empty));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod index;
pub mod trace;

mod capacity;
mod deque;
mod eviction;
mod factory;
mod iter;
mod rotate;
#[cfg(feature = "serde")]
mod serde_impl;
mod stats;
mod storage;

// Re-exports for convenient access
pub use config::{ConfigError, DequeConfig};
pub use deque::Deque;
pub use error::{DequeError, DequeResult};
pub use eviction::validate_maxlen;
pub use factory::{DequeFactory, PlainDeque};
pub use index::IndexKey;
pub use iter::{IntoIter, Iter, IterMut};
pub use stats::DequeStats;
pub use trace::{Trace, Tracer};
