//! Dynamic object layer for arraydeque.
//!
//! Wraps the generic [`arraydeque_core::Deque`] in the shape a dynamic
//! language runtime expects: values of any type, shared deque objects with
//! a class, subclassing, copy/deepcopy, reduction for persistence, weak
//! references, and a cycle collector for containers that reference
//! themselves.
//!
//! # Usage
//!
//! ```
//! use arraydeque_runtime::{DequeClass, RuntimeError, Value};
//!
//! let d = DequeClass::base()
//!     .instantiate(Some(&Value::str("abc")), Some(&Value::Int(3)))
//!     .unwrap();
//! d.append(Value::str("d"));
//! assert_eq!(d.repr(), "deque(['b', 'c', 'd'], maxlen=3)");
//!
//! assert!(matches!(
//!     d.getitem(&Value::str("0")),
//!     Err(RuntimeError::TypeError(_))
//! ));
//! ```
//!
//! # Threading
//!
//! Objects use `Rc`/`RefCell` and stay on the thread that created them.
//! Only classes (and the class registry) are shared across threads.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod class;
pub mod copy;
pub mod error;
pub mod heap;
pub mod object;
pub mod value;

// Re-exports for convenient access
pub use class::{ClassRegistry, DequeClass, global_registry};
pub use copy::{DeepCopier, Reduced};
pub use error::{RuntimeError, RuntimeResult};
pub use heap::{Heap, HeapStats};
pub use object::{DequeRef, WeakDeque};
pub use value::{ListRef, Value};
