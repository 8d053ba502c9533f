//! Duplication and persistence.
//!
//! - `shallow_copy`: new object of the same class and bound, sharing the
//!   element references.
//! - `deep_copy`: recursively copies containers. A memo keyed by object
//!   identity makes shared references stay shared and cycles stay cycles.
//! - `reduce`: the constructor arguments (class, items, bound) needed to
//!   rebuild an equal object later.

use crate::class::DequeClass;
use crate::object::DequeRef;
use crate::value::{ListRef, Value};
use arraydeque_core::{Deque, DequeFactory};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

// =============================================================================
// Reduction
// =============================================================================

/// Constructor arguments that rebuild a deque object.
#[derive(Debug, Clone)]
pub struct Reduced {
    /// Class to instantiate.
    pub class: Arc<DequeClass>,
    /// Elements in logical order.
    pub items: Vec<Value>,
    /// Bound, if any.
    pub maxlen: Option<usize>,
}

impl Reduced {
    /// Rebuild through the class's constructor.
    pub fn rebuild(self) -> DequeRef {
        self.class.construct(self.items, self.maxlen)
    }
}

impl DequeRef {
    /// Capture the constructor arguments for this object.
    pub fn reduce(&self) -> Reduced {
        Reduced {
            class: self.class(),
            items: self.to_vec(),
            maxlen: self.bound(),
        }
    }

    /// New object of the same class and bound holding the same element
    /// references.
    pub fn shallow_copy(&self) -> DequeRef {
        let class = self.class();
        class.construct(self.to_vec(), self.bound())
    }

    /// Recursive copy.
    pub fn deep_copy(&self) -> DequeRef {
        DeepCopier::new().copy_deque(self)
    }
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Memoized recursive copier.
///
/// One copier can be reused across several roots so that objects shared
/// between them are copied once.
#[derive(Default)]
pub struct DeepCopier {
    /// Original identity -> copy.
    memo: FxHashMap<usize, Value>,
}

impl DeepCopier {
    /// Create a copier with an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy any value. Scalars are immutable and returned as-is.
    pub fn copy_value(&mut self, value: &Value) -> Value {
        match value {
            Value::List(list) => Value::List(self.copy_list(list)),
            Value::Deque(deque) => Value::Deque(self.copy_deque(deque)),
            other => other.clone(),
        }
    }

    /// Copy a deque object and everything reachable from it.
    pub fn copy_deque(&mut self, deque: &DequeRef) -> DequeRef {
        let key = deque.as_ptr() as usize;
        if let Some(Value::Deque(done)) = self.memo.get(&key) {
            return done.clone();
        }

        // Register the empty copy first so cycles back to `deque` resolve to it.
        let copy = DequeRef::from_parts(
            deque.class(),
            Deque::from_iter_bounded(std::iter::empty(), deque.bound()),
        );
        self.memo.insert(key, Value::Deque(copy.clone()));

        let items: Vec<Value> = deque.to_vec().iter().map(|v| self.copy_value(v)).collect();
        copy.extend_values(items);
        copy
    }

    fn copy_list(&mut self, list: &ListRef) -> ListRef {
        let key = Rc::as_ptr(list) as *const () as usize;
        if let Some(Value::List(done)) = self.memo.get(&key) {
            return Rc::clone(done);
        }

        let copy: ListRef = Rc::new(RefCell::new(Vec::new()));
        self.memo.insert(key, Value::List(Rc::clone(&copy)));

        let snapshot = list.borrow().clone();
        let items: Vec<Value> = snapshot.iter().map(|v| self.copy_value(v)).collect();
        *copy.borrow_mut() = items;
        copy
    }
}
