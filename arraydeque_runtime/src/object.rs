//! Deque objects.
//!
//! A [`DequeRef`] is a shared handle to a deque object: the class it was
//! constructed as plus a `Deque<Value>`. Its methods are the dynamic entry
//! points a host interpreter dispatches to. Values displaced by a method
//! (evicted, popped, overwritten) are dropped only after the object's
//! borrow is released.

use crate::class::DequeClass;
use crate::error::{RuntimeError, RuntimeResult};
use crate::value::{EqPairs, Value, items_eq, write_items};
use arraydeque_core::trace::{Trace, Tracer};
use arraydeque_core::{Deque, DequeError, DequeStats, validate_maxlen};
use rustc_hash::FxHashSet;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

/// Deque object state.
pub struct DequeObject {
    class: Arc<DequeClass>,
    deque: Deque<Value>,
}

impl Trace for DequeObject {
    fn trace(&self, tracer: &mut dyn Tracer) {
        self.deque.trace(tracer);
    }
}

/// Shared handle to a deque object.
#[derive(Clone)]
pub struct DequeRef(Rc<RefCell<DequeObject>>);

/// Weak handle to a deque object.
#[derive(Clone)]
pub struct WeakDeque(Weak<RefCell<DequeObject>>);

impl DequeRef {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Create an empty, unbounded instance of the built-in class.
    pub fn new() -> Self {
        Self::from_parts(DequeClass::base(), Deque::new())
    }

    /// Construct from dynamic arguments: an optional iterable and an
    /// optional bound (`None` or a non-negative integer).
    pub fn construct(
        class: &Arc<DequeClass>,
        iterable: Option<&Value>,
        maxlen: Option<&Value>,
    ) -> RuntimeResult<Self> {
        let maxlen = match maxlen {
            None | Some(Value::None) => None,
            Some(value) => match value.as_int() {
                Some(raw) => Some(validate_maxlen(raw)?),
                None => {
                    return Err(RuntimeError::TypeError(format!(
                        "an integer is required (got type {})",
                        value.type_name()
                    )));
                }
            },
        };
        let items = match iterable {
            None | Some(Value::None) => Vec::new(),
            Some(value) => value.iterate()?,
        };
        Ok(Self::from_parts(
            Arc::clone(class),
            Deque::from_iter_bounded(items, maxlen),
        ))
    }

    pub(crate) fn from_parts(class: Arc<DequeClass>, deque: Deque<Value>) -> Self {
        DequeRef(Rc::new(RefCell::new(DequeObject { class, deque })))
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// The class this object was constructed as.
    pub fn class(&self) -> Arc<DequeClass> {
        Arc::clone(&self.0.borrow().class)
    }

    /// Returns true if this object is an instance of `class` or a subclass.
    pub fn is_instance(&self, class: &DequeClass) -> bool {
        self.0.borrow().class.is_subclass_of(class)
    }

    /// Returns true if both handles point at the same object.
    #[inline]
    pub fn ptr_eq(&self, other: &DequeRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Object address, as reported to tracers.
    #[inline]
    pub fn as_ptr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }

    /// Number of strong handles to this object.
    #[inline]
    pub fn strong_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// Create a weak reference.
    pub fn downgrade(&self) -> WeakDeque {
        WeakDeque(Rc::downgrade(&self.0))
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.0.borrow().deque.len()
    }

    /// Returns true if the deque holds no elements.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().deque.is_empty()
    }

    /// The `maxlen` attribute: `None` or an integer.
    pub fn maxlen(&self) -> Value {
        match self.0.borrow().deque.maxlen() {
            Some(maxlen) => Value::Int(i64::try_from(maxlen).unwrap_or(i64::MAX)),
            None => Value::None,
        }
    }

    pub(crate) fn bound(&self) -> Option<usize> {
        self.0.borrow().deque.maxlen()
    }

    /// Assigning `maxlen` always fails: the bound is fixed at construction.
    pub fn set_maxlen(&self, _value: Value) -> RuntimeResult<()> {
        Err(RuntimeError::AttributeError(format!(
            "attribute 'maxlen' of '{}' objects is not writable",
            self.0.borrow().class.name()
        )))
    }

    /// Engine counters.
    pub fn stats(&self) -> DequeStats {
        *self.0.borrow().deque.stats()
    }

    // =========================================================================
    // End Operations
    // =========================================================================

    /// Add an element to the right end.
    pub fn append(&self, value: Value) {
        let evicted = self.0.borrow_mut().deque.append(value);
        drop(evicted);
    }

    /// Add an element to the left end.
    pub fn appendleft(&self, value: Value) {
        let evicted = self.0.borrow_mut().deque.appendleft(value);
        drop(evicted);
    }

    /// Remove and return the rightmost element.
    pub fn pop(&self) -> RuntimeResult<Value> {
        let popped = self.0.borrow_mut().deque.pop();
        popped.map_err(RuntimeError::from)
    }

    /// Remove and return the leftmost element.
    pub fn popleft(&self) -> RuntimeResult<Value> {
        let popped = self.0.borrow_mut().deque.popleft();
        popped.map_err(RuntimeError::from)
    }

    /// Append every element of an iterable.
    pub fn extend(&self, iterable: &Value) -> RuntimeResult<()> {
        let items = iterable.iterate()?;
        self.extend_values(items);
        Ok(())
    }

    /// Appendleft every element of an iterable (their order ends up reversed).
    pub fn extendleft(&self, iterable: &Value) -> RuntimeResult<()> {
        let items = iterable.iterate()?;
        let mut evicted = Vec::new();
        {
            let mut obj = self.0.borrow_mut();
            for item in items {
                evicted.extend(obj.deque.appendleft(item));
            }
        }
        drop(evicted);
        Ok(())
    }

    pub(crate) fn extend_values(&self, items: Vec<Value>) {
        let mut evicted = Vec::new();
        {
            let mut obj = self.0.borrow_mut();
            for item in items {
                evicted.extend(obj.deque.append(item));
            }
        }
        drop(evicted);
    }

    /// Remove every element.
    pub fn clear(&self) {
        let contents = self.take_contents();
        drop(contents);
    }

    /// Empty the deque, handing its elements to the caller.
    pub(crate) fn take_contents(&self) -> Vec<Value> {
        let mut obj = self.0.borrow_mut();
        let mut contents = Vec::with_capacity(obj.deque.len());
        while let Ok(value) = obj.deque.popleft() {
            contents.push(value);
        }
        obj.deque.clear();
        contents
    }

    /// Rotate right by `steps` (default 1); negative rotates left.
    pub fn rotate(&self, steps: Option<&Value>) -> RuntimeResult<()> {
        let steps = match steps {
            None => 1,
            Some(value) => value.as_int().ok_or_else(|| {
                RuntimeError::TypeError(format!(
                    "'{}' object cannot be interpreted as an integer",
                    value.type_name()
                ))
            })?,
        };
        let steps = isize::try_from(steps).unwrap_or(if steps < 0 { isize::MIN } else { isize::MAX });
        self.0.borrow_mut().deque.rotate(steps);
        Ok(())
    }

    // =========================================================================
    // Subscripting
    // =========================================================================

    /// `d[key]`.
    pub fn getitem(&self, key: &Value) -> RuntimeResult<Value> {
        let obj = self.0.borrow();
        let item = obj.deque.get_item(key.index_key()).cloned();
        item.map_err(RuntimeError::from)
    }

    /// `d[key] = value`.
    pub fn setitem(&self, key: &Value, value: Value) -> RuntimeResult<()> {
        let replaced = self.0.borrow_mut().deque.set_item(key.index_key(), value);
        match replaced {
            Ok(old) => {
                drop(old);
                Ok(())
            }
            Err(DequeError::IndexOutOfRange { .. }) => Err(RuntimeError::IndexError(
                "deque assignment index out of range".to_string(),
            )),
            Err(err) => Err(err.into()),
        }
    }

    /// `del d[key]` is unsupported.
    pub fn delitem(&self, _key: &Value) -> RuntimeResult<()> {
        Err(RuntimeError::TypeError(format!(
            "'{}' object doesn't support item deletion",
            self.0.borrow().class.name()
        )))
    }

    /// Interior insertion is unsupported.
    pub fn insert(&self, _index: &Value, _value: Value) -> RuntimeResult<()> {
        Err(RuntimeError::AttributeError(format!(
            "'{}' object has no attribute 'insert'",
            self.0.borrow().class.name()
        )))
    }

    /// `d * n` is unsupported.
    pub fn mul(&self, other: &Value) -> RuntimeResult<Value> {
        Err(RuntimeError::TypeError(format!(
            "unsupported operand type(s) for *: '{}' and '{}'",
            self.0.borrow().class.name(),
            other.type_name()
        )))
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Remove the first element equal to `value`.
    pub fn remove(&self, value: &Value) -> RuntimeResult<()> {
        let removed = self.0.borrow_mut().deque.remove(value);
        drop(removed?);
        Ok(())
    }

    /// Number of elements equal to `value`.
    pub fn count(&self, value: &Value) -> usize {
        self.0.borrow().deque.count(value)
    }

    /// `value in d`.
    pub fn contains(&self, value: &Value) -> bool {
        self.0.borrow().deque.contains(value)
    }

    /// Logical-order snapshot of the elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().deque.to_vec()
    }

    // =========================================================================
    // Rendering / Tracing
    // =========================================================================

    /// `ClassName([a, b])` or `ClassName([a, b], maxlen=3)`.
    pub fn repr(&self) -> String {
        let mut out = String::new();
        self.write_repr(&mut out, &mut FxHashSet::default());
        out
    }

    pub(crate) fn write_repr(&self, out: &mut String, active: &mut FxHashSet<usize>) {
        let key = self.as_ptr() as usize;
        let obj = match self.0.try_borrow() {
            Ok(obj) if !active.contains(&key) => obj,
            _ => {
                out.push_str("[...]");
                return;
            }
        };
        active.insert(key);
        out.push_str(obj.class.name());
        out.push('(');
        write_items(obj.deque.iter(), out, active);
        if let Some(maxlen) = obj.deque.maxlen() {
            out.push_str(&format!(", maxlen={}", maxlen));
        }
        out.push(')');
        active.remove(&key);
    }

    /// Report every reference the object holds. Returns false if the object
    /// is mid-mutation and could not be inspected.
    pub(crate) fn try_trace(&self, tracer: &mut dyn Tracer) -> bool {
        match self.0.try_borrow() {
            Ok(obj) => {
                obj.trace(tracer);
                true
            }
            Err(_) => false,
        }
    }
}

impl Default for DequeRef {
    fn default() -> Self {
        Self::new()
    }
}

/// Same length and pairwise-equal elements; the bound is ignored.
impl DequeRef {
    /// Element-wise equality, tracking in-progress pairs in `active`.
    pub(crate) fn eq_in(&self, other: &Self, active: &mut EqPairs) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let pair = (self.as_ptr() as usize, other.as_ptr() as usize);
        if !active.insert(pair) {
            return true;
        }
        let eq = match (self.0.try_borrow(), other.0.try_borrow()) {
            (Ok(a), Ok(b)) => items_eq(a.deque.iter(), b.deque.iter(), active),
            _ => false,
        };
        active.remove(&pair);
        eq
    }
}

impl PartialEq for DequeRef {
    fn eq(&self, other: &Self) -> bool {
        self.eq_in(other, &mut EqPairs::default())
    }
}

impl fmt::Debug for DequeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl fmt::Display for DequeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl WeakDeque {
    /// The object, if it is still alive.
    pub fn upgrade(&self) -> Option<DequeRef> {
        self.0.upgrade().map(DequeRef)
    }

    /// Returns true while the object is alive.
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}
