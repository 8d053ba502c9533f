//! Dynamic values.
//!
//! Scalars are held inline. Containers (`List`, `Deque`) are shared,
//! interior-mutable objects: cloning a `Value` clones the reference, not the
//! contents, and two values can be compared for identity.

use crate::error::{RuntimeError, RuntimeResult};
use crate::object::DequeRef;
use arraydeque_core::IndexKey;
use arraydeque_core::trace::{Trace, Tracer};
use rustc_hash::FxHashSet;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared, mutable list object.
pub type ListRef = Rc<RefCell<Vec<Value>>>;

/// A dynamically-typed value.
#[derive(Clone)]
pub enum Value {
    /// The `None` singleton.
    None,
    /// Boolean; compares equal to the integers 0 and 1.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Float.
    Float(f64),
    /// Immutable string.
    Str(Rc<str>),
    /// Mutable list (shared).
    List(ListRef),
    /// Slice object, as produced by `x[start:stop]`.
    Slice {
        /// Start bound.
        start: Option<i64>,
        /// Stop bound.
        stop: Option<i64>,
    },
    /// Deque object (shared).
    Deque(DequeRef),
}

impl Value {
    /// Create a string value.
    pub fn str(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    /// Create a new list object.
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    /// Create a slice value.
    pub fn slice(start: Option<i64>, stop: Option<i64>) -> Self {
        Value::Slice { start, stop }
    }

    /// The type name shown in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Slice { .. } => "slice",
            Value::Deque(_) => "deque",
        }
    }

    /// Returns true for `None`.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Integer view; booleans count as 0 and 1.
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Lower this value into an index key for subscripting.
    pub fn index_key(&self) -> IndexKey {
        match self {
            Value::Slice { .. } => IndexKey::Slice,
            other => match other.as_int() {
                Some(i) => IndexKey::Int(i),
                None => IndexKey::Other(other.type_name()),
            },
        }
    }

    /// Address of the shared object, for containers.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::List(list) => Some(Rc::as_ptr(list) as *const () as usize),
            Value::Deque(deque) => Some(deque.as_ptr() as usize),
            _ => None,
        }
    }

    /// Materialize the elements of an iterable value.
    ///
    /// The snapshot is taken before any caller mutation, so a container can
    /// safely be extended by itself.
    pub fn iterate(&self) -> RuntimeResult<Vec<Value>> {
        match self {
            Value::List(list) => Ok(list.borrow().clone()),
            Value::Deque(deque) => Ok(deque.to_vec()),
            Value::Str(s) => Ok(s.chars().map(|c| Value::Str(Rc::from(c.to_string()))).collect()),
            other => Err(RuntimeError::TypeError(format!(
                "'{}' object is not iterable",
                other.type_name()
            ))),
        }
    }

    /// Developer-facing rendering.
    pub fn repr(&self) -> String {
        let mut out = String::new();
        self.write_repr(&mut out, &mut FxHashSet::default());
        out
    }

    /// Render into `out`. `active` holds the containers currently being
    /// rendered, so a container that reaches itself prints as `[...]`.
    pub(crate) fn write_repr(&self, out: &mut String, active: &mut FxHashSet<usize>) {
        match self {
            Value::None => out.push_str("None"),
            Value::Bool(true) => out.push_str("True"),
            Value::Bool(false) => out.push_str("False"),
            Value::Int(i) => out.push_str(&i.to_string()),
            Value::Float(x) => out.push_str(&format!("{:?}", x)),
            Value::Str(s) => {
                out.push('\'');
                out.push_str(s);
                out.push('\'');
            }
            Value::List(list) => {
                let key = Rc::as_ptr(list) as *const () as usize;
                let items = match list.try_borrow() {
                    Ok(items) if !active.contains(&key) => items,
                    _ => {
                        out.push_str("[...]");
                        return;
                    }
                };
                active.insert(key);
                write_items(items.iter(), out, active);
                active.remove(&key);
            }
            Value::Slice { start, stop } => {
                let bound = |b: &Option<i64>| b.map_or("None".to_string(), |i| i.to_string());
                out.push_str(&format!("slice({}, {}, None)", bound(start), bound(stop)));
            }
            Value::Deque(deque) => deque.write_repr(out, active),
        }
    }
}

/// Render `[a, b, c]`.
pub(crate) fn write_items<'a>(
    items: impl Iterator<Item = &'a Value>,
    out: &mut String,
    active: &mut FxHashSet<usize>,
) {
    out.push('[');
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        item.write_repr(out, active);
    }
    out.push(']');
}

/// Containers currently being compared, as `(left, right)` address pairs.
pub(crate) type EqPairs = FxHashSet<(usize, usize)>;

/// Element-wise comparison of two sequences.
pub(crate) fn items_eq<'a, 'b>(
    a: impl ExactSizeIterator<Item = &'a Value>,
    b: impl ExactSizeIterator<Item = &'b Value>,
    active: &mut EqPairs,
) -> bool {
    a.len() == b.len() && a.zip(b).all(|(x, y)| x.eq_in(y, active))
}

/// Exact int/float comparison; no rounding of large integers.
fn int_float_eq(i: i64, x: f64) -> bool {
    // i64::MIN is exactly -2^63, so [-2^63, 2^63) is the convertible range.
    let bound = -(i64::MIN as f64);
    x.fract() == 0.0 && x >= -bound && x < bound && x as i64 == i
}

impl Value {
    /// Structural equality. A container pair already in `active` compares
    /// equal, so cyclic graphs terminate.
    pub(crate) fn eq_in(&self, other: &Self, active: &mut EqPairs) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                int_float_eq(*a, *b)
            }
            (Value::Bool(a), Value::Float(b)) | (Value::Float(b), Value::Bool(a)) => {
                int_float_eq(i64::from(*a), *b)
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let pair = (
                    Rc::as_ptr(a) as *const () as usize,
                    Rc::as_ptr(b) as *const () as usize,
                );
                if !active.insert(pair) {
                    return true;
                }
                let eq = match (a.try_borrow(), b.try_borrow()) {
                    (Ok(a), Ok(b)) => items_eq(a.iter(), b.iter(), active),
                    // A list being mutated is mid-operation; treat it as unequal.
                    _ => false,
                };
                active.remove(&pair);
                eq
            }
            (
                Value::Slice { start, stop },
                Value::Slice {
                    start: other_start,
                    stop: other_stop,
                },
            ) => start == other_start && stop == other_stop,
            (Value::Deque(a), Value::Deque(b)) => a.eq_in(b, active),
            _ => match (self.as_int(), other.as_int()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

/// Structural equality, short-circuiting on identity for containers.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.eq_in(other, &mut EqPairs::default())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            other => f.write_str(&other.repr()),
        }
    }
}

/// Containers report the shared object they point at; scalars hold nothing.
impl Trace for Value {
    fn trace(&self, tracer: &mut dyn Tracer) {
        match self {
            Value::List(list) => list.trace(tracer),
            Value::Deque(deque) => tracer.trace_ptr(deque.as_ptr()),
            _ => {}
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<DequeRef> for Value {
    fn from(deque: DequeRef) -> Self {
        Value::Deque(deque)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}
