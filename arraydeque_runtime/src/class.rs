//! Deque classes and the class registry.
//!
//! Every deque object carries the class it was constructed as. Subclasses
//! are named variants with a base chain; anything that duplicates or
//! rebuilds a deque goes through the class's [`DequeFactory`] impl, so the
//! copy is an instance of the same variant.
//!
//! # Architecture
//!
//! ```text
//! ClassRegistry (global)
//! └── RwLock<FxHashMap<name, Arc<DequeClass>>>
//!
//! DequeClass
//! ├── name: String
//! └── bases: SmallVec<[Arc<DequeClass>; 2]>
//! ```

use crate::error::{RuntimeError, RuntimeResult};
use crate::object::DequeRef;
use crate::value::Value;
use arraydeque_core::{Deque, DequeFactory};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Name of the built-in deque class.
pub const BASE_CLASS_NAME: &str = "deque";

// =============================================================================
// DequeClass
// =============================================================================

/// A deque variant.
pub struct DequeClass {
    name: String,
    bases: SmallVec<[Arc<DequeClass>; 2]>,
}

impl DequeClass {
    /// The built-in deque class.
    pub fn base() -> Arc<DequeClass> {
        static BASE: OnceLock<Arc<DequeClass>> = OnceLock::new();
        Arc::clone(BASE.get_or_init(|| {
            Arc::new(DequeClass {
                name: BASE_CLASS_NAME.to_string(),
                bases: SmallVec::new(),
            })
        }))
    }

    /// Class name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct base classes.
    #[inline]
    pub fn bases(&self) -> &[Arc<DequeClass>] {
        &self.bases
    }

    /// Returns true if `self` is `other` or derives from it.
    pub fn is_subclass_of(&self, other: &DequeClass) -> bool {
        std::ptr::eq(self, other) || self.bases.iter().any(|base| base.is_subclass_of(other))
    }

    /// Construct an instance of this class from dynamic arguments.
    pub fn instantiate(
        self: &Arc<Self>,
        iterable: Option<&Value>,
        maxlen: Option<&Value>,
    ) -> RuntimeResult<DequeRef> {
        DequeRef::construct(self, iterable, maxlen)
    }
}

impl fmt::Debug for DequeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DequeClass")
            .field("name", &self.name)
            .field(
                "bases",
                &self.bases.iter().map(|b| b.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Copies and reconstructions produce an instance of the same class.
impl DequeFactory<Value> for Arc<DequeClass> {
    type Output = DequeRef;

    fn construct(&self, source: Vec<Value>, maxlen: Option<usize>) -> DequeRef {
        DequeRef::from_parts(Arc::clone(self), Deque::from_iter_bounded(source, maxlen))
    }
}

// =============================================================================
// ClassRegistry
// =============================================================================

/// Name-to-class registry.
pub struct ClassRegistry {
    classes: RwLock<FxHashMap<String, Arc<DequeClass>>>,
}

impl ClassRegistry {
    /// Create a registry holding only the built-in class.
    pub fn new() -> Self {
        let mut classes = FxHashMap::default();
        classes.insert(BASE_CLASS_NAME.to_string(), DequeClass::base());
        Self {
            classes: RwLock::new(classes),
        }
    }

    /// Define a new subclass. With no bases, the class derives directly
    /// from the built-in deque.
    pub fn define(&self, name: &str, bases: &[Arc<DequeClass>]) -> RuntimeResult<Arc<DequeClass>> {
        let mut classes = self.classes.write();
        if classes.contains_key(name) {
            return Err(RuntimeError::ValueError(format!(
                "class '{}' is already defined",
                name
            )));
        }

        let bases: SmallVec<[Arc<DequeClass>; 2]> = if bases.is_empty() {
            smallvec::smallvec![DequeClass::base()]
        } else {
            bases.iter().cloned().collect()
        };
        let class = Arc::new(DequeClass {
            name: name.to_string(),
            bases,
        });
        classes.insert(name.to_string(), Arc::clone(&class));
        tracing::debug!("defined deque class '{}'", name);
        Ok(class)
    }

    /// Look up a class by name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<Arc<DequeClass>> {
        self.classes.read().get(name).cloned()
    }

    /// Number of registered classes, including the built-in one.
    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Global Registry Access
// =============================================================================

/// Global class registry singleton.
static GLOBAL_REGISTRY: OnceLock<ClassRegistry> = OnceLock::new();

/// Get the global class registry.
pub fn global_registry() -> &'static ClassRegistry {
    GLOBAL_REGISTRY.get_or_init(ClassRegistry::new)
}
