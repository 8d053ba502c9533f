//! Reference traversal for cycle collection.
//!
//! Elements of a deque may reference each other (or the deque itself)
//! through shared pointers. The engine does no cycle detection of its own;
//! instead every container implements [`Trace`] so an external collector can
//! enumerate the references it holds and work out reachability.

pub mod tracer;

pub use tracer::{CollectingTracer, CountingTracer, NullTracer, Tracer};

use crate::deque::Deque;
use std::rc::Rc;
use std::sync::Arc;

/// Types that can report the shared references they hold.
///
/// Implementations must report every shared reference they own, exactly
/// once per call. Owned (non-shared) children are traced recursively;
/// shared pointers are reported by address and not followed, since
/// following them is the collector's job.
pub trait Trace {
    /// Visit all shared references held by this object.
    fn trace(&self, tracer: &mut dyn Tracer);

    /// Approximate heap footprint in bytes (for statistics).
    ///
    /// Default: size_of::<Self>()
    #[inline]
    fn size_of(&self) -> usize
    where
        Self: Sized,
    {
        std::mem::size_of::<Self>()
    }
}

// =============================================================================
// Trace implementations for primitives
// =============================================================================

macro_rules! impl_trace_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Trace for $ty {
                #[inline]
                fn trace(&self, _tracer: &mut dyn Tracer) {}
            }
        )*
    };
}

impl_trace_leaf!(
    (), bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    &'static str,
);

impl Trace for String {
    #[inline]
    fn trace(&self, _tracer: &mut dyn Tracer) {}

    #[inline]
    fn size_of(&self) -> usize {
        std::mem::size_of::<String>() + self.capacity()
    }
}

// =============================================================================
// Trace implementations for containers
// =============================================================================

impl<T: Trace> Trace for Vec<T> {
    fn trace(&self, tracer: &mut dyn Tracer) {
        for item in self {
            item.trace(tracer);
        }
    }

    fn size_of(&self) -> usize {
        std::mem::size_of::<Vec<T>>() + self.capacity() * std::mem::size_of::<T>()
    }
}

impl<T: Trace> Trace for Option<T> {
    fn trace(&self, tracer: &mut dyn Tracer) {
        if let Some(inner) = self {
            inner.trace(tracer);
        }
    }
}

impl<T: Trace> Trace for Box<T> {
    fn trace(&self, tracer: &mut dyn Tracer) {
        (**self).trace(tracer);
    }

    fn size_of(&self) -> usize {
        std::mem::size_of::<Box<T>>() + (**self).size_of()
    }
}

/// Shared pointers are references: report the address, don't descend.
impl<T> Trace for Rc<T> {
    #[inline]
    fn trace(&self, tracer: &mut dyn Tracer) {
        tracer.trace_ptr(Rc::as_ptr(self) as *const ());
    }
}

impl<T> Trace for Arc<T> {
    #[inline]
    fn trace(&self, tracer: &mut dyn Tracer) {
        tracer.trace_ptr(Arc::as_ptr(self) as *const ());
    }
}

impl<T: Trace> Trace for Deque<T> {
    fn trace(&self, tracer: &mut dyn Tracer) {
        for item in self.iter() {
            item.trace(tracer);
        }
    }

    fn size_of(&self) -> usize {
        std::mem::size_of::<Deque<T>>() + self.capacity() * std::mem::size_of::<Option<T>>()
    }
}
