//! Tracer interface for element-graph traversal.

/// Visitor for the references an object holds.
///
/// A cycle-aware collector calls [`Trace::trace`](super::Trace::trace) on
/// each container it tracks; the container reports every reference it holds
/// through this interface.
///
/// # Example
///
/// ```
/// use arraydeque_core::trace::Tracer;
///
/// struct Worklist(Vec<usize>);
///
/// impl Tracer for Worklist {
///     fn trace_ptr(&mut self, ptr: *const ()) {
///         if !ptr.is_null() {
///             self.0.push(ptr as usize);
///         }
///     }
/// }
/// ```
pub trait Tracer {
    /// Report a reference to a shared object.
    ///
    /// Only the address is used; the tracer never dereferences it. Null
    /// pointers are ignored.
    fn trace_ptr(&mut self, ptr: *const ());
}

/// A tracer that does nothing.
pub struct NullTracer;

impl Tracer for NullTracer {
    #[inline]
    fn trace_ptr(&mut self, _ptr: *const ()) {}
}

/// A counting tracer for debugging and statistics.
#[derive(Debug, Default)]
pub struct CountingTracer {
    /// Number of non-null references traced.
    pub count: usize,
}

impl CountingTracer {
    /// Create a new counting tracer.
    pub fn new() -> Self {
        Self { count: 0 }
    }
}

impl Tracer for CountingTracer {
    fn trace_ptr(&mut self, ptr: *const ()) {
        if !ptr.is_null() {
            self.count += 1;
        }
    }
}

/// Collects every traced address, in traversal order.
#[derive(Debug, Default)]
pub struct CollectingTracer {
    /// Addresses seen so far.
    pub addresses: Vec<usize>,
}

impl Tracer for CollectingTracer {
    fn trace_ptr(&mut self, ptr: *const ()) {
        if !ptr.is_null() {
            self.addresses.push(ptr as usize);
        }
    }
}
