//! Cycle collector for container objects.
//!
//! Reference counting frees acyclic garbage on its own. Containers that
//! reference each other (or themselves) keep their counts above zero after
//! the last outside handle is gone; the [`Heap`] finds and breaks those
//! cycles.
//!
//! # Algorithm
//!
//! Reference subtraction over the tracked set:
//!
//! 1. `gc_refs[o] = strong_count(o)` minus the collector's own handle.
//! 2. For every edge `a -> b` between tracked objects, `gc_refs[b] -= 1`.
//!    What remains counts references from outside the tracked set.
//! 3. Objects with `gc_refs > 0` are roots; everything reachable from a root
//!    survives.
//! 4. The rest is unreachable: its contents are taken out, which breaks
//!    the cycles and lets reference counting free the objects.
//!
//! The heap holds weak handles only, so tracking never extends a lifetime.

use crate::object::{DequeRef, WeakDeque};
use crate::value::{ListRef, Value};
use arraydeque_core::trace::{CollectingTracer, Trace};
use rustc_hash::FxHashMap;
use std::rc::{Rc, Weak};

/// Weak handle to a tracked container.
enum Tracked {
    List(Weak<std::cell::RefCell<Vec<Value>>>),
    Deque(WeakDeque),
}

impl Tracked {
    fn upgrade(&self) -> Option<Node> {
        match self {
            Tracked::List(weak) => weak.upgrade().map(Node::List),
            Tracked::Deque(weak) => weak.upgrade().map(Node::Deque),
        }
    }
}

/// Live handle held for the duration of one collection.
enum Node {
    List(ListRef),
    Deque(DequeRef),
}

impl Node {
    fn addr(&self) -> usize {
        match self {
            Node::List(list) => Rc::as_ptr(list) as *const () as usize,
            Node::Deque(deque) => deque.as_ptr() as usize,
        }
    }

    fn strong_count(&self) -> usize {
        match self {
            Node::List(list) => Rc::strong_count(list),
            Node::Deque(deque) => deque.strong_count(),
        }
    }

    /// Outgoing references, or `None` if the object is mid-mutation.
    fn edges(&self) -> Option<Vec<usize>> {
        let mut tracer = CollectingTracer::default();
        match self {
            Node::List(list) => list.try_borrow().ok()?.trace(&mut tracer),
            Node::Deque(deque) => {
                if !deque.try_trace(&mut tracer) {
                    return None;
                }
            }
        }
        Some(tracer.addresses)
    }

    fn take_contents(&self) -> Vec<Value> {
        match self {
            Node::List(list) => std::mem::take(&mut *list.borrow_mut()),
            Node::Deque(deque) => deque.take_contents(),
        }
    }
}

/// Collection counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapStats {
    /// Number of `collect` calls.
    pub collections: u64,
    /// Total objects found unreachable and cleared.
    pub reclaimed: u64,
}

/// Registry of container objects subject to cycle collection.
#[derive(Default)]
pub struct Heap {
    tracked: Vec<Tracked>,
    stats: HeapStats,
}

impl Heap {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a deque object.
    pub fn track_deque(&mut self, deque: &DequeRef) {
        self.tracked.push(Tracked::Deque(deque.downgrade()));
    }

    /// Track a list object.
    pub fn track_list(&mut self, list: &ListRef) {
        self.tracked.push(Tracked::List(Rc::downgrade(list)));
    }

    /// Track a value if it is a container; scalars are ignored.
    pub fn track(&mut self, value: &Value) {
        match value {
            Value::List(list) => self.track_list(list),
            Value::Deque(deque) => self.track_deque(deque),
            _ => {}
        }
    }

    /// Number of tracked objects still alive.
    pub fn live(&self) -> usize {
        self.tracked
            .iter()
            .filter(|t| match t {
                Tracked::List(weak) => weak.strong_count() > 0,
                Tracked::Deque(weak) => weak.is_alive(),
            })
            .count()
    }

    /// Collection counters.
    pub fn stats(&self) -> HeapStats {
        self.stats
    }

    /// Find unreachable container cycles and break them. Returns the number
    /// of objects reclaimed.
    pub fn collect(&mut self) -> usize {
        self.stats.collections += 1;

        // Upgrade, dropping entries for objects already freed. Each object
        // is held once even if it was tracked more than once.
        let mut nodes: Vec<Node> = Vec::with_capacity(self.tracked.len());
        let mut index: FxHashMap<usize, usize> = FxHashMap::default();
        self.tracked.retain(|t| match t.upgrade() {
            Some(node) => {
                let addr = node.addr();
                if index.contains_key(&addr) {
                    return false;
                }
                index.insert(addr, nodes.len());
                nodes.push(node);
                true
            }
            None => false,
        });

        // gc_refs = strong count minus our handle, minus internal edges
        let mut gc_refs: Vec<usize> = nodes.iter().map(|n| n.strong_count() - 1).collect();
        let mut edges: Vec<Vec<usize>> = Vec::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            match node.edges() {
                Some(targets) => {
                    let internal: Vec<usize> =
                        targets.iter().filter_map(|addr| index.get(addr).copied()).collect();
                    for &target in &internal {
                        gc_refs[target] = gc_refs[target].saturating_sub(1);
                    }
                    edges.push(internal);
                }
                None => {
                    // Busy objects are in use by a caller, hence reachable.
                    gc_refs[i] = usize::MAX;
                    edges.push(Vec::new());
                }
            }
        }

        // Propagate reachability from externally referenced objects
        let mut reachable: Vec<bool> = gc_refs.iter().map(|&r| r > 0).collect();
        let mut worklist: Vec<usize> = (0..nodes.len()).filter(|&i| reachable[i]).collect();
        while let Some(i) = worklist.pop() {
            for &target in &edges[i] {
                if !reachable[target] {
                    reachable[target] = true;
                    worklist.push(target);
                }
            }
        }

        // Break the unreachable cycles. Contents are dropped only after
        // every object has been emptied.
        let mut garbage: Vec<Vec<Value>> = Vec::new();
        for (node, _) in nodes.iter().zip(&reachable).filter(|(_, r)| !**r) {
            garbage.push(node.take_contents());
        }
        let reclaimed = garbage.len();
        drop(garbage);
        drop(nodes);

        self.tracked.retain(|t| match t {
            Tracked::List(weak) => weak.strong_count() > 0,
            Tracked::Deque(weak) => weak.is_alive(),
        });
        self.stats.reclaimed += reclaimed as u64;
        tracing::debug!(
            "cycle collection: {} unreachable, {} still tracked",
            reclaimed,
            self.tracked.len()
        );
        reclaimed
    }
}
