//! End-to-end behavior of the public deque API.

use arraydeque_core::trace::CountingTracer;
use arraydeque_core::{
    Deque, DequeConfig, DequeError, DequeFactory, IndexKey, PlainDeque, Trace, validate_maxlen,
};
use std::rc::Rc;

fn chars(d: &Deque<char>) -> String {
    d.iter().collect()
}

// =============================================================================
// Bounded Scenarios
// =============================================================================

#[test]
fn test_bounded_append_keeps_newest() {
    let mut d = Deque::with_maxlen(3);
    for i in 1..=4 {
        d.append(i);
    }
    assert_eq!(d.to_vec(), vec![2, 3, 4]);
}

#[test]
fn test_bounded_appendleft_keeps_newest() {
    let mut d = Deque::with_maxlen(3);
    for i in 1..=4 {
        d.appendleft(i);
    }
    assert_eq!(d.to_vec(), vec![4, 3, 2]);
}

#[test]
fn test_bounded_construction_keeps_tail() {
    let d = Deque::from_iter_bounded(0..10, Some(5));
    assert_eq!(d.to_vec(), vec![5, 6, 7, 8, 9]);
}

#[test]
fn test_each_push_past_bound_evicts_one() {
    let mut d = Deque::with_maxlen(4);
    d.extend(0..4);
    for i in 4..100 {
        let before = d.stats().evictions;
        assert_eq!(d.append(i), Some(i - 4));
        assert_eq!(d.stats().evictions, before + 1);
        assert_eq!(d.len(), 4);
    }
}

#[test]
fn test_negative_maxlen_rejected() {
    assert!(matches!(
        validate_maxlen(-1),
        Err(DequeError::InvalidArgument(_))
    ));
    let d: Deque<i32> = Deque::with_maxlen(validate_maxlen(7).unwrap());
    assert_eq!(d.maxlen(), Some(7));
}

// =============================================================================
// Order Scenarios
// =============================================================================

#[test]
fn test_rotate_letters() {
    let mut d: Deque<char> = "abcde".chars().collect();
    d.rotate(1);
    assert_eq!(chars(&d), "eabcd");
    d.rotate(-1);
    assert_eq!(chars(&d), "abcde");
    d.rotate(-1);
    assert_eq!(chars(&d), "bcdea");
}

#[test]
fn test_rotate_round_trip_all_lengths() {
    for n in 0..40 {
        let original: Deque<usize> = (0..n).collect();
        for k in -45isize..45 {
            let mut d = original.clone();
            d.rotate(k);
            d.rotate(-k);
            assert_eq!(d, original, "n={} k={}", n, k);
        }
    }
}

#[test]
fn test_rotate_equals_repeated_pop_append() {
    let mut rotated: Deque<i32> = (0..9).collect();
    let mut stepped = rotated.clone();
    rotated.rotate(4);
    for _ in 0..4 {
        let v = stepped.pop().unwrap();
        stepped.appendleft(v);
    }
    assert_eq!(rotated, stepped);
}

#[test]
fn test_extendleft_reverses() {
    let mut d = Deque::new();
    d.extendleft([10, 20, 30]);
    assert_eq!(d.to_vec(), vec![30, 20, 10]);
}

#[test]
fn test_remove_first_occurrence() {
    let mut d: Deque<char> = "abcbc".chars().collect();
    d.remove(&'b').unwrap();
    assert_eq!(chars(&d), "acbc");
}

// =============================================================================
// Index Laws
// =============================================================================

#[test]
fn test_index_laws() {
    for n in 1..20isize {
        let d: Deque<isize> = (0..n).collect();
        assert_eq!(d.get(-1), d.get(n - 1));
        assert_eq!(d.get(-n), d.get(0));
        assert!(matches!(d.get(n), Err(DequeError::IndexOutOfRange { .. })));
        assert!(matches!(
            d.get(-n - 1),
            Err(DequeError::IndexOutOfRange { .. })
        ));
    }
}

#[test]
fn test_dynamic_keys() {
    let mut d: Deque<i32> = (0..3).collect();
    assert_eq!(d.get_item(IndexKey::from(-1i64)), Ok(&2));
    assert_eq!(
        d.set_item(IndexKey::Slice, 0),
        Err(DequeError::WrongIndexType("slice"))
    );
    assert!(d.set_item(IndexKey::Int(3), 0).unwrap_err().raises_index_error());
    assert_eq!(d.to_vec(), vec![0, 1, 2]);
}

// =============================================================================
// Amortized Cost
// =============================================================================

#[test]
fn test_push_reflow_moves_are_linear() {
    const N: u64 = 100_000;
    let mut d = Deque::new();
    for i in 0..N {
        if i % 3 == 0 {
            d.appendleft(i);
        } else {
            d.append(i);
        }
    }
    assert!(d.stats().reflow_moves <= 2 * N, "moves {}", d.stats().reflow_moves);
}

#[test]
fn test_push_pop_churn_is_linear() {
    const ROUNDS: u64 = 2_000;
    let mut d = Deque::new();
    let mut ops = 0u64;
    for round in 0..ROUNDS {
        for i in 0..64 {
            d.append(round * 64 + i);
            ops += 1;
        }
        for _ in 0..64 {
            d.popleft().unwrap();
            ops += 1;
        }
    }
    assert!(d.is_empty());
    assert!(d.stats().reflow_moves <= 2 * ops);
}

#[test]
fn test_shrink_can_be_disabled() {
    let mut d = Deque::with_config(DequeConfig::throughput()).unwrap();
    d.extend(0..1000);
    while d.pop().is_ok() {}
    assert_eq!(d.stats().shrinks, 0);
}

// =============================================================================
// Duplication / Tracing
// =============================================================================

#[test]
fn test_linearize_and_rebuild() {
    let mut d = Deque::with_maxlen(6);
    d.extend(0..10);
    d.rotate(2);
    let copy = d.rebuild_with(&PlainDeque);
    assert_eq!(copy, d);
    assert_eq!(copy.maxlen(), Some(6));

    let rebuilt = PlainDeque.construct(d.to_vec(), d.maxlen());
    assert_eq!(rebuilt, d);
}

#[test]
fn test_trace_reports_every_shared_element() {
    let shared = Rc::new(5);
    let mut d = Deque::new();
    for _ in 0..10 {
        d.append(Rc::clone(&shared));
    }
    d.rotate(3);
    d.popleft().unwrap();

    let mut tracer = CountingTracer::new();
    d.trace(&mut tracer);
    assert_eq!(tracer.count, 9);
    assert_eq!(Rc::strong_count(&shared), 10);
}

#[test]
fn test_rendering() {
    let d = Deque::from_iter_bounded(["x", "y"], Some(3));
    assert_eq!(d.to_string(), "deque([x, y], maxlen=3)");
    let e: Deque<i32> = Deque::new();
    assert_eq!(format!("{:?}", e), "deque([])");
}
