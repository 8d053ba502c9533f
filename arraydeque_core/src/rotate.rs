//! Rotation engine.
//!
//! `rotate(k)` is equivalent to `k` rounds of pop-right/push-left (or
//! `|k|` rounds of pop-left/push-right for negative `k`). The step count is
//! reduced modulo the length and performed in whichever direction needs
//! fewer moves, so a rotation costs at most `min(r, n - r)` element moves
//! where `r = k mod n`. A full ring rotates by moving the head alone.

use crate::storage::RingStorage;

/// Normalized rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RotationPlan {
    /// Nothing to do (empty, single element, or a multiple of the length).
    Identity,
    /// Move `n` elements from the back to the front.
    BackToFront(usize),
    /// Move `n` elements from the front to the back.
    FrontToBack(usize),
}

/// Reduce a signed step count to the cheapest equivalent plan.
pub(crate) fn plan(steps: isize, len: usize) -> RotationPlan {
    if len <= 1 {
        return RotationPlan::Identity;
    }

    // Right-rotation amount in [0, len)
    let right = if steps >= 0 {
        steps.unsigned_abs() % len
    } else {
        (len - steps.unsigned_abs() % len) % len
    };

    if right == 0 {
        RotationPlan::Identity
    } else if right <= len - right {
        RotationPlan::BackToFront(right)
    } else {
        RotationPlan::FrontToBack(len - right)
    }
}

/// Rotate the live window by `steps`. Returns the number of element moves.
pub(crate) fn rotate<T>(storage: &mut RingStorage<T>, steps: isize) -> usize {
    match plan(steps, storage.len()) {
        RotationPlan::Identity => 0,
        RotationPlan::BackToFront(n) => storage.shift_back_to_front(n),
        RotationPlan::FrontToBack(n) => storage.shift_front_to_back(n),
    }
}
