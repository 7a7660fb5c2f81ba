//! Per-axis movement resolution against a collision predicate.

use crate::api::config::CollisionPolicy;

/// Amount a blocked delta shrinks by on each incremental-slide attempt.
pub const SLIDE_STEP: f32 = 0.1;

/// Upper bound on collision queries for one incremental slide.
pub const MAX_SLIDE_ATTEMPTS: u32 = 16_384;

/// Find the step to commit for a requested `delta` on one axis.
///
/// `is_free(step)` answers whether moving by `step` is collision-free.
/// Returns `None` when no nonzero step fits (the caller zeroes velocity).
pub fn resolve_step(
    policy: CollisionPolicy,
    delta: f32,
    is_free: impl FnMut(f32) -> bool,
) -> Option<f32> {
    match policy {
        CollisionPolicy::IncrementalSlide => incremental_slide(delta, is_free),
        CollisionPolicy::Binary => binary(delta, is_free),
    }
}

/// Try the full delta, then shrink it toward zero by [`SLIDE_STEP`] until a
/// free step is found.
pub fn incremental_slide(delta: f32, mut is_free: impl FnMut(f32) -> bool) -> Option<f32> {
    if delta == 0.0 || !delta.is_finite() {
        return None;
    }
    let dir = delta.signum();
    let magnitude = delta.abs();
    // Count attempts instead of repeatedly subtracting, so rounding never
    // produces a near-zero phantom step.
    let attempts = (magnitude / SLIDE_STEP).ceil().min(MAX_SLIDE_ATTEMPTS as f32) as u32;
    let mut last = f32::NAN;
    for i in 0..attempts {
        let step = magnitude - i as f32 * SLIDE_STEP;
        if step <= f32::EPSILON {
            break;
        }
        // Large magnitudes round several attempts to the same value
        if step == last {
            continue;
        }
        last = step;
        if is_free(dir * step) {
            return Some(dir * step);
        }
    }
    None
}

/// All or nothing.
pub fn binary(delta: f32, mut is_free: impl FnMut(f32) -> bool) -> Option<f32> {
    if delta != 0.0 && delta.is_finite() && is_free(delta) {
        Some(delta)
    } else {
        None
    }
}
