//! Fibonacci-sphere placement.
//!
//! Points are laid out on a spiral from the north pole (`y ≈ +1`) to the
//! south pole (`y ≈ −1`), each one turned by the golden angle from the last.
//! The result is deterministic for a given count, so re-renders and tests
//! always see the same ordering.

use crate::constants::GOLDEN_ANGLE;
use glam::Vec3;

/// Unit directions for `count` points, approximately evenly spread.
pub fn fibonacci_directions(count: usize) -> Vec<Vec3> {
    let n = count as f32;
    (0..count)
        .map(|i| {
            let y = 1.0 - (2.0 * i as f32 + 1.0) / n;
            let r = (1.0 - y * y).max(0.0).sqrt();
            let theta = i as f32 * GOLDEN_ANGLE;
            Vec3::new(r * theta.cos(), y, r * theta.sin())
        })
        .collect()
}

/// Rest positions: the unit directions scaled by `radius`.
pub fn fibonacci_sphere(count: usize, radius: f32) -> Vec<Vec3> {
    fibonacci_directions(count)
        .into_iter()
        .map(|d| d * radius)
        .collect()
}

/// Hosts that track counts as signed values get an empty sphere for
/// anything negative.
#[inline]
pub fn count_from_signed(count: i64) -> usize {
    usize::try_from(count).unwrap_or(0)
}
