//! Per-vertex angle labeling: clockwise arm ordering and the rule deciding
//! how many angles a vertex gets.
//!
//! When several segments radiate from one vertex, the arms are sorted
//! clockwise so that adjacent pairs are labeled consistently no matter the
//! order the segments were drawn in. A vertex with n arms gets n−1 angles
//! (an open fan) unless the fan already sweeps past 180°, in which case the
//! wrap-around pair is emitted too, for n angles covering the full surround.
//! The 180° cutoff avoids double-labeling the reflex remainder of an open
//! fan; downstream label placement depends on the exact count, so this rule
//! is preserved as-is.

#[cfg(test)]
#[path = "angle_test.rs"]
mod angle_test;

use crate::camera::Point;
use crate::consts::FULL_SURROUND_CUTOFF_DEG;
use crate::geom;

/// One labeled angle at a vertex, between the arms toward `arm_a` and
/// `arm_b`. Numeric only — arc and label placement are a rendering concern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexAngle {
    pub vertex: Point,
    pub arm_a: Point,
    pub arm_b: Point,
    pub degrees: f64,
}

/// Sort the far-endpoints of the segments touching `vertex` into clockwise
/// order (screen coordinates), starting from the positive x axis.
///
/// Ascending [`geom::full_angle`] is clockwise on screen since y grows
/// downward.
#[must_use]
pub fn sort_clockwise(vertex: Point, mut arms: Vec<Point>) -> Vec<Point> {
    arms.sort_by(|&a, &b| {
        geom::full_angle(vertex, a).total_cmp(&geom::full_angle(vertex, b))
    });
    arms
}

/// Compute the labeled angles at `vertex` given the far-endpoints of every
/// segment touching it.
///
/// Arms are sorted clockwise, then each adjacent pair gets its unsigned
/// angle. If those n−1 angles sum past 180° the wrap-around pair is emitted
/// as well.
#[must_use]
pub fn angles_around_vertex(vertex: Point, arms: Vec<Point>) -> Vec<VertexAngle> {
    if arms.len() < 2 {
        return Vec::new();
    }
    let sorted = sort_clockwise(vertex, arms);
    let mut angles = Vec::with_capacity(sorted.len());
    let mut sum = 0.0;
    for pair in sorted.windows(2) {
        let degrees = geom::angle_at_vertex(vertex, pair[0], pair[1]);
        sum += degrees;
        angles.push(VertexAngle { vertex, arm_a: pair[0], arm_b: pair[1], degrees });
    }
    if sum > FULL_SURROUND_CUTOFF_DEG {
        let first = sorted[0];
        let last = sorted[sorted.len() - 1];
        angles.push(VertexAngle {
            vertex,
            arm_a: last,
            arm_b: first,
            degrees: geom::angle_at_vertex(vertex, last, first),
        });
    }
    angles
}
