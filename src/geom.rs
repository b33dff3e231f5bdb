//! Scalar geometry: distances, snapping, and angle computation.
//!
//! Everything here is a pure function over [`Point`]s and [`Segment`]s.
//! Point identity is exact float equality — snapping guarantees that shared
//! endpoints are bit-identical, so no epsilon comparisons are needed.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use crate::camera::Point;
use crate::doc::Segment;

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Midpoint of two points.
#[must_use]
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Exact point equality. Valid because snapped points are copied, never
/// recomputed.
#[must_use]
pub fn same_point(a: Point, b: Point) -> bool {
    a.x == b.x && a.y == b.y
}

/// Snap a candidate point onto the nearest of `points` within `threshold`.
///
/// Returns the candidate unchanged when nothing is close enough. Ties are
/// broken by first-seen order.
#[must_use]
pub fn closest_point(candidate: Point, points: &[Point], threshold: f64) -> Point {
    let mut closest: Option<(Point, f64)> = None;
    for &p in points {
        let d = distance(candidate, p);
        if d < threshold && closest.map_or(true, |(_, best)| d < best) {
            closest = Some((p, d));
        }
    }
    closest.map_or(candidate, |(p, _)| p)
}

/// The point at `dist` along the segment direction from its start. Negative
/// distances walk backwards past the start; distances beyond the length
/// extrapolate past the end. A zero-length segment yields its start.
#[must_use]
pub fn point_at_distance(seg: &Segment, dist: f64) -> Point {
    let length = distance(seg.start, seg.end);
    if length == 0.0 {
        return seg.start;
    }
    let t = dist / length;
    Point::new(
        seg.start.x + t * (seg.end.x - seg.start.x),
        seg.start.y + t * (seg.end.y - seg.start.y),
    )
}

/// Unsigned angle in degrees, range [0, 180], at `vertex` between the arms
/// toward `a` and toward `b`. Zero-length arms yield 0.
#[must_use]
pub fn angle_at_vertex(vertex: Point, a: Point, b: Point) -> f64 {
    let v1 = (a.x - vertex.x, a.y - vertex.y);
    let v2 = (b.x - vertex.x, b.y - vertex.y);
    let m1 = (v1.0.powi(2) + v1.1.powi(2)).sqrt();
    let m2 = (v2.0.powi(2) + v2.1.powi(2)).sqrt();
    if m1 == 0.0 || m2 == 0.0 {
        return 0.0;
    }
    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let cos = (dot / (m1 * m2)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Full angle in degrees, range [0, 360), of the arm from `vertex` toward
/// `p`, measured from the positive x axis. With screen coordinates (y down)
/// increasing angles sweep clockwise.
#[must_use]
pub fn full_angle(vertex: Point, p: Point) -> f64 {
    let deg = (p.y - vertex.y).atan2(p.x - vertex.x).to_degrees();
    if deg < 0.0 { deg + 360.0 } else { deg }
}

/// The endpoint the two segments share, if any.
#[must_use]
pub fn shared_point(a: &Segment, b: &Segment) -> Option<Point> {
    if same_point(a.start, b.start) || same_point(a.start, b.end) {
        Some(a.start)
    } else if same_point(a.end, b.start) || same_point(a.end, b.end) {
        Some(a.end)
    } else {
        None
    }
}

/// Unsigned angle in degrees between two segments sharing an endpoint.
///
/// Returns `None` when the segments have no common endpoint — the caller
/// skips the pair; this is expected, not an error.
#[must_use]
pub fn angle_between(a: &Segment, b: &Segment) -> Option<f64> {
    let vertex = shared_point(a, b)?;
    let far_a = if same_point(a.start, vertex) { a.end } else { a.start };
    let far_b = if same_point(b.start, vertex) { b.end } else { b.start };
    Some(angle_at_vertex(vertex, far_a, far_b))
}

/// Round to `precision` decimal places.
#[must_use]
pub fn round_to(value: f64, precision: i32) -> f64 {
    let factor = 10f64.powi(precision);
    (value * factor).round() / factor
}

/// All endpoints of the given segments, in order, with duplicates kept.
/// Duplicates matter: reference counting for the select tool depends on
/// them.
#[must_use]
pub fn points_of_segments(segments: &[Segment]) -> Vec<Point> {
    segments.iter().flat_map(|s| [s.start, s.end]).collect()
}
