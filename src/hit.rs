#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::doc::Segment;
use crate::geom;

/// Result of an endpoint hit test: the snapped endpoint, the segment it
/// belongs to, and the segment's opposite endpoint (the anchor that stays
/// put while this one is dragged).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointHit {
    pub point: Point,
    pub segment_index: usize,
    pub anchor: Point,
}

/// How many committed segment endpoints coincide with `p`.
#[must_use]
pub fn reference_count(p: Point, segments: &[Segment]) -> usize {
    geom::points_of_segments(segments)
        .into_iter()
        .filter(|&q| geom::same_point(p, q))
        .count()
}

/// Whether `p` appears in exactly one committed segment. Only such points
/// may be dragged by the select tool; shared vertices stay fixed.
#[must_use]
pub fn is_singly_referenced(p: Point, segments: &[Segment]) -> bool {
    reference_count(p, segments) == 1
}

/// Test whether `world_pt` grabs a draggable endpoint.
///
/// Snaps to the nearest endpoint within `threshold` and returns a hit only
/// when that endpoint is singly-referenced. A miss (nothing within the
/// threshold, or a shared vertex) returns `None` and the drag is refused.
#[must_use]
pub fn endpoint_hit(world_pt: Point, segments: &[Segment], threshold: f64) -> Option<EndpointHit> {
    let points = geom::points_of_segments(segments);
    let snapped = geom::closest_point(world_pt, &points, threshold);
    if geom::same_point(snapped, world_pt) && !points.iter().any(|&q| geom::same_point(q, world_pt))
    {
        return None;
    }
    if !is_singly_referenced(snapped, segments) {
        return None;
    }
    let segment_index = segments.iter().position(|seg| seg.touches(snapped))?;
    let anchor = segments[segment_index].opposite(snapped);
    Some(EndpointHit { point: snapped, segment_index, anchor })
}
